//! Reading samples from stdin

use std::io::BufRead;

use thiserror::Error;

/// Errors reading a sample
#[derive(Error, Debug)]
pub enum InputError {
    #[error("line {line}: '{token}' is not a number")]
    Parse { line: usize, token: String },

    #[error("no sample values given")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read whitespace-separated numbers, skipping blank lines and `#` comments
pub fn read_sample<R: BufRead>(reader: R) -> Result<Vec<f64>, InputError> {
    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        for token in content.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| InputError::Parse {
                line: idx + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Use the positional values, or read stdin when there are none
pub fn sample_or_stdin(values: &[f64]) -> Result<Vec<f64>, InputError> {
    let sample = if values.is_empty() {
        tracing::debug!("reading sample from stdin");
        read_sample(std::io::stdin().lock())?
    } else {
        values.to_vec()
    };
    if sample.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(sample)
}
