//! normgof - Gaussian goodness-of-fit from the command line
//!
//! `normgof test` exits with the number of tests that rejected the
//! Gaussian hypothesis, so `normgof test ... && echo gaussian` works in
//! scripts. Errors exit with status 255.

mod cli;
mod input;
mod output;

use std::process::ExitCode;

use clap::Parser;
use normgof_stats::{parzen_quantiles, run_tests, GofConfig};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, QuantileArgs, TestArgs};

const EXIT_ERROR: u8 = 255;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries results only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Test(args) => run_test(&args),
        Command::Quantile(args) => run_quantile(&args).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("normgof: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_test(args: &TestArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let base = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from {:?}", path);
            GofConfig::from_toml(&std::fs::read_to_string(path)?)?
        }
        None => GofConfig::default(),
    };
    let config = args.apply(base)?;
    let sample = input::sample_or_stdin(&args.values)?;

    let report = run_tests(&sample, &config)?;
    if args.json {
        println!("{}", output::render_json(&report, config.emit)?);
    } else {
        print!("{}", output::render_text(&report, config.emit));
    }

    let rejections = report.rejections().min(usize::from(EXIT_ERROR - 1));
    tracing::debug!(rejections, "finished");
    Ok(ExitCode::from(rejections as u8))
}

fn run_quantile(args: &QuantileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut sample = input::sample_or_stdin(&args.values)?;
    sample.sort_by(f64::total_cmp);
    let quantiles = parzen_quantiles(&sample, &args.probs)?;
    print!("{}", output::render_quantiles(&args.probs, &quantiles));
    Ok(())
}
