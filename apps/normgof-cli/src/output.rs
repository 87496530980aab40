//! Formatting reports for the terminal

use std::fmt::Write;

use normgof_stats::{EdfTest, Emit, GofReport, LocationScale, Modifications};
use serde::Serialize;

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn label(test: EdfTest, mods: Modifications) -> String {
    if mods.is_empty() {
        test.to_string()
    } else {
        let names: Vec<&str> = mods.iter_names().map(|(name, _)| name).collect();
        format!("{}[{}]", test, names.join(","))
    }
}

/// Plain-text report, one line per emitted item
pub fn render_text(report: &GofReport, emit: Emit) -> String {
    let mut out = String::new();

    if emit.contains(Emit::ZSCORES) {
        let _ = writeln!(out, "z: {}", join(&report.z_scores));
    }
    if emit.contains(Emit::PIT) {
        let _ = writeln!(out, "u01: {}", join(&report.pit));
    }

    for outcome in &report.outcomes {
        let name = label(outcome.test, outcome.modifications);
        if emit.contains(Emit::CDF) {
            let _ = writeln!(out, "{name} cdf: {}", join(outcome.null_cdf.values()));
        }

        let mut fields = Vec::new();
        if emit.contains(Emit::STATISTIC) {
            fields.push(format!("stat={:.6}", outcome.statistic));
        }
        if emit.contains(Emit::PVALUE) {
            fields.push(format!("p={:.4}", outcome.p_value));
            fields.push(format!("tail={:.4}", outcome.upper_tail));
            fields.push(if outcome.rejected { "REJECT" } else { "ok" }.to_string());
        }
        if !fields.is_empty() {
            let _ = writeln!(out, "{name}: {}", fields.join(" "));
        }
    }

    for failure in &report.failures {
        let name = label(failure.test, failure.modifications);
        let _ = writeln!(out, "{name}: failed ({}) REJECT", failure.message);
    }

    out
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistic: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    p_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_tail: Option<f64>,
    rejected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cdf: Option<&'a [f64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    n: usize,
    params: LocationScale,
    estimated: bool,
    seed: u64,
    alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    z_scores: Option<&'a [f64]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pit: Option<&'a [f64]>,
    rejections: usize,
    tests: Vec<JsonOutcome<'a>>,
}

/// JSON report restricted to the emitted items
pub fn render_json(report: &GofReport, emit: Emit) -> serde_json::Result<String> {
    let failures = report.failures.iter().map(|f| JsonOutcome {
        test: label(f.test, f.modifications),
        statistic: None,
        p_value: None,
        upper_tail: None,
        rejected: true,
        cdf: None,
        error: Some(f.message.as_str()),
    });
    let tests = report
        .outcomes
        .iter()
        .map(|o| JsonOutcome {
            test: label(o.test, o.modifications),
            statistic: emit.contains(Emit::STATISTIC).then_some(o.statistic),
            p_value: emit.contains(Emit::PVALUE).then_some(o.p_value),
            upper_tail: emit.contains(Emit::PVALUE).then_some(o.upper_tail),
            rejected: o.rejected,
            cdf: emit.contains(Emit::CDF).then(|| o.null_cdf.values()),
            error: None,
        })
        .chain(failures)
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        n: report.n,
        params: report.params,
        estimated: report.estimated,
        seed: report.seed,
        alpha: report.alpha,
        z_scores: emit.contains(Emit::ZSCORES).then_some(report.z_scores.as_slice()),
        pit: emit.contains(Emit::PIT).then_some(report.pit.as_slice()),
        rejections: report.rejections(),
        tests,
    })
}

/// Quantile lines as `q value`
pub fn render_quantiles(probs: &[f64], quantiles: &[f64]) -> String {
    probs
        .iter()
        .zip(quantiles)
        .map(|(p, q)| format!("{p} {q}\n"))
        .collect()
}
