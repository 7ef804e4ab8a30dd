//! Plain-text rendering for training output.
//!
//! Fixed-width layouts so weight dumps and data tables line up in a terminal.

use std::fmt::Write;

use crate::{Termination, TrainingReport};

/// Render `values` with `per_row` entries per line and `decimals` places.
///
/// Each entry is right-aligned to `decimals + 4` columns and followed by a
/// space; every line ends with `\n`. `per_row == 0` puts everything on one line.
pub fn format_vector(values: &[f64], per_row: usize, decimals: usize) -> String {
    let width = decimals + 4;
    let per_row = if per_row == 0 { values.len().max(1) } else { per_row };

    let mut out = String::new();
    for line in values.chunks(per_row) {
        for v in line {
            let _ = write!(out, "{v:>width$.decimals$} ");
        }
        out.push('\n');
    }
    out
}

/// Render a table of rows, each prefixed with its right-aligned index.
///
/// Non-negative entries get a leading space in place of the minus sign so
/// columns stay aligned.
pub fn format_matrix<R: AsRef<[f64]>>(rows: &[R], decimals: usize) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let _ = write!(out, "{i:>3}: ");
        for &v in row.as_ref() {
            let sign = if v >= 0.0 { ' ' } else { '-' };
            let _ = write!(out, "{sign}{:.decimals$} ", v.abs());
        }
        out.push('\n');
    }
    out
}

/// One-paragraph summary of a finished run.
pub fn format_summary(report: &TrainingReport, test_accuracy: Option<f64>) -> String {
    let outcome = &report.outcome;
    let reason = match outcome.termination {
        Termination::Converged => "converged",
        Termination::EpochBudgetExhausted => "epoch budget exhausted",
    };

    let mut out = String::new();
    let _ = writeln!(out, "Training stopped after {} epochs ({reason})", outcome.epochs);
    let _ = writeln!(out, "Best training error = {:.6}", outcome.best_fitness);
    let _ = writeln!(out, "Accuracy on training data = {:.4}", report.train_accuracy);
    if let Some(acc) = test_accuracy {
        let _ = writeln!(out, "Accuracy on test data = {acc:.4}");
    }
    out
}
