//! Residue analysis: LaTeX left over after normalization.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::utils::error::{CliDiagnostic, DiagnosticSeverity};

lazy_static! {
    static ref COMMAND: Regex = Regex::new(r"\\[^\s]?[a-zA-Z]*").unwrap();
    static ref UNDERSCORE_WORD: Regex = Regex::new(r"[^\s]*_[^\s]*").unwrap();
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResidueMetrics {
    /// Backslashes (stray commands or escapes)
    pub commands: usize,
    /// Unmatched or leftover `{` / `}`
    pub braces: usize,
    pub dollars: usize,
    /// Bare underscores that no rule turned into parentheses
    pub underscores: usize,
}

impl ResidueMetrics {
    /// No markup that would read as noise. Underscores alone do not count.
    pub fn is_clean(&self) -> bool {
        self.commands == 0 && self.braces == 0 && self.dollars == 0
    }
}

pub fn residue_metrics(text: &str) -> ResidueMetrics {
    let mut metrics = ResidueMetrics::default();
    for ch in text.chars() {
        match ch {
            '\\' => metrics.commands += 1,
            '{' | '}' => metrics.braces += 1,
            '$' => metrics.dollars += 1,
            '_' => metrics.underscores += 1,
            _ => {}
        }
    }
    metrics
}

/// Describe each piece of residue in `text`.
pub fn residue_diagnostics(text: &str) -> Vec<CliDiagnostic> {
    let mut diags = Vec::new();
    for m in COMMAND.find_iter(text) {
        diags.push(
            CliDiagnostic::new(DiagnosticSeverity::Error, "command", "markup left in output")
                .with_location(m.as_str()),
        );
    }
    let metrics = residue_metrics(text);
    if metrics.braces > 0 {
        diags.push(CliDiagnostic::new(
            DiagnosticSeverity::Error,
            "brace",
            format!("{} unmatched brace(s)", metrics.braces),
        ));
    }
    if metrics.dollars > 0 {
        diags.push(CliDiagnostic::new(
            DiagnosticSeverity::Error,
            "dollar",
            format!("{} unmatched math delimiter(s)", metrics.dollars),
        ));
    }
    for m in UNDERSCORE_WORD.find_iter(text) {
        diags.push(
            CliDiagnostic::new(
                DiagnosticSeverity::Warning,
                "underscore",
                "subscript left unconverted",
            )
            .with_location(m.as_str()),
        );
    }
    diags
}
