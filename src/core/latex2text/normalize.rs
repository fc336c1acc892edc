//! Plain-text normalization of LaTeX markup
//!
//! [`Normalizer::normalize`] runs the shared rewrite table, then the table of
//! known exceptions, then collapses whitespace. The function is total: input
//! it cannot make sense of comes back partially cleaned, never as an error.

use lazy_static::lazy_static;
use regex::Regex;

use super::rules::{RewriteRule, Replacement, COLLAPSE_WHITESPACE, REWRITE_TABLE};
use crate::config::{ExceptionEntry, NormalizerConfig};
use crate::utils::error::{PapersError, PapersResult};

lazy_static! {
    static ref BUILTIN_EXCEPTIONS: Vec<RewriteRule> = vec![
        RewriteRule::fixed("column-density", r"N_HI\^DW", "N(HI,DW)"),
        RewriteRule::fixed("upper-subscript", r"([A-Z]+)_([A-Z]+)", "${1}(${2})"),
        RewriteRule::fixed("log-base-digits", r"log_([0-9]+)", "log(${1})"),
        RewriteRule::fixed("lower-digit-subscript", r"([a-z]+)_([0-9]+)", "${1}(${2})"),
        RewriteRule::fixed("ionization-fraction", r"x_HI", "x(HI)"),
        RewriteRule::fixed("quasar-lifetime", r"t_Q", "t(Q)"),
        RewriteRule::fixed("patch-distance", r"r_patch", "r(patch)"),
    ];

    pub(crate) static ref DEFAULT_NORMALIZER: Normalizer = Normalizer::new();
}

/// Upper bound on pipeline passes; configured exceptions that rewrite each
/// other would otherwise never settle.
const MAX_PASSES: usize = 8;

/// Known exceptions: literal fixes for identifiers that recur in abstracts
/// and that the generic rules leave with a bare underscore.
#[derive(Debug, Clone)]
pub struct ExceptionTable {
    extra: Vec<RewriteRule>,
}

impl Default for ExceptionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExceptionTable {
    pub fn builtin() -> Self {
        Self { extra: Vec::new() }
    }

    /// Add entries after the built-in ones.
    pub fn extend_from(&mut self, entries: &[ExceptionEntry]) -> PapersResult<()> {
        for entry in entries {
            self.extra.push(compile_entry(entry)?);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        BUILTIN_EXCEPTIONS.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rules(&self) -> impl Iterator<Item = &RewriteRule> {
        BUILTIN_EXCEPTIONS.iter().chain(self.extra.iter())
    }
}

fn compile_entry(entry: &ExceptionEntry) -> PapersResult<RewriteRule> {
    if entry.find.is_empty() {
        return Err(PapersError::config("exception entry with empty `find`"));
    }
    let (pattern, template) = if entry.regex {
        (entry.find.clone(), entry.replace.clone())
    } else {
        // `$` is special in replacement templates
        (regex::escape(&entry.find), entry.replace.replace('$', "$$"))
    };
    let regex = Regex::new(&pattern).map_err(|e| PapersError::InvalidPattern {
        pattern: entry.find.clone(),
        message: e.to_string(),
    })?;
    Ok(RewriteRule::from_regex(
        format!("exception:{}", entry.find),
        regex,
        Replacement::Template(template),
    ))
}

/// Text normalizer with its exception table.
///
/// Cheap to share: all state is immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    exceptions: ExceptionTable,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalizer whose exception table includes the configured entries.
    pub fn with_config(config: &NormalizerConfig) -> PapersResult<Self> {
        let mut exceptions = ExceptionTable::builtin();
        exceptions.extend_from(&config.exceptions)?;
        tracing::debug!(
            exceptions = exceptions.len(),
            "normalizer configured"
        );
        Ok(Self { exceptions })
    }

    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    /// Rewrite LaTeX markup into readable plain text.
    ///
    /// The pipeline is repeated until its output stops changing, so markup
    /// exposed by a later rule (a subscript freed by brace stripping, a `$`
    /// pair left by an uneven run) is cleaned in the same call.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let mut current = self.pass(text);
        for _ in 1..MAX_PASSES {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        tracing::debug!(passes = MAX_PASSES, "normalization did not settle");
        current
    }

    /// One pass of rules 1-13.
    fn pass(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in REWRITE_TABLE.iter() {
            out = rule.apply(out);
        }
        for rule in self.exceptions.rules() {
            out = rule.apply(out);
        }
        COLLAPSE_WHITESPACE.apply(out).trim().to_string()
    }
}

/// Normalize with the built-in exception table.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}
