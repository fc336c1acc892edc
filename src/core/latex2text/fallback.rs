//! Readable fallback for math the typesetter rejected

use lazy_static::lazy_static;

use super::rules::{apply_all, RewriteRule, STRIP_BRACES};

lazy_static! {
    static ref FALLBACK_RULES: Vec<RewriteRule> = vec![
        RewriteRule::fixed("dollars", r"\$", ""),
        RewriteRule::fixed("command-names", r"\\([a-zA-Z]+)", "${1}"),
        STRIP_BRACES.clone(),
    ];
}

/// Strip dollars, command backslashes and braces from a math span.
///
/// Command names are kept (`\mathrm{H}` becomes `mathrmH`) so the reader
/// still sees what was there.
pub fn clean_math_fallback(source: &str) -> String {
    apply_all(FALLBACK_RULES.iter(), source).trim().to_string()
}
