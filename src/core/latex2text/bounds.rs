//! Error-bound formatting for partially cleaned text
//!
//! Targets residues like `0.5(-0.1)^+0.2` that show up once backslashes and
//! dollars are already gone. Kept apart from the normalizer table because the
//! input shapes differ.

use lazy_static::lazy_static;

use super::rules::{apply_all, RewriteRule};

lazy_static! {
    static ref ERROR_BOUND_RULES: Vec<RewriteRule> = vec![
        // 0.32(-0.20)^+0.22 -> 0.32 (+0.22/-0.20)
        RewriteRule::fixed(
            "paren-lower",
            r"([0-9.]+)\(([^)]+)\)\^\+([0-9.]+)",
            "${1} (+${3}/${2})",
        ),
        // 0.32_{-0.20}^{+0.22} -> 0.32 (+0.22/-0.20)
        RewriteRule::fixed(
            "braced",
            r"([0-9.]+)_\{([^}]+)\}\^\{([^}]+)\}",
            "${1} (${3}/${2})",
        ),
        // 0.32_-0.20^+0.22 -> 0.32 (+0.22/-0.20)
        RewriteRule::fixed("bare", r"([0-9.]+)_([^}\s^]+)\^([^}\s]+)", "${1} (${3}/${2})"),
        // Leftover halves
        RewriteRule::fixed("upper-residue", r"\^(\+[0-9.]+)", " (${1})"),
        RewriteRule::fixed("lower-residue", r"([^\s(])\((-[0-9.]+)\)", "${1} (${2})"),
    ];
}

/// Rewrite error-bound residues into `VALUE (+UPPER/LOWER)` form.
pub fn format_error_bounds(text: &str) -> String {
    apply_all(ERROR_BOUND_RULES.iter(), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paren_form() {
        assert_eq!(format_error_bounds("0.5(-0.1)^+0.2"), "0.5 (+0.2/-0.1)");
    }

    #[test]
    fn test_braced_and_bare_forms() {
        assert_eq!(format_error_bounds("0.32_{-0.20}^{+0.22}"), "0.32 (+0.22/-0.20)");
        assert_eq!(format_error_bounds("0.32_-0.20^+0.22"), "0.32 (+0.22/-0.20)");
    }

    #[test]
    fn test_residues() {
        assert_eq!(format_error_bounds("x^+0.3"), "x (+0.3)");
        assert_eq!(format_error_bounds("y(-0.4)"), "y (-0.4)");
    }

    #[test]
    fn test_untouched_text() {
        assert_eq!(format_error_bounds("no bounds here (-x)"), "no bounds here (-x)");
        assert_eq!(format_error_bounds(""), "");
    }

    #[test]
    fn test_output_is_stable() {
        let once = format_error_bounds("0.5(-0.1)^+0.2 and y(-0.4)");
        assert_eq!(format_error_bounds(&once), once);
    }
}
