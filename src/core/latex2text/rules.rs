//! Rewrite rules and the fixed rule table
//!
//! A [`RewriteRule`] is one regex plus what to put in place of each match.
//! The table in [`REWRITE_TABLE`] is compiled once and applied in order by
//! the normalizer; order is part of the contract because the generic
//! cleanup rules at the end would otherwise swallow the specific ones.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

use super::symbols::{GREEK_LETTERS, MATH_SYMBOLS};

/// What a rule puts in place of a match.
#[derive(Debug, Clone)]
pub enum Replacement {
    /// A regex replacement template (`${1}` style group references).
    Template(String),
    /// Look the first capture group up in a symbol table. Unknown names are
    /// left untouched for later rules.
    Lookup(&'static phf::Map<&'static str, &'static str>),
}

/// One pattern/replacement pair.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: Cow<'static, str>,
    pattern: Regex,
    replacement: Replacement,
    /// Re-apply until the text stops changing (used for nested braces).
    repeat: bool,
}

impl RewriteRule {
    /// Build a template rule from a pattern known to be valid.
    ///
    /// Panics on an invalid pattern; only used for the built-in tables.
    pub fn fixed(name: &'static str, pattern: &str, template: &str) -> Self {
        Self::from_regex(
            name,
            Regex::new(pattern).unwrap_or_else(|e| panic!("bad built-in rule {}: {}", name, e)),
            Replacement::Template(template.to_string()),
        )
    }

    fn lookup(
        name: &'static str,
        pattern: &str,
        table: &'static phf::Map<&'static str, &'static str>,
    ) -> Self {
        Self::from_regex(
            name,
            Regex::new(pattern).unwrap_or_else(|e| panic!("bad built-in rule {}: {}", name, e)),
            Replacement::Lookup(table),
        )
    }

    pub fn from_regex(
        name: impl Into<Cow<'static, str>>,
        pattern: Regex,
        replacement: Replacement,
    ) -> Self {
        Self {
            name: name.into(),
            pattern,
            replacement,
            repeat: false,
        }
    }

    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply the rule once over the whole text (or to a fixpoint for
    /// repeating rules).
    pub fn apply(&self, text: String) -> String {
        let mut current = text;
        loop {
            let rewritten = match &self.replacement {
                Replacement::Template(t) => self.pattern.replace_all(&current, t.as_str()),
                Replacement::Lookup(table) => {
                    self.pattern.replace_all(&current, |caps: &Captures| {
                        match table.get(&caps[1]) {
                            Some(glyph) => (*glyph).to_string(),
                            None => caps[0].to_string(),
                        }
                    })
                }
            };
            let next = match rewritten {
                Cow::Borrowed(_) => None,
                Cow::Owned(s) => Some(s),
            };
            let Some(next) = next else {
                return current;
            };
            tracing::trace!(rule = %self.name, "rule rewrote text");
            if !self.repeat || next == current {
                return next;
            }
            current = next;
        }
    }
}

/// Apply rules in order.
pub fn apply_all<'a>(rules: impl IntoIterator<Item = &'a RewriteRule>, text: &str) -> String {
    rules
        .into_iter()
        .fold(text.to_string(), |acc, rule| rule.apply(acc))
}

const TEXT_COMMANDS: &[&str] = &[
    "textit", "textbf", "emph", "text", "mathrm", "mathit", "mathbf", "mathcal", "mathbb",
    "mathfrak",
];

lazy_static! {
    /// Rules 1-11 of the normalizer, in application order.
    pub static ref REWRITE_TABLE: Vec<RewriteRule> = build_rewrite_table();

    /// Strip brace pairs, innermost first, keeping their content.
    pub static ref STRIP_BRACES: RewriteRule =
        RewriteRule::fixed("strip-braces", r"\{([^{}]*)\}", "${1}").repeating();

    /// Collapse whitespace runs (rule 13, before trimming).
    pub static ref COLLAPSE_WHITESPACE: RewriteRule =
        RewriteRule::fixed("collapse-whitespace", r"\s+", " ");
}

fn build_rewrite_table() -> Vec<RewriteRule> {
    let mut rules = vec![
        // 1. Error bounds: 0.32_{-0.20}^{+0.22} -> 0.32 (+0.22/-0.20)
        RewriteRule::fixed(
            "error-bound",
            r"([0-9.]+)_\{([^}]+)\}\^\{([^}]+)\}",
            "${1} (${3}/${2})",
        ),
        RewriteRule::fixed(
            "error-bound-bare-lower",
            r"([0-9.]+)_([^}\s^]+)\^\{([^}]+)\}",
            "${1} (${3}/${2})",
        ),
        RewriteRule::fixed(
            "error-bound-bare-upper",
            r"([0-9.]+)_\{([^}]+)\}\^([^}\s]+)",
            "${1} (${3}/${2})",
        ),
        RewriteRule::fixed(
            "error-bound-bare",
            r"([0-9.]+)_([^}\s^]+)\^([^}\s]+)",
            "${1} (${3}/${2})",
        ),
        // 2. Scientific notation
        RewriteRule::fixed(
            "sci-notation",
            r"\\times\s*10\^\{([^}]+)\}",
            " × 10^${1}",
        ),
        RewriteRule::fixed("sci-notation-bare", r"\\times\s*10\^([0-9-]+)", " × 10^${1}"),
        // 3. Math delimiters; $$ first so it is not split into two $ pairs
        RewriteRule::fixed("block-delimiters", r"\$\$([^$]+)\$\$", "${1}"),
        RewriteRule::fixed("inline-delimiters", r"\$([^$]+)\$", "${1}"),
    ];

    // 4. Text formatting commands
    for cmd in TEXT_COMMANDS {
        rules.push(RewriteRule::from_regex(
            format!("text-command-{}", cmd),
            Regex::new(&format!(r"\\{}\{{([^}}]+)\}}", cmd))
                .unwrap_or_else(|e| panic!("bad text command rule {}: {}", cmd, e)),
            Replacement::Template("${1}".to_string()),
        ));
    }

    rules.extend([
        // 5. Sub/superscripts, innermost group first. Bare superscripts (x^2)
        // stay as they are.
        RewriteRule::fixed("subscript-braced", r"([a-zA-Z0-9])_\{([^{}]+)\}", "${1}(${2})")
            .repeating(),
        RewriteRule::fixed("superscript-braced", r"([a-zA-Z0-9])\^\{([^{}]+)\}", "${1}^(${2})")
            .repeating(),
        RewriteRule::fixed("subscript-bare", r"([a-zA-Z0-9])_([a-zA-Z0-9]+)", "${1}(${2})"),
        // 6. Subscripts that carry a +/- interval
        RewriteRule::fixed(
            "interval-subscript",
            r"([a-zA-Z0-9]+)_\{([^}]*-[^}]*\+[^}]*)\}",
            "${1} = ${2}",
        ),
        RewriteRule::fixed(
            "interval-subscript-bare",
            r"([a-zA-Z0-9]+)_([^}\s]*-[^}\s]*\+[^}\s]*)",
            "${1} = ${2}",
        ),
        // 7. Greek letters
        RewriteRule::lookup("greek", r"\\([A-Za-z]+)", &GREEK_LETTERS),
        // 8. Operators with arguments, then plain symbols
        RewriteRule::fixed("sqrt", r"\\sqrt\{([^}]+)\}", "√(${1})"),
        RewriteRule::fixed("frac", r"\\frac\{([^}]+)\}\{([^}]+)\}", "(${1})/(${2})"),
        RewriteRule::fixed("log-base", r"\\log_\{([^}]+)\}", "log_${1}"),
        RewriteRule::lookup("symbols", r"\\([A-Za-z]+)", &MATH_SYMBOLS),
        // 9. Spacing
        RewriteRule::fixed("thin-space", r"\\,", " "),
        RewriteRule::fixed("medium-space", r"\\[;:]", " "),
        RewriteRule::fixed("negative-space", r"\\!", ""),
        RewriteRule::fixed("qquad", r"\\qquad", "  "),
        RewriteRule::fixed("quad", r"\\quad", " "),
        RewriteRule::fixed("escaped-space", r"\\ ", " "),
        // 10. Angle brackets
        RewriteRule::fixed(
            "angle-brackets",
            r"\\langle\s*([^\\]*?)\s*\\rangle",
            "⟨${1}⟩",
        ),
        // 11. Catch-all cleanup. Line breaks go first so `\\foo` is not read
        // as a backslash followed by the command `\foo`.
        RewriteRule::fixed("line-break", r"\\\\", " "),
        RewriteRule::fixed("unknown-command", r"\\[a-zA-Z]+\*?", ""),
    ]);
    rules.push(STRIP_BRACES.clone());

    tracing::debug!(rules = rules.len(), "compiled latex rewrite table");
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static RewriteRule {
        REWRITE_TABLE
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {}", name))
    }

    #[test]
    fn test_table_order_puts_catch_all_last() {
        let names: Vec<&str> = REWRITE_TABLE.iter().map(|r| r.name.as_ref()).collect();
        let greek = names.iter().position(|n| *n == "greek").unwrap();
        let symbols = names.iter().position(|n| *n == "symbols").unwrap();
        let unknown = names.iter().position(|n| *n == "unknown-command").unwrap();
        assert!(greek < symbols);
        assert!(symbols < unknown);
        assert_eq!(names.last(), Some(&"strip-braces"));
    }

    #[test]
    fn test_lookup_leaves_unknown_commands() {
        let out = rule("greek").apply(r"\alpha \foo \alphabet".to_string());
        assert_eq!(out, r"α \foo \alphabet");
    }

    #[test]
    fn test_symbols_match_whole_words_only() {
        let out = rule("symbols").apply(r"a \pm b \pmod c".to_string());
        assert_eq!(out, r"a ± b \pmod c");
    }

    #[test]
    fn test_strip_braces_handles_nesting() {
        assert_eq!(STRIP_BRACES.apply("{{a}b}".to_string()), "ab");
    }

    #[test]
    fn test_nested_subscripts_resolve_inside_out() {
        let out = rule("subscript-braced").apply("x_{a_{b}}".to_string());
        assert_eq!(out, "x(a(b))");
    }

    #[test]
    fn test_text_command_rule() {
        let out = rule("text-command-textbf").apply(r"\textbf{bold} \text{plain}".to_string());
        assert_eq!(out, r"bold \text{plain}");
    }

    #[test]
    fn test_apply_all_is_ordered() {
        let rules = [
            RewriteRule::fixed("a-to-b", "a", "b"),
            RewriteRule::fixed("b-to-c", "b", "c"),
        ];
        assert_eq!(apply_all(&rules, "ab"), "cc");
    }
}
