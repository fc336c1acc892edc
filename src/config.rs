//! Normalizer configuration
//!
//! The only tunable part of the pipeline is the table of known exceptions.
//! Extra entries come from a TOML file:
//!
//! ```toml
//! [[exceptions]]
//! find = "M(BH)"
//! replace = "M(black hole)"
//!
//! [[exceptions]]
//! find = 'T_([a-z]+)'
//! replace = 'T(${1})'
//! regex = true
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use crate::utils::error::PapersResult;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "BETTER_PAPERS_CONFIG";

/// One extra known-exception entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionEntry {
    pub find: String,
    #[serde(default)]
    pub replace: String,
    /// Treat `find` as a regex and `replace` as a template.
    #[serde(default)]
    pub regex: bool,
}

impl ExceptionEntry {
    /// An exact-string replacement.
    pub fn literal(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            regex: false,
        }
    }

    pub fn pattern(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            regex: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub exceptions: Vec<ExceptionEntry>,
}

impl NormalizerConfig {
    #[cfg(feature = "config")]
    pub fn from_toml_str(source: &str) -> PapersResult<Self> {
        Ok(toml::from_str(source)?)
    }

    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> PapersResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            exceptions = config.exceptions.len(),
            "loaded normalizer config"
        );
        Ok(config)
    }

    /// Load the file named by `BETTER_PAPERS_CONFIG`, or the defaults when
    /// the variable is unset.
    #[cfg(feature = "config")]
    pub fn from_env() -> PapersResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Resolve an explicit path first, then the environment.
    #[cfg(feature = "config")]
    pub fn resolve(explicit: Option<&Path>) -> PapersResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::from_env(),
        }
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;
    use crate::core::latex2text::Normalizer;

    #[test]
    fn test_parse_toml() {
        let config = NormalizerConfig::from_toml_str(
            r#"
            [[exceptions]]
            find = "M(BH)"
            replace = "M(black hole)"

            [[exceptions]]
            find = 'T_([a-z]+)'
            replace = 'T(${1})'
            regex = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.exceptions,
            vec![
                ExceptionEntry::literal("M(BH)", "M(black hole)"),
                ExceptionEntry::pattern("T_([a-z]+)", "T(${1})"),
            ]
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(NormalizerConfig::from_toml_str("").unwrap(), NormalizerConfig::default());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = NormalizerConfig::from_toml_str("exceptions = 3").unwrap_err();
        assert!(err.to_string().starts_with("Config error"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = NormalizerConfig::load("/nonexistent/better-papers.toml").unwrap_err();
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_regex_entry_applies() {
        let config = NormalizerConfig {
            exceptions: vec![ExceptionEntry::pattern(r"\bQ_([a-z]+)", "Q[${1}]")],
        };
        let normalizer = Normalizer::with_config(&config).unwrap();
        // Q_{} survives brace stripping as a bare underscore
        assert_eq!(normalizer.normalize("{Q}_{ab}"), "Q[ab]");
    }
}
