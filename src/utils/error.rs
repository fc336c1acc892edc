//! Error handling for Better Papers
//!
//! The text pipeline itself is total; this error type covers the ambient
//! operations around it: loading configuration, compiling configured
//! exception patterns and talking to the paper-listing backend.

use std::fmt;

/// Error type for fallible operations outside the text pipeline
#[derive(Debug, Clone)]
pub enum PapersError {
    /// Configuration could not be read or is malformed
    Config { message: String },
    /// A configured exception pattern is not a valid regex
    InvalidPattern { pattern: String, message: String },
    /// IO error (config files, CLI input/output)
    Io { message: String },
    /// Transport-level HTTP failure
    Http { message: String },
    /// The backend answered with a non-success status
    Status { status: u16, url: String },
    /// The backend answered with a body we could not decode
    Decode { message: String },
}

impl fmt::Display for PapersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PapersError::Config { message } => write!(f, "Config error: {}", message),
            PapersError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid exception pattern '{}': {}", pattern, message)
            }
            PapersError::Io { message } => write!(f, "IO error: {}", message),
            PapersError::Http { message } => write!(f, "HTTP error: {}", message),
            PapersError::Status { status, url } => {
                write!(f, "HTTP error! status: {} ({})", status, url)
            }
            PapersError::Decode { message } => write!(f, "Decode error: {}", message),
        }
    }
}

impl std::error::Error for PapersError {}

impl From<std::io::Error> for PapersError {
    fn from(err: std::io::Error) -> Self {
        PapersError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PapersError {
    fn from(err: serde_json::Error) -> Self {
        PapersError::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "config")]
impl From<toml::de::Error> for PapersError {
    fn from(err: toml::de::Error) -> Self {
        PapersError::Config {
            message: err.to_string(),
        }
    }
}

impl From<PapersError> for std::io::Error {
    fn from(err: PapersError) -> Self {
        match err {
            PapersError::Io { message } => std::io::Error::new(std::io::ErrorKind::Other, message),
            other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
        }
    }
}

/// Result type for fallible operations
pub type PapersResult<T> = Result<T, PapersError>;

// Convenience constructors for errors
impl PapersError {
    pub fn config(message: impl Into<String>) -> Self {
        PapersError::Config {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        PapersError::Http {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        PapersError::Decode {
            message: message.into(),
        }
    }

    pub fn status(status: u16, url: impl Into<String>) -> Self {
        PapersError::Status {
            status,
            url: url.into(),
        }
    }
}

// =============================================================================
// CLI diagnostics
// =============================================================================

/// Severity level for CLI diagnostics (determines coloring and exit code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Leftover markup that makes the text hard to read, e.g. stray commands
    Error,
    /// Leftover markup that is usually harmless, e.g. a bare underscore
    Warning,
    /// Informational
    Info,
}

/// One line of `check` output.
#[derive(Debug, Clone)]
pub struct CliDiagnostic {
    pub severity: DiagnosticSeverity,
    /// Kind of residue (e.g. "command", "brace")
    pub kind: String,
    pub message: String,
    /// Offending snippet, if any
    pub location: Option<String>,
}

impl CliDiagnostic {
    pub fn new(
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind: kind.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// ANSI color code for this diagnostic's severity.
    pub fn color_code(&self) -> &'static str {
        match self.severity {
            DiagnosticSeverity::Error => "\x1b[31m",   // red
            DiagnosticSeverity::Warning => "\x1b[33m", // yellow
            DiagnosticSeverity::Info => "\x1b[36m",    // cyan
        }
    }
}

impl fmt::Display for CliDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}
