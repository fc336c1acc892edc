//! Utility modules
//!
//! - Error types and CLI diagnostics
//! - Residue analysis of normalized output

pub mod error;
pub mod residue;

// Re-export commonly used items
pub use error::{CliDiagnostic, DiagnosticSeverity, PapersError, PapersResult};
pub use residue::{residue_diagnostics, residue_metrics, ResidueMetrics};
