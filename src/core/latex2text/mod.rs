//! LaTeX to readable text
//!
//! Two entry points share one rule table:
//! - [`segment`] splits text into plain and math segments for callers that can
//!   typeset math;
//! - [`normalize`] flattens everything to plain text for callers that cannot.
//!
//! [`format_error_bounds`] and [`clean_math_fallback`] cover the two narrower
//! inputs: partially cleaned error-bound residues, and math spans whose
//! typesetting failed.

pub mod bounds;
pub mod fallback;
pub mod normalize;
pub mod rules;
pub mod segment;
pub mod symbols;

pub use bounds::format_error_bounds;
pub use fallback::clean_math_fallback;
pub use normalize::{normalize, ExceptionTable, Normalizer};
pub use rules::{Replacement, RewriteRule};
pub use segment::{segment, segment_with, Segment, SegmentKind};
