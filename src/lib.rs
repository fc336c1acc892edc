//! # Better Papers
//!
//! Readable research-paper listings: LaTeX cleanup for titles and abstracts,
//! math segmentation for a typesetter, and the display model for papers
//! fetched from the listing backend.
//!
//! ## Quick start
//!
//! ```
//! use better_papers::{normalize, segment, SegmentKind};
//!
//! assert_eq!(normalize(r"\alpha + \beta"), "α + β");
//!
//! let segs = segment("The result $E=mc^2$ is famous");
//! assert_eq!(segs[1].kind, SegmentKind::InlineMath);
//! assert_eq!(segs[1].content, "E=mc^2");
//! ```
//!
//! ## Modules
//!
//! - [`core::latex2text`]: the segmenter, the normalizer and its rule table
//! - [`render`]: the math typesetter seam and its fallback policy
//! - [`listing`]: paper display preparation
//! - [`config`]: extra known-exception entries
//! - `client` (feature `client`): the backend API client

pub mod config;
pub mod core;
pub mod listing;
pub mod render;
pub mod utils;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::latex2text::{
    clean_math_fallback, format_error_bounds, normalize, segment, segment_with, ExceptionTable,
    Normalizer, Segment, SegmentKind,
};
pub use config::{ExceptionEntry, NormalizerConfig};
pub use listing::{prepare_grouped, prepare_listing, PaperView};
pub use papers_model::{
    recent_since, window_start, CategoriesResponse, CategoryResponse, Paper, PapersByCategory,
};
pub use render::{
    render_segments, FallbackRecord, FallbackReport, MathRenderer, PlainTextRenderer, RenderError,
    Rendered, RenderedOutput,
};
pub use utils::error::{PapersError, PapersResult};

/// Normalize many texts. Each call is independent, so callers are free to
/// split the work across threads instead.
pub fn normalize_all<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().map(normalize).collect()
}
