//! Rendering segments through a math typesetter
//!
//! The typesetter is a collaborator behind [`MathRenderer`]. When it rejects a
//! math span, the span is shown as readable fallback text instead and the
//! failure is recorded in a [`FallbackReport`]; nothing propagates to the
//! caller.

use serde::Serialize;
use std::fmt;

use crate::core::latex2text::{clean_math_fallback, normalize, Segment, SegmentKind};

/// A math typesetter's refusal to render a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "math render error: {}", self.message)
    }
}

impl std::error::Error for RenderError {}

/// Turns raw math source into display markup.
pub trait MathRenderer {
    /// `display` is true for block math (`$$...$$`).
    fn render(&self, source: &str, display: bool) -> Result<String, RenderError>;
}

/// Renders math as normalized plain text. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl MathRenderer for PlainTextRenderer {
    fn render(&self, source: &str, _display: bool) -> Result<String, RenderError> {
        Ok(normalize(source))
    }
}

impl<F> MathRenderer for F
where
    F: Fn(&str, bool) -> Result<String, RenderError>,
{
    fn render(&self, source: &str, display: bool) -> Result<String, RenderError> {
        self(source, display)
    }
}

/// One rendered piece of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Rendered {
    Text { text: String },
    Math { markup: String, display: bool },
    /// Math the renderer rejected, cleaned for reading.
    Fallback { text: String },
}

impl Rendered {
    pub fn as_text(&self) -> &str {
        match self {
            Rendered::Text { text } | Rendered::Fallback { text } => text,
            Rendered::Math { markup, .. } => markup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackRecord {
    pub kind: SegmentKind,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FallbackReport {
    pub fallbacks: Vec<FallbackRecord>,
}

impl FallbackReport {
    pub fn is_empty(&self) -> bool {
        self.fallbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fallbacks.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedOutput {
    pub parts: Vec<Rendered>,
    pub report: FallbackReport,
}

impl RenderedOutput {
    /// Join the parts with single spaces, the way adjacent spans read on a page.
    pub fn to_plain_text(&self) -> String {
        self.parts
            .iter()
            .map(Rendered::as_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render segments, falling back to cleaned text for math the renderer rejects.
pub fn render_segments<R: MathRenderer + ?Sized>(
    segments: &[Segment],
    renderer: &R,
) -> RenderedOutput {
    let mut out = RenderedOutput::default();
    for seg in segments {
        if !seg.is_math() {
            out.parts.push(Rendered::Text {
                text: seg.content.clone(),
            });
            continue;
        }
        let display = seg.kind.is_display();
        match renderer.render(&seg.content, display) {
            Ok(markup) => out.parts.push(Rendered::Math { markup, display }),
            Err(err) => {
                tracing::warn!(source = %seg.content, error = %err, "math rendering failed, using fallback text");
                out.parts.push(Rendered::Fallback {
                    text: clean_math_fallback(&seg.content),
                });
                out.report.fallbacks.push(FallbackRecord {
                    kind: seg.kind,
                    source: seg.content.clone(),
                    message: err.message,
                });
            }
        }
    }
    out
}
