//! Splitting mixed text into plain-text and math segments
//!
//! Math spans are handed on untouched (minus their `$` delimiters) for a math
//! typesetter; everything between them goes through the normalizer.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::normalize::{Normalizer, DEFAULT_NORMALIZER};

lazy_static! {
    static ref INLINE_MATH: Regex = Regex::new(r"\$([^$\n]+)\$").unwrap();
    static ref BLOCK_MATH: Regex = Regex::new(r"\$\$([^$]+)\$\$").unwrap();
}

/// What a segment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    PlainText,
    InlineMath,
    BlockMath,
}

impl SegmentKind {
    pub fn is_math(self) -> bool {
        !matches!(self, SegmentKind::PlainText)
    }

    /// Display math (`$$...$$`) as opposed to inline.
    pub fn is_display(self) -> bool {
        matches!(self, SegmentKind::BlockMath)
    }
}

/// One unit of segmenter output.
///
/// For [`SegmentKind::PlainText`] the content is already normalized; for the
/// math kinds it is the raw math source without delimiters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
    /// Byte range in the segmented input.
    #[serde(skip)]
    pub(crate) span: Range<usize>,
}

impl Segment {
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(SegmentKind::PlainText, content)
    }

    pub fn inline_math(content: impl Into<String>) -> Self {
        Self::new(SegmentKind::InlineMath, content)
    }

    pub fn block_math(content: impl Into<String>) -> Self {
        Self::new(SegmentKind::BlockMath, content)
    }

    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            span: 0..0,
        }
    }

    fn at(kind: SegmentKind, content: String, span: Range<usize>) -> Self {
        Self {
            kind,
            content,
            span,
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind.is_math()
    }
}

// Source offsets are bookkeeping, not part of a segment's value.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.content == other.content
    }
}

impl Eq for Segment {}

/// A `$...$` or `$$...$$` match.
#[derive(Debug, Clone)]
struct MathMatch {
    kind: SegmentKind,
    span: Range<usize>,
    content: Range<usize>,
}

fn find_math(re: &Regex, kind: SegmentKind, text: &str, from: usize) -> Option<MathMatch> {
    let caps = re.captures_at(text, from)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;
    Some(MathMatch {
        kind,
        span: whole.range(),
        content: inner.range(),
    })
}

/// The next accepted math match at or after `from`.
///
/// Candidates of both kinds compete on start offset; block math wins a tie.
/// Anything starting inside an accepted match is never considered because
/// the search resumes at that match's end.
fn next_math(text: &str, from: usize) -> Option<MathMatch> {
    let block = find_math(&BLOCK_MATH, SegmentKind::BlockMath, text, from);
    let inline = find_math(&INLINE_MATH, SegmentKind::InlineMath, text, from);
    match (block, inline) {
        (Some(b), Some(i)) => {
            if i.span.start < b.span.start {
                Some(i)
            } else {
                Some(b)
            }
        }
        (b, i) => b.or(i),
    }
}

fn push_plain(normalizer: &Normalizer, text: &str, span: Range<usize>, out: &mut Vec<Segment>) {
    let raw = &text[span.clone()];
    if raw.trim().is_empty() {
        return;
    }
    let normalized = normalizer.normalize(raw);
    if normalized.is_empty() {
        return;
    }
    out.push(Segment::at(SegmentKind::PlainText, normalized, span));
}

/// Segment `text` with the given normalizer for plain spans.
pub fn segment_with(normalizer: &Normalizer, text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    if text.is_empty() {
        return segments;
    }

    let mut last = 0;
    while let Some(m) = next_math(text, last) {
        if m.span.start > last {
            push_plain(normalizer, text, last..m.span.start, &mut segments);
        }
        segments.push(Segment::at(
            m.kind,
            text[m.content.clone()].to_string(),
            m.span.clone(),
        ));
        last = m.span.end;
    }
    if last < text.len() {
        push_plain(normalizer, text, last..text.len(), &mut segments);
    }
    segments
}

/// Segment `text` using the built-in normalizer.
pub fn segment(text: &str) -> Vec<Segment> {
    segment_with(&DEFAULT_NORMALIZER, text)
}
