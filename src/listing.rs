//! Display preparation for paper listings.

use indexmap::IndexMap;
use papers_model::{Paper, PapersByCategory};
use serde::Serialize;

use crate::core::latex2text::{segment_with, Normalizer, Segment};

/// A paper ready for display: segmented title, plain-text abstract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperView {
    pub title: Vec<Segment>,
    /// The title flattened to plain text, for places that cannot typeset math.
    pub title_text: String,
    pub authors: Vec<String>,
    pub summary: String,
    pub published: String,
    pub link: String,
}

impl PaperView {
    pub fn from_paper(normalizer: &Normalizer, paper: &Paper) -> Self {
        Self {
            title: segment_with(normalizer, &paper.title),
            title_text: normalizer.normalize(&paper.title),
            authors: clean_authors(&paper.authors),
            summary: normalizer.normalize(&paper.summary),
            published: paper.published.clone(),
            link: paper.link.trim().to_string(),
        }
    }
}

fn clean_authors(authors: &[String]) -> Vec<String> {
    authors
        .iter()
        .map(|a| a.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|a| !a.is_empty())
        .collect()
}

pub fn prepare_listing(normalizer: &Normalizer, papers: &[Paper]) -> Vec<PaperView> {
    papers
        .iter()
        .map(|p| PaperView::from_paper(normalizer, p))
        .collect()
}

/// Prepare every category, keeping category order.
pub fn prepare_grouped(
    normalizer: &Normalizer,
    grouped: &PapersByCategory,
) -> IndexMap<String, Vec<PaperView>> {
    grouped
        .iter()
        .map(|(category, papers)| (category.to_string(), prepare_listing(normalizer, papers)))
        .collect()
}
