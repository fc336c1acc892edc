//! WASM bindings for better-papers
//!
//! This module provides JavaScript-accessible functions for the paper list
//! front end: LaTeX cleanup of titles and abstracts, math segmentation for a
//! KaTeX-style typesetter, and error-bound formatting.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

/// Result of preparing a paper (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct PrepareResult {
    /// The prepared view, absent on failure
    pub view: Option<serde_json::Value>,
    /// Whether preparation succeeded
    pub success: bool,
    /// Error message if the input could not be read as a paper
    pub error: Option<String>,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
#[cfg(feature = "wasm")]
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = PrepareResult {
            view: None,
            success: false,
            error: Some(format!("Serialization error: {}", e)),
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Flatten LaTeX markup in a title or abstract to readable text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "cleanLatexText")]
pub fn clean_latex_text_wasm(input: &str) -> String {
    crate::normalize(input)
}

/// Split text into `{kind, content}` segments
///
/// Math segments keep their raw source for the page's math typesetter;
/// plain segments are already cleaned.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "segmentLatex")]
pub fn segment_latex_wasm(input: &str) -> JsValue {
    to_js_value(&crate::segment(input))
}

/// Readable fallback for a math span the typesetter rejected
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "cleanMathFallback")]
pub fn clean_math_fallback_wasm(input: &str) -> String {
    crate::clean_math_fallback(input)
}

/// Format error-bound residues like `0.5(-0.1)^+0.2`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "formatErrorBounds")]
pub fn format_error_bounds_wasm(input: &str) -> String {
    crate::format_error_bounds(input)
}

/// Prepare one paper record (`{title, authors, summary, published, link}`)
/// for display
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "preparePaper")]
pub fn prepare_paper_wasm(paper: JsValue) -> JsValue {
    let result = match serde_wasm_bindgen::from_value::<papers_model::Paper>(paper) {
        Ok(paper) => {
            let view = crate::PaperView::from_paper(&crate::Normalizer::new(), &paper);
            match serde_json::to_value(&view) {
                Ok(value) => PrepareResult {
                    view: Some(value),
                    success: true,
                    error: None,
                },
                Err(e) => PrepareResult {
                    view: None,
                    success: false,
                    error: Some(format!("Serialization error: {}", e)),
                },
            }
        }
        Err(e) => PrepareResult {
            view: None,
            success: false,
            error: Some(format!("Invalid paper: {}", e)),
        },
    };
    to_js_value(&result)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
