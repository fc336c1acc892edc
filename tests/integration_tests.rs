//! Integration tests for the Better Papers text pipeline

use better_papers::{
    clean_math_fallback, format_error_bounds, normalize, normalize_all, render_segments, segment,
    segment_with, utils::residue_metrics, Normalizer, NormalizerConfig, PlainTextRenderer,
    RenderError, Rendered, Segment, SegmentKind,
};
use pretty_assertions::assert_eq;

/// Titles and abstract fragments in the shape the listing backend serves.
const CORPUS: &[&str] = &[
    r"The result $E=mc^2$ is famous",
    r"Constraints on $x_{HI}$ from \textit{Lyman}-$\alpha$ forests",
    r"We measure $0.32_{-0.20}^{+0.22}$ at $z \sim 7$.",
    r"A $3 \times 10^{-5}$ bound on $\langle \sigma v \rangle$",
    r"$$\frac{1}{2}$$ of the \emph{baryons}",
    r"Scaling of $\sqrt{N}$ with $T_{eff}$",
    r"Rate $\propto \frac{1}{r}$ here",
    "Plain title with no markup",
];

/// Markup where one rule exposes work for another: brace-wrapped bases,
/// nested subscripts, old-style font switches and uneven `$` runs.
const EXPOSED_MARKUP: &[&str] = &[
    "{x}_{max}",
    "{T}_{eff}",
    "x_{a_{b}}",
    r"{\rm H}_2",
    "a $$b$ c$$ d",
    r"Mass of $\mathrm{M}_{\odot}$ stars",
    r"velocity {\rm km\,s^{-1}} and {\rm H}_{\alpha}",
    r"The ${T}_{eff}$ of $x_{a_{b}}$ systems",
];

// ============================================================================
// Normalizer
// ============================================================================

mod normalizer {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_greek_letters() {
        assert_eq!(normalize(r"\alpha + \beta"), "α + β");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(normalize(r"\frac{1}{2}"), "(1)/(2)");
    }

    #[test]
    fn test_error_bounds() {
        assert_eq!(normalize("0.32_{-0.20}^{+0.22}"), "0.32 (+0.22/-0.20)");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(normalize(r"3 \times 10^{-5}"), "3 × 10^-5");
    }

    #[test]
    fn test_block_delimiters_leave_no_dollars() {
        assert_eq!(normalize("$$a$$"), "a");
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(normalize(r"\langle \sigma v \rangle"), "⟨σ v⟩");
    }

    #[test]
    fn test_idempotent_over_corpus() {
        for text in CORPUS {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "input: {}", text);
        }
    }

    #[test]
    fn test_idempotent_when_rules_expose_markup() {
        for text in CORPUS.iter().chain(EXPOSED_MARKUP) {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "input: {}", text);
        }
    }

    #[test]
    fn test_exposed_markup_is_cleaned_in_one_call() {
        assert_eq!(normalize("{x}_{max}"), "x(max)");
        assert_eq!(normalize("{T}_{eff}"), "T(eff)");
        assert_eq!(normalize("x_{a_{b}}"), "x(a(b))");
        assert_eq!(normalize(r"{\rm H}_2"), "H(2)");
        assert_eq!(normalize("a $$b$ c$$ d"), "a b c$ d");
        assert_eq!(normalize(r"Mass of $\mathrm{M}_{\odot}$ stars"), "Mass of M(⊙) stars");
    }

    #[test]
    fn test_corpus_leaves_no_markup() {
        for text in CORPUS {
            let cleaned = normalize(text);
            let metrics = residue_metrics(&cleaned);
            assert!(metrics.is_clean(), "{:?} left {:?}", cleaned, metrics);
        }
    }

    #[test]
    fn test_normalize_all_matches_single_calls() {
        let all = normalize_all(CORPUS.iter().copied());
        let single: Vec<String> = CORPUS.iter().map(|t| normalize(t)).collect();
        assert_eq!(all, single);
    }

    #[test]
    fn test_normalizer_is_shareable_across_threads() {
        let normalizer = Normalizer::new();
        let shared = &normalizer;
        let results: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = CORPUS
                .iter()
                .map(|text| s.spawn(move || shared.normalize(text)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });
        assert_eq!(results, normalize_all(CORPUS.iter().copied()));
    }
}

// ============================================================================
// Segmenter
// ============================================================================

mod segmenter {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_math_between_text() {
        assert_eq!(
            segment("The result $E=mc^2$ is famous"),
            vec![
                Segment::plain("The result"),
                Segment::inline_math("E=mc^2"),
                Segment::plain("is famous"),
            ]
        );
    }

    #[test]
    fn test_text_without_dollars_is_one_plain_segment() {
        let text = r"Scaling of \sqrt{N} with \alpha";
        assert_eq!(segment(text), vec![Segment::plain(normalize(text))]);
    }

    #[test]
    fn test_block_then_inline() {
        assert_eq!(
            segment("$$a$$ and $b$"),
            vec![
                Segment::block_math("a"),
                Segment::plain("and"),
                Segment::inline_math("b"),
            ]
        );
    }

    #[test]
    fn test_math_segments_keep_raw_source() {
        for text in CORPUS {
            for seg in segment(text).iter().filter(|s| s.is_math()) {
                assert!(
                    text.contains(&seg.content),
                    "{:?} is not a substring of {:?}",
                    seg.content,
                    text
                );
            }
        }
    }

    #[test]
    fn test_no_empty_segments() {
        for text in CORPUS {
            for seg in segment(text) {
                assert!(!seg.content.trim().is_empty(), "empty segment in {:?}", text);
            }
        }
    }

    #[test]
    fn test_plain_segments_are_normalized() {
        for text in CORPUS.iter().chain(EXPOSED_MARKUP) {
            for seg in segment(text).iter().filter(|s| s.kind == SegmentKind::PlainText) {
                assert_eq!(normalize(&seg.content), seg.content);
            }
        }
    }

    #[test]
    fn test_segments_serialize_for_the_front_end() {
        let json = serde_json::to_value(segment("see $x$")).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"kind": "plain-text", "content": "see"},
                {"kind": "inline-math", "content": "x"},
            ])
        );
    }
}

// ============================================================================
// Error bounds and fallback
// ============================================================================

mod bounds_and_fallback {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_error_bounds() {
        assert_eq!(format_error_bounds("0.5(-0.1)^+0.2"), "0.5 (+0.2/-0.1)");
    }

    #[test]
    fn test_fallback_keeps_command_names() {
        assert_eq!(clean_math_fallback(r"$\mathrm{H}_{2}$"), "mathrmH_2");
    }
}

// ============================================================================
// Rendering
// ============================================================================

mod rendering {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failing_renderer_falls_back_once() {
        let reject_display = |_: &str, display: bool| {
            if display {
                Err(RenderError::new("display math disabled"))
            } else {
                Ok("ok".to_string())
            }
        };
        let out = render_segments(&segment(r"$$\frac{1}{2}$$ of $x$"), &reject_display);
        assert_eq!(out.report.len(), 1);
        assert_eq!(
            out.parts[0],
            Rendered::Fallback {
                text: "frac12".to_string()
            }
        );
        assert_eq!(
            out.parts[2],
            Rendered::Math {
                markup: "ok".to_string(),
                display: false
            }
        );
    }

    #[test]
    fn test_plain_text_renderer_agrees_with_normalize() {
        let text = r"Rate $\propto \frac{1}{r}$ here";
        let out = render_segments(&segment(text), &PlainTextRenderer);
        assert!(out.report.is_empty());
        assert_eq!(out.to_plain_text(), normalize(text));
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[cfg(feature = "config")]
mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configured_exception_runs_after_builtins() {
        let config = NormalizerConfig::from_toml_str(
            r#"
            [[exceptions]]
            find = "x(HI)"
            replace = "neutral fraction"
            "#,
        )
        .unwrap();
        let normalizer = Normalizer::with_config(&config).unwrap();
        assert_eq!(normalizer.normalize("the $x_{HI}$ history"), "the neutral fraction history");
        assert_eq!(normalize("the $x_{HI}$ history"), "the x(HI) history");
        assert_eq!(normalizer.exceptions().len(), 8);
    }

    #[test]
    fn test_configured_normalizer_drives_segmenter() {
        let config = NormalizerConfig::from_toml_str(
            r#"
            [[exceptions]]
            find = "dark matter"
            replace = "DM"
            "#,
        )
        .unwrap();
        let normalizer = Normalizer::with_config(&config).unwrap();
        assert_eq!(
            segment_with(&normalizer, "dark matter and $x$"),
            vec![Segment::plain("DM and"), Segment::inline_math("x")]
        );
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let config = NormalizerConfig::from_toml_str(
            r#"
            [[exceptions]]
            find = "(unclosed"
            replace = ""
            regex = true
            "#,
        )
        .unwrap();
        assert!(Normalizer::with_config(&config).is_err());
    }
}
