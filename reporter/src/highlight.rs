//! Span highlighting of flagged excerpts.
//!
//! Matching is done on normalised text (whitespace runs collapsed, trimmed, lowercased) so that an
//! excerpt copied by the AI with different spacing or capitalisation still matches the
//! transcription. Highlighting itself works at run granularity: when no single run contains the
//! excerpt verbatim the whole paragraph is highlighted. Marking only the matched words would
//! require splitting runs and is not done.

use crate::docx::model::{HighlightColor, Paragraph};

/// Collapse whitespace runs to a single space, trim and lowercase.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Highlight `excerpt` inside `paragraph` with `color`.
///
/// # Returns
///
/// `true` when the normalised excerpt occurs in the normalised paragraph text and a highlight was
/// applied, `false` otherwise (including for a blank excerpt). A miss leaves the paragraph untouched.
pub fn highlight(paragraph: &mut Paragraph, excerpt: &str, color: HighlightColor) -> bool {
    let needle = normalize(excerpt);
    if needle.is_empty() || !normalize(&paragraph.text()).contains(&needle) {
        return false;
    }

    let raw = excerpt.trim();
    let mut exact = false;
    for run in paragraph.runs.iter_mut().filter(|r| r.text.contains(raw)) {
        run.highlight = Some(color);
        exact = true;
    }

    if !exact {
        for run in paragraph.runs.iter_mut() {
            run.highlight = Some(color);
        }
    }
    true
}
