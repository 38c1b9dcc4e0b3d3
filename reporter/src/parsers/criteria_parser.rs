//!
//! Criteria Parser Module
//!
//! Splits the competency analysis into one block per `Competência N` header and extracts, for each
//! block, the estimated score, the analysis text and the flagged excerpts.
//!
//! # Recognised block layout
//!
//! ```text
//! #### Competência 1: Domínio da norma culta
//! * **Nota estimada:** 160
//! * **Análise:** Poucos desvios gramaticais.
//!   - Concordância verbal
//! * **Trecho com erro:** "os menino correu"
//! ```
//!
//! The header may also be a bullet or a bold label (`**Competência 1 ...**`). Blocks with ids
//! outside `1..=5`, repeated ids and blocks with no recognisable content are skipped silently, so a
//! partially malformed response still yields the criteria that could be read.

use crate::parsers::section_parser::normalize_newlines;
use crate::types::{CriterionResult, MAX_CRITERIA};
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#{1,6}[ \t]+|[-*+][ \t]+)?(?:\*\*)?Compet[êe]ncia[ \t]+(\d+)")
        .expect("block pattern is valid")
});

static SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:[-*+][ \t]+)?\*\*(?i:nota estimada)[ \t]*:?[ \t]*\*\*[ \t]*:?[ \t]*(.*)$")
        .expect("score pattern is valid")
});

static ANALYSIS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:[-*+][ \t]+)?\*\*(?i:análise)[^*\n]*\*\*[ \t]*:?[ \t]*(.*)$")
        .expect("analysis pattern is valid")
});

static LABEL_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(?:[-*+][ \t]+)?\*\*[^*\n]+?(?::\*\*|\*\*[ \t]*:)")
        .expect("label pattern is valid")
});

static HEADING_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*#{1,6}[ \t]+\S").expect("heading pattern is valid"));

static EXCERPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\*\*(?i:trecho com erro)[ \t]*:?[ \t]*\*\*[ \t]*:?[ \t]*["“](.+?)["”]"#)
        .expect("excerpt pattern is valid")
});

/// Excerpt values the prompt template uses as fill-in instructions.
pub const EXCERPT_PLACEHOLDERS: [&str; 4] = [
    "insira aqui o trecho",
    "copie aqui o trecho",
    "insira aqui",
    "copie aqui",
];

/// True when `excerpt` is one of the prompt's fill-in instructions rather than real essay text.
pub fn is_placeholder_excerpt(excerpt: &str) -> bool {
    let candidate = excerpt.trim().to_lowercase();
    EXCERPT_PLACEHOLDERS.iter().any(|p| *p == candidate)
}

/// Parse every `Competência N` block of `text` into a [`CriterionResult`].
///
/// # Returns
///
/// The criteria in document order, at most five, each id unique and within `1..=5`. Text without
/// any block yields an empty vector.
pub fn parse_criteria(text: &str) -> Vec<CriterionResult> {
    let text = normalize_newlines(text);

    let headers: Vec<(usize, Option<u8>)> = BLOCK_RE
        .captures_iter(&text)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let id = caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok());
            Some((start, id))
        })
        .collect();

    let mut criteria: Vec<CriterionResult> = Vec::new();
    for (i, (start, id)) in headers.iter().enumerate() {
        let Some(id) = *id else { continue };
        if !(1..=MAX_CRITERIA).contains(&id) {
            tracing::debug!(id, "skipping criterion outside the rubric range");
            continue;
        }
        if criteria.iter().any(|c| c.id == id) {
            tracing::debug!(id, "skipping repeated criterion block");
            continue;
        }

        let end = headers.get(i + 1).map(|(s, _)| *s).unwrap_or(text.len());
        if let Some(result) = parse_block(id, &text[*start..end]) {
            criteria.push(result);
        }
    }

    criteria
}

/// Parse a single block. The first line is the header itself.
fn parse_block(id: u8, block: &str) -> Option<CriterionResult> {
    let lines: Vec<&str> = block.lines().skip(1).collect();

    let score_text = lines
        .iter()
        .find_map(|line| SCORE_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| clean_value(m.as_str()))
        .unwrap_or_default();

    let analysis_text = analysis_value(&lines);

    let flagged_excerpts: Vec<String> = EXCERPT_RE
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|excerpt| !excerpt.is_empty() && !is_placeholder_excerpt(excerpt))
        .collect();

    if score_text.is_empty() && analysis_text.is_empty() && flagged_excerpts.is_empty() {
        tracing::debug!(id, "criterion block has no recognisable fields");
        return None;
    }

    Some(CriterionResult {
        id,
        score_text,
        analysis_text,
        flagged_excerpts,
    })
}

/// The analysis label's value plus its continuation lines, up to the next bold label.
fn analysis_value(lines: &[&str]) -> String {
    let Some((index, first)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| ANALYSIS_RE.captures(line).map(|caps| (i, caps)))
    else {
        return String::new();
    };

    let mut collected: Vec<&str> = Vec::new();
    if let Some(m) = first.get(1) {
        collected.push(m.as_str());
    }
    collected.extend(
        lines[index + 1..]
            .iter()
            .take_while(|line| !LABEL_LINE_RE.is_match(line) && !HEADING_LINE_RE.is_match(line))
            .copied(),
    );

    let joined = collected
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    clean_value(&joined)
}

fn clean_value(value: &str) -> String {
    value.trim().trim_end_matches("**").trim().to_string()
}
