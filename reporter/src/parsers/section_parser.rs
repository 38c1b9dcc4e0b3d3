//!
//! Section Parser Module
//!
//! Extracts named blocks from the markdown-like text returned by the AI. A section starts at a
//! heading line (`#` to `######` followed by the title) and runs until the next heading of the same
//! or a shallower level, or the end of the text. Deeper headings stay inside the section, which is
//! what lets `### Análise das Competências` carry its `#### Competência N` blocks.
//!
//! Both extractors are total: a missing section yields an empty string (or the name sentinel),
//! never an error.

use crate::types::{NAME_SENTINEL, sections};
use once_cell::sync::Lazy;
use regex::{Regex, escape};
use std::borrow::Cow;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(#{1,6})[ \t]+\S").expect("heading pattern is valid")
});

/// Convert CRLF line endings so the line anchors behave the same on every input.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Extract the body of the section titled `section_title`.
///
/// The title is matched literally and case-sensitively; it may be wrapped in `**` and followed by
/// a colon. Returns the trimmed text between the heading and the next heading of the same or a
/// shallower level, or `""` when no such heading exists.
///
/// # Example
///
/// ```rust
/// use reporter::parsers::section_parser::extract_section;
///
/// let text = "### Nota Estimada\n880\n### Comentários Gerais\nBom texto.";
/// assert_eq!(extract_section(text, "Nota Estimada"), "880");
/// assert_eq!(extract_section(text, "Alerta de Originalidade"), "");
/// ```
pub fn extract_section(full_text: &str, section_title: &str) -> String {
    let title = section_title.trim();
    if title.is_empty() {
        return String::new();
    }

    let text = normalize_newlines(full_text);
    let pattern = format!(
        r"(?m)^[ \t]*(#{{1,6}})[ \t]+(?:\*\*)?{}(?:\*\*)?[ \t]*:?[ \t]*$",
        escape(title)
    );
    let Ok(title_re) = Regex::new(&pattern) else {
        return String::new();
    };

    let Some(caps) = title_re.captures(&text) else {
        return String::new();
    };
    let level = caps.get(1).map(|m| m.as_str().len()).unwrap_or(1);
    let body_start = caps.get(0).map(|m| m.end()).unwrap_or(0);

    let body_end = HEADING_RE
        .captures_iter(&text[body_start..])
        .filter(|c| c.get(1).map(|m| m.as_str().len() <= level).unwrap_or(false))
        .filter_map(|c| c.get(0).map(|m| body_start + m.start()))
        .next()
        .unwrap_or(text.len());

    text[body_start..body_end].trim().to_string()
}

/// Extract the student's name from the `Nome do Aluno` section.
///
/// Returns the first non-empty line of the section (bold markers stripped), or
/// [`NAME_SENTINEL`] when the section is absent or blank.
pub fn extract_student_name(full_text: &str) -> String {
    extract_section(full_text, sections::STUDENT_NAME)
        .lines()
        .map(|line| line.trim().trim_matches('*').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NAME_SENTINEL.to_string())
}
