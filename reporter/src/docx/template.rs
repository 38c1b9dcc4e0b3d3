//! Placeholder substitution inside an existing `.docx`.
//!
//! The template is rewritten part by part: the main document, headers and footers are parsed and
//! edited, every other part is copied through unchanged.
//!
//! # Algorithm
//!
//! For each text part:
//!
//! 1. Paragraphs whose text contains one of the removal markers are deleted, at any depth (table
//!    cells, text boxes). A table cell left without paragraphs gets an empty one, since Word refuses
//!    to open a `w:tc` without a block.
//! 2. Tokens are replaced run by run, in a single pass: text coming from a value is never
//!    substituted again.
//! 3. If a token only appears once the runs are concatenated (Word splits text into runs at
//!    arbitrary points, e.g. after a spell check), the original paragraph text is substituted as a
//!    whole and stored in its first `w:t`. The formatting of the first run wins.
//! 4. Line feeds in the substituted text become `w:br`.

use crate::docx::text::{DOCUMENT_PART, paragraph_text};
use crate::docx::writer::{package, text_with_breaks};
use crate::docx::xml::{XmlDocument, XmlElement, XmlNode};
use crate::error::{ReportError, ReportResult};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Token (including its delimiters) to replacement value.
pub type Substitutions = BTreeMap<String, String>;

/// Fill `template` and return the bytes of the new package.
///
/// # Arguments
///
/// * `template` - Bytes of the `.docx` template.
/// * `substitutions` - Tokens to replace, e.g. `{{NOME_ALUNO}}`.
/// * `remove_containing` - Paragraphs whose text contains any of these strings are removed before
///   substitution. Empty strings are ignored.
///
/// # Errors
///
/// * [`ReportError::Package`] if the bytes are not a zip archive.
/// * [`ReportError::Construction`] if the archive has no `word/document.xml`.
/// * [`ReportError::Xml`] if a text part is not well-formed.
pub fn fill_template(
    template: &[u8],
    substitutions: &Substitutions,
    remove_containing: &[&str],
) -> ReportResult<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    if !archive.file_names().any(|name| name == DOCUMENT_PART) {
        return Err(ReportError::Construction(format!(
            "template has no {DOCUMENT_PART}"
        )));
    }

    let markers: Vec<&str> = remove_containing
        .iter()
        .copied()
        .filter(|m| !m.is_empty())
        .collect();

    let mut parts: Vec<(String, Vec<u8>)> = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| ReportError::Package(format!("{name}: {e}")))?;

        if is_text_part(&name) {
            content = fill_part(&name, &content, substitutions, &markers)?;
        }
        parts.push((name, content));
    }

    let borrowed: Vec<(&str, &[u8])> = parts
        .iter()
        .map(|(name, content)| (name.as_str(), content.as_slice()))
        .collect();
    package(&borrowed)
}

fn is_text_part(name: &str) -> bool {
    name == DOCUMENT_PART
        || ((name.starts_with("word/header") || name.starts_with("word/footer"))
            && name.ends_with(".xml"))
}

fn fill_part(
    name: &str,
    content: &[u8],
    substitutions: &Substitutions,
    markers: &[&str],
) -> ReportResult<Vec<u8>> {
    let xml = std::str::from_utf8(content)
        .map_err(|e| ReportError::Xml(format!("{name} is not UTF-8: {e}")))?;
    let mut document = XmlDocument::parse(xml)?;

    if !markers.is_empty() {
        let removed = remove_paragraphs(&mut document.root, markers);
        if removed > 0 {
            tracing::debug!(part = name, removed, "removed template paragraphs");
        }
    }
    substitute(&mut document.root, substitutions);
    expand_line_breaks(&mut document.root);

    Ok(document.to_xml_string().into_bytes())
}

/// Remove every paragraph below `element` whose text contains a marker. Returns how many went.
pub fn remove_paragraphs(element: &mut XmlElement, markers: &[&str]) -> usize {
    let before = element.children.len();
    element.children.retain(|child| match child {
        XmlNode::Element(e) if e.is("w:p") => {
            let text = paragraph_text(e);
            !markers.iter().any(|m| text.contains(m))
        }
        _ => true,
    });
    let mut removed = before - element.children.len();

    for child in element.elements_mut() {
        removed += remove_paragraphs(child, markers);
    }

    if element.is("w:tc") && !element.elements().any(|e| e.is("w:p")) {
        element.push(XmlElement::new("w:p"));
    }
    removed
}

/// Replace tokens in every paragraph below `element`.
pub fn substitute(element: &mut XmlElement, substitutions: &Substitutions) {
    for child in element.elements_mut() {
        if child.is("w:p") {
            substitute_paragraph(child, substitutions);
        }
        substitute(child, substitutions);
    }
}

fn substitute_paragraph(paragraph: &mut XmlElement, substitutions: &Substitutions) {
    let mut texts = Vec::new();
    collect_texts(paragraph, &mut texts);

    let originals: Vec<String> = texts.iter().map(|t| t.text()).collect();
    let per_run: Vec<String> = originals
        .iter()
        .map(|text| replace_tokens(text, substitutions))
        .collect();

    // Both passes work on the template text only, never on values already substituted.
    let whole = replace_tokens(&originals.concat(), substitutions);
    if whole == per_run.concat() {
        for ((t, original), replaced) in texts.into_iter().zip(&originals).zip(per_run) {
            if &replaced != original {
                set_preserved_text(t, replaced);
            }
        }
        return;
    }

    let mut iter = texts.into_iter();
    if let Some(first) = iter.next() {
        set_preserved_text(first, whole);
    }
    for rest in iter {
        rest.set_text("");
    }
}

/// `w:t` elements of a paragraph, in order, excluding nested paragraphs.
fn collect_texts<'a>(element: &'a mut XmlElement, out: &mut Vec<&'a mut XmlElement>) {
    for child in element.elements_mut() {
        if child.is("w:t") {
            out.push(child);
        } else if !child.is("w:p") {
            collect_texts(child, out);
        }
    }
}

/// Single left-to-right pass: replacement values are copied out as-is and never scanned again.
/// At a given position the longest token wins.
fn replace_tokens(text: &str, substitutions: &Substitutions) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let next = substitutions
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .filter_map(|(token, value)| rest.find(token.as_str()).map(|at| (at, token.len(), value)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        match next {
            Some((at, len, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + len..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

fn set_preserved_text(t: &mut XmlElement, text: String) {
    t.set_attr("xml:space", "preserve");
    t.set_text(text);
}

fn expand_line_breaks(element: &mut XmlElement) {
    let children = std::mem::take(&mut element.children);
    for child in children {
        match child {
            XmlNode::Element(e) if e.is("w:t") && e.text().contains('\n') => {
                for part in text_with_breaks(&e.text()) {
                    element.push(part);
                }
            }
            XmlNode::Element(mut e) => {
                expand_line_breaks(&mut e);
                element.children.push(XmlNode::Element(e));
            }
            other => element.children.push(other),
        }
    }
}
