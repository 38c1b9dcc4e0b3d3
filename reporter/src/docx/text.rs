//! Plain-text extraction from `.docx` bytes.
//!
//! Used to inspect generated reports: each `w:p` of `word/document.xml` becomes one string, in
//! document order, including paragraphs inside table cells. `w:br` reads as a line feed and `w:tab`
//! as a tab.

use crate::docx::xml::{XmlDocument, XmlElement};
use crate::error::{ReportError, ReportResult};
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub const DOCUMENT_PART: &str = "word/document.xml";

/// Read the named part of a `.docx` package as UTF-8.
pub fn read_part(docx: &[u8], name: &str) -> ReportResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(docx))?;
    let mut file = archive.by_name(name)?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| ReportError::Package(format!("{name}: {e}")))?;
    Ok(xml)
}

/// Text of every paragraph of the main document part.
pub fn extract_paragraphs(docx: &[u8]) -> ReportResult<Vec<String>> {
    let xml = read_part(docx, DOCUMENT_PART)?;
    let document = XmlDocument::parse(&xml)?;
    let mut paragraphs = Vec::new();
    collect_paragraphs(&document.root, &mut paragraphs);
    Ok(paragraphs)
}

/// All paragraph text of the main document part, one paragraph per line.
pub fn extract_text(docx: &[u8]) -> ReportResult<String> {
    Ok(extract_paragraphs(docx)?.join("\n"))
}

fn collect_paragraphs(element: &XmlElement, out: &mut Vec<String>) {
    for child in element.elements() {
        if child.is("w:p") {
            out.push(paragraph_text(child));
        }
        // Text boxes nest whole paragraphs inside a run.
        collect_paragraphs(child, out);
    }
}

/// Text of a single `w:p`, excluding paragraphs nested inside it.
pub fn paragraph_text(paragraph: &XmlElement) -> String {
    let mut text = String::new();
    push_text(paragraph, &mut text);
    text
}

fn push_text(element: &XmlElement, out: &mut String) {
    for child in element.elements() {
        match child.name.as_str() {
            "w:t" => out.push_str(&child.text()),
            "w:br" | "w:cr" => out.push('\n'),
            "w:tab" => out.push('\t'),
            "w:p" => {}
            _ => push_text(child, out),
        }
    }
}
