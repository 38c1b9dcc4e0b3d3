//! Minimal document emitted when the configured strategy fails.
//!
//! It carries the failure message and the unparsed AI response so the user still receives the
//! correction, only without formatting.

use crate::docx::model::{Document, Paragraph, ParagraphStyle, Run};
use crate::docx::writer::write_docx;
use crate::error::{ReportError, ReportResult};

pub const FALLBACK_TITLE: &str = "Relatório de Correção (versão simplificada)";
pub const RAW_RESPONSE_HEADING: &str = "Resposta completa da IA";

pub fn fallback_document(error: &ReportError, raw: &str) -> Document {
    let mut doc = Document::new();
    doc.heading(ParagraphStyle::Title, FALLBACK_TITLE);
    doc.push(
        Paragraph::new()
            .with_run(Run::new("Não foi possível montar o relatório formatado: ").bold())
            .with_run(Run::new(error.to_string()).color("C00000")),
    );
    doc.heading(ParagraphStyle::Heading1, RAW_RESPONSE_HEADING);
    doc.push(Paragraph::plain(readable_raw_text(raw)));
    doc
}

/// The raw answer as one paragraph: CRLF and lone CR become line feeds (written as breaks) and
/// other control characters, which XML 1.0 cannot carry, become U+FFFD so nothing vanishes.
fn readable_raw_text(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .chars()
        .map(|c| match c {
            '\r' => '\n',
            '\t' | '\n' => c,
            c if u32::from(c) < 0x20 => char::REPLACEMENT_CHARACTER,
            c => c,
        })
        .collect()
}

pub fn render_fallback(error: &ReportError, raw: &str) -> ReportResult<Vec<u8>> {
    write_docx(&fallback_document(error, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::text::extract_paragraphs;

    #[test]
    fn carries_error_and_raw_text_verbatim() {
        let raw = "### Nome do Aluno\nMaria\n\n### Nota Estimada\n880";
        let err = ReportError::TemplateNotFound("template.docx".into());
        let bytes = render_fallback(&err, raw).unwrap();

        let paragraphs = extract_paragraphs(&bytes).unwrap();
        assert_eq!(paragraphs[0], FALLBACK_TITLE);
        assert!(paragraphs[1].contains("Template not found: template.docx"));
        assert_eq!(paragraphs.last().map(String::as_str), Some(raw));
    }

    #[test]
    fn crlf_input_reads_back_with_line_feeds() {
        let err = ReportError::Construction("x".into());
        let doc = fallback_document(&err, "a\r\nb");
        assert_eq!(doc.paragraphs.last().unwrap().text(), "a\nb");
    }

    #[test]
    fn lone_cr_and_control_characters_stay_visible() {
        let err = ReportError::Construction("x".into());
        let bytes = render_fallback(&err, "a\rb\u{1}c").unwrap();

        let paragraphs = extract_paragraphs(&bytes).unwrap();
        assert_eq!(
            paragraphs.last().map(String::as_str),
            Some("a\nb\u{FFFD}c")
        );
    }
}
