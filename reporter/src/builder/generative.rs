//! Generative layout: the report is composed from paragraphs and runs, no template involved.

use crate::docx::model::{Alignment, Document, Paragraph, ParagraphStyle, Run};
use crate::docx::writer::write_docx;
use crate::error::ReportResult;
use crate::highlight::highlight;
use crate::palette::criterion_color;
use crate::traits::strategy::DocumentStrategy;
use crate::types::{CriterionResult, StructuredAnalysis, sections};

pub const REPORT_TITLE: &str = "Relatório de Correção de Redação";
pub const MARKER_GLYPH: &str = "■";
pub const NO_CRITERIA: &str = "Nenhuma competência foi identificada na resposta.";
pub const NO_SCORE: &str = "Não informada";
pub const NO_COMMENTS: &str = "Nenhum comentário geral foi fornecido.";
pub const SIGNATURE: &str = "Correção gerada automaticamente pelo Corretor de Redação IA.";

const BULLET: &str = "• ";
const SCORE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerativeStrategy;

impl DocumentStrategy for GenerativeStrategy {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn render(&self, analysis: &StructuredAnalysis, _raw: &str) -> ReportResult<Vec<u8>> {
        write_docx(&compose(analysis))
    }
}

/// Lay out the full report for `analysis`.
pub fn compose(analysis: &StructuredAnalysis) -> Document {
    let mut doc = Document::new();
    doc.heading(ParagraphStyle::Title, REPORT_TITLE);

    if let Some(name) = &analysis.student_name {
        doc.push(
            Paragraph::new()
                .align(Alignment::Center)
                .with_run(Run::new("Nome: ").bold().size(14))
                .with_run(Run::new(name.as_str()).size(14)),
        );
    }
    if !analysis.topic.is_empty() {
        doc.push(labelled("Tema: ", &analysis.topic));
    }
    if !analysis.date.is_empty() {
        doc.push(labelled("Data: ", &analysis.date));
    }

    doc.heading(ParagraphStyle::Heading1, sections::COMPETENCIES);
    if analysis.criteria.is_empty() {
        doc.push(Paragraph::plain(NO_CRITERIA));
    }
    for criterion in &analysis.criteria {
        push_criterion(&mut doc, criterion);
    }

    if !analysis.transcription.is_empty() {
        doc.heading(ParagraphStyle::Heading1, sections::TRANSCRIPTION);
        push_transcription(&mut doc, analysis);
    }

    doc.heading(ParagraphStyle::Heading1, sections::ESTIMATED_SCORE);
    let score = if analysis.estimated_score.is_empty() {
        NO_SCORE
    } else {
        analysis.estimated_score.as_str()
    };
    doc.push(Paragraph::new().with_run(Run::new(score).bold().size(SCORE_SIZE)));

    if !analysis.originality_alert.is_empty() {
        doc.heading(ParagraphStyle::Heading1, sections::ORIGINALITY_ALERT);
        doc.push(Paragraph::new().with_run(Run::new(analysis.originality_alert.as_str()).color("C00000")));
    }

    doc.heading(ParagraphStyle::Heading1, sections::GENERAL_COMMENTS);
    if analysis.general_comments.is_empty() {
        doc.push(Paragraph::new().with_run(Run::new(NO_COMMENTS).italic()));
    } else {
        for line in non_empty_lines(&analysis.general_comments) {
            doc.push(Paragraph::plain(strip_markup(line)).align(Alignment::Justify));
        }
    }

    doc.push(
        Paragraph::new()
            .align(Alignment::Right)
            .with_run(Run::new(SIGNATURE).italic().size(9)),
    );
    doc
}

fn labelled(label: &str, value: &str) -> Paragraph {
    Paragraph::new()
        .with_run(Run::new(label).bold())
        .with_run(Run::new(value))
}

/// A list line: bullet glyph, optional bold label.
fn bullet(label: &str) -> Paragraph {
    let p = Paragraph {
        style: ParagraphStyle::ListParagraph,
        ..Paragraph::default()
    }
    .with_run(Run::new(BULLET));
    if label.is_empty() {
        p
    } else {
        p.with_run(Run::new(label).bold())
    }
}

fn push_criterion(doc: &mut Document, criterion: &CriterionResult) {
    let color = criterion_color(criterion.id);
    doc.push(
        Paragraph::new()
            .with_run(Run::new(format!("{MARKER_GLYPH} ")).color(color.hex).size(14))
            .with_run(Run::new(format!("Competência {}", criterion.id)).bold().size(12)),
    );

    if !criterion.score_text.is_empty() {
        doc.push(bullet("Nota estimada: ").with_run(Run::new(criterion.score_text.as_str())));
    }
    for point in non_empty_lines(&criterion.analysis_text) {
        doc.push(bullet("").with_run(Run::new(strip_markup(point))));
    }
    for excerpt in &criterion.flagged_excerpts {
        let mut quoted = Run::new(format!("“{excerpt}”")).italic();
        quoted.highlight = Some(color.highlight);
        doc.push(bullet("Trecho com erro: ").with_run(quoted));
    }
}

/// One paragraph per transcription line, then every flagged excerpt is highlighted with the color of
/// its criterion.
fn push_transcription(doc: &mut Document, analysis: &StructuredAnalysis) {
    let mut paragraphs: Vec<Paragraph> = non_empty_lines(&analysis.transcription)
        .map(|line| Paragraph::plain(line).align(Alignment::Justify))
        .collect();

    for criterion in &analysis.criteria {
        let color = criterion_color(criterion.id).highlight;
        for excerpt in &criterion.flagged_excerpts {
            let mut found = false;
            for paragraph in paragraphs.iter_mut() {
                found |= highlight(paragraph, excerpt, color);
            }
            if !found {
                tracing::debug!(criterion = criterion.id, excerpt = %excerpt, "excerpt not found in transcription");
            }
        }
    }

    doc.paragraphs.extend(paragraphs);
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Leading list markers and bold markers are dropped; the layout provides its own.
fn strip_markup(line: &str) -> String {
    line.trim_start_matches(['-', '*', '+', '•'])
        .trim()
        .replace("**", "")
}
