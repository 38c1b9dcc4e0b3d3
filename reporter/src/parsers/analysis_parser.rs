//! Builds a [`StructuredAnalysis`] from a raw AI response by running the section scanner, then the
//! criterion scanner (which itself runs the excerpt scanner).

use crate::parsers::criteria_parser::parse_criteria;
use crate::parsers::section_parser::{extract_section, extract_student_name};
use crate::types::{NAME_SENTINEL, StructuredAnalysis, sections};

/// Parse the raw analysis text.
///
/// Criteria are read from the `Análise das Competências` section when it yields any; otherwise the
/// whole response is scanned, which covers answers where the competency blocks are not nested under
/// that heading.
pub fn parse_analysis(raw: &str) -> StructuredAnalysis {
    let name = extract_student_name(raw);
    let student_name = (name != NAME_SENTINEL).then_some(name);

    let competencies = extract_section(raw, sections::COMPETENCIES);
    let mut criteria = parse_criteria(&competencies);
    if criteria.is_empty() {
        criteria = parse_criteria(raw);
    }

    let analysis = StructuredAnalysis {
        student_name,
        topic: extract_section(raw, sections::TOPIC),
        date: extract_section(raw, sections::DATE),
        transcription: extract_section(raw, sections::TRANSCRIPTION),
        general_comments: extract_section(raw, sections::GENERAL_COMMENTS),
        estimated_score: extract_section(raw, sections::ESTIMATED_SCORE),
        originality_alert: extract_section(raw, sections::ORIGINALITY_ALERT),
        criteria,
    };

    tracing::debug!(
        criteria = analysis.criteria.len(),
        has_name = analysis.student_name.is_some(),
        "parsed AI analysis"
    );
    analysis
}
