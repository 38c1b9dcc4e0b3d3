//! # Types Module
//!
//! This module defines the structured form of an AI essay analysis. A [`StructuredAnalysis`] is built
//! once per AI response by [`crate::parsers::analysis_parser::parse_analysis`], consumed by the report
//! builder and then dropped.

use serde::Serialize;

/// Returned by the student-name extractor when no name could be found.
pub const NAME_SENTINEL: &str = "Nome_Nao_Identificado";

/// Highest criterion id of the rubric (criteria are numbered `1..=MAX_CRITERIA`).
pub const MAX_CRITERIA: u8 = 5;

/// Section headings used by the AI response convention.
pub mod sections {
    pub const STUDENT_NAME: &str = "Nome do Aluno";
    pub const TOPIC: &str = "Tema da Redação";
    pub const DATE: &str = "Data da Redação";
    pub const TRANSCRIPTION: &str = "Transcrição da Redação";
    pub const COMPETENCIES: &str = "Análise das Competências";
    pub const ESTIMATED_SCORE: &str = "Nota Estimada";
    pub const ORIGINALITY_ALERT: &str = "Alerta de Originalidade";
    pub const GENERAL_COMMENTS: &str = "Comentários Gerais";
}

/// The result extracted for a single grading criterion (competência).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriterionResult {
    /// Criterion number, always within `1..=5`.
    pub id: u8,
    /// Score text exactly as written by the AI (e.g. `160/200`).
    pub score_text: String,
    /// Free-text analysis; may span several lines.
    pub analysis_text: String,
    /// Excerpts of the essay flagged for this criterion, in document order.
    pub flagged_excerpts: Vec<String>,
}

/// Every field the report needs, extracted from one AI response.
///
/// String fields are empty when the corresponding section is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredAnalysis {
    /// `None` when the response carries no usable student name.
    pub student_name: Option<String>,
    pub topic: String,
    pub date: String,
    pub transcription: String,
    pub general_comments: String,
    pub estimated_score: String,
    pub originality_alert: String,
    /// At most five entries, unique ids, in document order.
    pub criteria: Vec<CriterionResult>,
}

impl StructuredAnalysis {
    /// The student name, or [`NAME_SENTINEL`] when none was found.
    pub fn student_name_or_sentinel(&self) -> &str {
        self.student_name.as_deref().unwrap_or(NAME_SENTINEL)
    }

    pub fn criterion(&self, id: u8) -> Option<&CriterionResult> {
        self.criteria.iter().find(|c| c.id == id)
    }
}
