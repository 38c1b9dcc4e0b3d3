//! Template-fill layout: placeholders of a pre-authored `.docx` are replaced with the parsed fields.
//!
//! | Token | Value |
//! |---|---|
//! | `{{NOME_ALUNO}}` | student name, empty when none was found |
//! | `{{TEMA}}`, `{{DATA}}` | topic and date sections |
//! | `{{COMENTARIOS}}` | general comments |
//! | `{{NOTA_FINAL}}` | estimated overall score |
//! | `{{ALERTA_ORIGINALIDADE}}` | originality alert |
//! | `{{NOTA_C1}}`..`{{NOTA_C5}}` | per-criterion score, empty when the criterion is missing |
//! | `{{ANALISE_C1}}`..`{{ANALISE_C5}}` | per-criterion analysis |
//!
//! The template is read from disk on every render so it can be edited while the service runs.

use crate::docx::template::{Substitutions, fill_template};
use crate::error::{ReportError, ReportResult};
use crate::traits::strategy::DocumentStrategy;
use crate::types::{MAX_CRITERIA, StructuredAnalysis, sections};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const ALERT_PLACEHOLDER: &str = "{{ALERTA_ORIGINALIDADE}}";

#[derive(Debug, Clone)]
pub struct TemplateFillStrategy {
    template_path: PathBuf,
}

impl TemplateFillStrategy {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn load_template(&self) -> ReportResult<Vec<u8>> {
        std::fs::read(&self.template_path).map_err(|e| {
            let path = self.template_path.display().to_string();
            if e.kind() == ErrorKind::NotFound {
                ReportError::TemplateNotFound(path)
            } else {
                ReportError::Construction(format!("failed to read template {path}: {e}"))
            }
        })
    }
}

impl DocumentStrategy for TemplateFillStrategy {
    fn name(&self) -> &'static str {
        "template"
    }

    fn render(&self, analysis: &StructuredAnalysis, _raw: &str) -> ReportResult<Vec<u8>> {
        let template = self.load_template()?;

        let remove: &[&str] = if analysis.originality_alert.is_empty() {
            &[sections::ORIGINALITY_ALERT, ALERT_PLACEHOLDER]
        } else {
            &[]
        };

        fill_template(&template, &placeholders(analysis), remove).map_err(|e| match e {
            ReportError::TemplateNotFound(_) | ReportError::Construction(_) => e,
            other => ReportError::Construction(format!(
                "template {}: {other}",
                self.template_path.display()
            )),
        })
    }
}

/// Every placeholder token mapped to its value for `analysis`.
pub fn placeholders(analysis: &StructuredAnalysis) -> Substitutions {
    let mut map = Substitutions::new();
    let mut put = |token: String, value: &str| {
        map.insert(token, value.to_string());
    };

    put("{{NOME_ALUNO}}".into(), analysis.student_name.as_deref().unwrap_or_default());
    put("{{TEMA}}".into(), &analysis.topic);
    put("{{DATA}}".into(), &analysis.date);
    put("{{COMENTARIOS}}".into(), &analysis.general_comments);
    put("{{NOTA_FINAL}}".into(), &analysis.estimated_score);
    put(ALERT_PLACEHOLDER.into(), &analysis.originality_alert);

    for id in 1..=MAX_CRITERIA {
        let criterion = analysis.criterion(id);
        put(
            format!("{{{{NOTA_C{id}}}}}"),
            criterion.map(|c| c.score_text.as_str()).unwrap_or_default(),
        );
        put(
            format!("{{{{ANALISE_C{id}}}}}"),
            criterion.map(|c| c.analysis_text.as_str()).unwrap_or_default(),
        );
    }
    map
}
