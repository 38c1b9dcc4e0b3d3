//! Output file naming.

use chrono::{Local, NaiveDateTime};

const PREFIX: &str = "correcao_";
const EXTENSION: &str = ".docx";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File name for a report: `correcao_<name>.docx`, or a timestamped name when `student_name` is
/// `None` or blank.
pub fn report_file_name(student_name: Option<&str>) -> String {
    report_file_name_at(student_name, Local::now().naive_local())
}

/// Same as [`report_file_name`] with an explicit timestamp.
pub fn report_file_name_at(student_name: Option<&str>, at: NaiveDateTime) -> String {
    match student_name.map(sanitize).filter(|name| !name.is_empty()) {
        Some(name) => format!("{PREFIX}{name}{EXTENSION}"),
        None => format!("{PREFIX}{}{EXTENSION}", at.format(TIMESTAMP_FORMAT)),
    }
}

/// Whitespace and path separators become underscores.
fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    #[test]
    fn uses_the_student_name() {
        assert_eq!(report_file_name_at(Some("Maria Silva"), at()), "correcao_Maria_Silva.docx");
        assert_eq!(report_file_name_at(Some("  João  "), at()), "correcao_João.docx");
    }

    #[test]
    fn path_separators_are_replaced() {
        assert_eq!(report_file_name_at(Some("../a\\b"), at()), "correcao_.._a_b.docx");
    }

    #[test]
    fn falls_back_to_timestamp() {
        assert_eq!(report_file_name_at(None, at()), "correcao_20240309_140507.docx");
        assert_eq!(report_file_name_at(Some("   "), at()), "correcao_20240309_140507.docx");
    }

    #[test]
    fn current_time_variant_has_the_right_shape() {
        let name = report_file_name(None);
        assert!(name.starts_with(PREFIX) && name.ends_with(EXTENSION));
        assert_eq!(name.len(), PREFIX.len() + "YYYYmmdd_HHMMSS".len() + EXTENSION.len());
    }
}
