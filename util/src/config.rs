//! Application configuration.
//!
//! `AppConfig` contains the runtime configuration values loaded from `.env`
//! and environment variables. It is constructed once at startup and passed
//! explicitly to the components that need it (the AI client, the report
//! builder, the HTTP state and the batch runner). There is no global instance.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Errors raised while reading configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown report strategy '{0}' (expected 'generative' or 'template')")]
    UnknownStrategy(String),
}

/// Which document-construction strategy the report builder uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Build the document from primitives.
    Generative,
    /// Fill the placeholders of a pre-authored `.docx` template.
    Template,
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generative" => Ok(StrategyKind::Generative),
            "template" | "template-fill" | "template_fill" => Ok(StrategyKind::Template),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Represents the complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    pub prompt_path: PathBuf,
    pub report_strategy: StrategyKind,
    pub template_path: PathBuf,
    pub preprocess_images: bool,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".into(),
            project_name: "corretor-redacao".into(),
            log_level: "info".into(),
            log_file: "corretor.log".into(),
            log_to_stdout: false,
            host: "127.0.0.1".into(),
            port: 3000,
            gemini_api_key: String::new(),
            gemini_model: "gemini-1.5-pro-latest".into(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
            gemini_timeout_secs: 120,
            prompt_path: PathBuf::from("prompt.txt"),
            report_strategy: StrategyKind::Generative,
            template_path: PathBuf::from("template.docx"),
            preprocess_images: false,
            input_dir: PathBuf::from("redacoes"),
            output_dir: PathBuf::from("correcoes"),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset keys take their default. Numeric or boolean values that fail to
    /// parse also fall back to the default, with a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let string = |key: &str, default: String| lookup(key).unwrap_or(default);
        let path = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        let report_strategy = match lookup("REPORT_STRATEGY") {
            Some(raw) => raw.parse()?,
            None => defaults.report_strategy,
        };

        Ok(Self {
            env: string("APP_ENV", defaults.env),
            project_name: string("PROJECT_NAME", defaults.project_name),
            log_level: string("LOG_LEVEL", defaults.log_level),
            log_file: string("LOG_FILE", defaults.log_file),
            log_to_stdout: parse_or(&lookup, "LOG_TO_STDOUT", defaults.log_to_stdout),
            host: string("HOST", defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            gemini_api_key: string("GEMINI_API_KEY", defaults.gemini_api_key),
            gemini_model: string("GEMINI_MODEL", defaults.gemini_model),
            gemini_base_url: string("GEMINI_BASE_URL", defaults.gemini_base_url),
            gemini_timeout_secs: parse_or(&lookup, "GEMINI_TIMEOUT_SECS", defaults.gemini_timeout_secs),
            prompt_path: path("PROMPT_PATH", defaults.prompt_path),
            report_strategy,
            template_path: path("REPORT_TEMPLATE_PATH", defaults.template_path),
            preprocess_images: parse_or(&lookup, "PREPROCESS_IMAGES", defaults.preprocess_images),
            input_dir: path("BATCH_INPUT_DIR", defaults.input_dir),
            output_dir: path("BATCH_OUTPUT_DIR", defaults.output_dir),
        })
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "invalid configuration value, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.report_strategy, StrategyKind::Generative);
        assert_eq!(cfg.template_path, PathBuf::from("template.docx"));
        assert!(!cfg.preprocess_images);
        assert!(!cfg.is_production());
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("REPORT_STRATEGY", "template"),
            ("REPORT_TEMPLATE_PATH", "modelos/base.docx"),
            ("GEMINI_API_KEY", "abc"),
            ("LOG_TO_STDOUT", "true"),
            ("APP_ENV", "Production"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.report_strategy, StrategyKind::Template);
        assert_eq!(cfg.template_path, PathBuf::from("modelos/base.docx"));
        assert_eq!(cfg.gemini_api_key, "abc");
        assert!(cfg.log_to_stdout);
        assert!(cfg.is_production());
    }

    #[test]
    fn invalid_number_falls_back_to_default() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")])).unwrap();
        assert_eq!(cfg.port, 3000);
    }

    #[test]
    fn unknown_strategy_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("REPORT_STRATEGY", "pdf")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy(s) if s == "pdf"));
    }

    #[test]
    fn strategy_aliases_parse() {
        assert_eq!("Template-Fill".parse::<StrategyKind>().unwrap(), StrategyKind::Template);
        assert_eq!(" generative ".parse::<StrategyKind>().unwrap(), StrategyKind::Generative);
    }
}
