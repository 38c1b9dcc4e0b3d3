//! # AI Library
//!
//! External collaborators of the essay correction service: the [`analyzer::EssayAnalyzer`] trait,
//! its Gemini implementation, prompt loading and optional image pre-processing.

pub mod analyzer;
pub mod error;
pub mod gemini;
pub mod preprocess;
pub mod prompt;

pub use analyzer::EssayAnalyzer;
pub use error::{AiError, AiResult};
pub use gemini::GeminiAnalyzer;
pub use preprocess::{mime_for_path, preprocess_image, sniff_mime};
pub use prompt::PromptTemplate;
