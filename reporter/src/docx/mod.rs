//! # docx
//!
//! Minimal WordprocessingML support: an owned XML tree ([`xml`]), a paragraph/run document model
//! ([`model`]), a package writer ([`writer`]), placeholder substitution in existing packages
//! ([`template`]) and plain-text extraction ([`text`]).

pub mod model;
pub mod template;
pub mod text;
pub mod writer;
pub mod xml;

pub use model::{Alignment, Document, HighlightColor, Paragraph, ParagraphStyle, Run};
pub use writer::{DOCX_MIME, write_docx};
