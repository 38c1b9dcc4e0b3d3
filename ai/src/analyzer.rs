//!
//! # Essay Analyzer Trait
//!
//! [`EssayAnalyzer`] is the seam between the callers (HTTP API, batch runner) and the hosted model
//! that transcribes and grades the essay. Callers hold it as `Arc<dyn EssayAnalyzer>` so tests can
//! swap in a canned implementation.

use crate::error::AiResult;
use async_trait::async_trait;

#[async_trait]
pub trait EssayAnalyzer: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Analyse one essay image.
    ///
    /// # Arguments
    /// - `image`: The encoded image bytes.
    /// - `mime`: Its MIME type (`image/jpeg` or `image/png`).
    ///
    /// # Returns
    /// - `Ok(String)`: The raw analysis text, in the markdown-like layout the prompt asks for.
    /// - `Err(AiError)`: If the call fails or the answer carries no text.
    async fn analyze(&self, image: &[u8], mime: &str) -> AiResult<String>;
}
