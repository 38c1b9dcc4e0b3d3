#![allow(dead_code)]

use ai::{AiError, AiResult, EssayAnalyzer};
use api::{app, state::AppState};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use reporter::{ReportBuilder, ReportStrategy};
use std::sync::{Arc, Mutex};
use util::config::AppConfig;

pub const BOUNDARY: &str = "----corretor-test-boundary";

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR-not-really-an-image";

pub const RESPONSE: &str = r#"### Nome do Aluno
João Souza

### Transcrição da Redação
Os menino correu para o ônibus.

### Análise das Competências
#### Competência 1: Domínio da escrita formal
* **Nota estimada:** 120
* **Análise:** Erros de concordância.
* **Trecho com erro:** "Os menino correu"

### Nota Estimada
720

### Comentários Gerais
Revise a concordância.
"#;

/// Analyzer double that answers a canned result and remembers the MIME type it was called with.
pub struct StubAnalyzer {
    answer: Result<String, fn() -> AiError>,
    pub seen_mime: Mutex<Option<String>>,
}

impl StubAnalyzer {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            seen_mime: Mutex::new(None),
        }
    }

    pub fn failing(error: fn() -> AiError) -> Self {
        Self {
            answer: Err(error),
            seen_mime: Mutex::new(None),
        }
    }
}

#[async_trait]
impl EssayAnalyzer for StubAnalyzer {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn analyze(&self, _image: &[u8], mime: &str) -> AiResult<String> {
        *self.seen_mime.lock().unwrap() = Some(mime.to_string());
        match &self.answer {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }
}

/// Full application around `analyzer` and `strategy`.
pub fn make_test_app(analyzer: Arc<StubAnalyzer>, strategy: ReportStrategy) -> Router {
    let state = AppState::new(AppConfig::default(), analyzer, ReportBuilder::new(strategy));
    app(state)
}

/// `multipart/form-data` POST to `/api/corrections` with one file field.
pub fn multipart_request(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/corrections")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
