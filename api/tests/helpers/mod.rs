pub mod app;

pub use app::{StubAnalyzer, make_test_app, multipart_request};
