// Language detector trait — the swap-ready abstraction.
//
// The default implementation wraps the whatlang trigram model, which
// runs locally with no API key. The trait exists so the gate can be
// exercised with a deterministic stub in tests, and so a remote
// detection service could be dropped in later.

use anyhow::Result;
use async_trait::async_trait;

/// The result of detecting the language of one piece of text.
#[derive(Debug, Clone)]
pub struct Detection {
    /// ISO 639-1 code of the top-ranked language where one exists
    /// (e.g. "fa", "en"), otherwise the detector's native code.
    pub code: String,
    /// Detector confidence. The scale is detector-defined — whatlang
    /// reports 0.0 to 1.0; thresholds are configured to match the
    /// backend in use.
    pub score: f64,
    /// Whether the detector considers its own result trustworthy.
    pub reliable: bool,
}

/// Trait for language detection. Async because remote detectors need
/// HTTP calls; the local whatlang backend resolves immediately.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text`. `hint` biases backends that
    /// support it and is ignored by the rest.
    async fn detect(&self, text: &str, hint: Option<&str>) -> Result<Detection>;
}
