// Whatlang-backed language detector.
//
// Whatlang identifies languages by ISO 639-3 code ("eng", "pes"), but
// search queries and the target-language config use 639-1 ("en", "fa").
// Detections are normalized to 639-1 before comparison. Whatlang names
// a few individual languages whose 639-1 code belongs to the
// macrolanguage (Persian is "pes", Arabic is "arb"), so those are
// mapped explicitly before falling back to the isolang table.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{Detection, LanguageDetector};

/// Local language detector built on the whatlang trigram model.
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LanguageDetector for WhatlangDetector {
    async fn detect(&self, text: &str, _hint: Option<&str>) -> Result<Detection> {
        // Whatlang's model takes no hint — detection is trigram-based
        // over the whole text.
        let info = whatlang::detect(text)
            .ok_or_else(|| anyhow::anyhow!("Detector could not classify text"))?;

        Ok(Detection {
            code: to_639_1(info.lang().code()),
            score: info.confidence(),
            reliable: info.is_reliable(),
        })
    }
}

/// Normalize an ISO 639-3 code to 639-1 where one exists.
///
/// Codes for individual languages inside a macrolanguage (whatlang's
/// "pes", "arb", ...) have no 639-1 of their own; the macrolanguage's
/// code is what the search API and config speak.
fn to_639_1(code: &str) -> String {
    let macro_code = match code {
        "pes" => Some("fa"),
        "arb" => Some("ar"),
        "cmn" => Some("zh"),
        "azj" => Some("az"),
        "nob" => Some("no"),
        "ydd" => Some("yi"),
        _ => None,
    };
    if let Some(c) = macro_code {
        return c.to_string();
    }

    isolang::Language::from_639_3(code)
        .and_then(|lang| lang.to_639_1())
        .map(|c| c.to_string())
        .unwrap_or_else(|| code.to_string())
}
