// Language acceptance — decides whether a tweet's text counts as the
// target language.
//
// The gate wraps a detector behind an accept/reject verdict. A
// detector error is a reject, never a propagated error: a tweet the
// detector chokes on is just not broadcast. The whole stage can also
// be switched off (`SECONDARY_CHECK=false`), in which case the
// detector is never invoked at all.

pub mod detector;
pub mod traits;

use std::sync::Arc;

use tracing::debug;

use traits::LanguageDetector;

/// Accept/reject gate for the language filter stage.
pub struct LanguageGate {
    enabled: bool,
    target: String,
    hint: Option<String>,
    threshold: f64,
    detector: Arc<dyn LanguageDetector>,
}

impl LanguageGate {
    pub fn new(
        enabled: bool,
        target: impl Into<String>,
        hint: Option<String>,
        threshold: f64,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        Self {
            enabled,
            target: target.into(),
            hint,
            threshold,
            detector,
        }
    }

    /// Decide whether `text` passes the language check.
    ///
    /// Accepts iff the detector succeeded, its top language equals the
    /// target exactly, its score meets the threshold (inclusive), and
    /// it reports the result as reliable. With the gate disabled this
    /// is always true, without touching the detector.
    pub async fn accepts(&self, text: &str) -> bool {
        if !self.enabled {
            return true;
        }

        match self.detector.detect(text, self.hint.as_deref()).await {
            Ok(detection) => {
                let accepted = detection.code == self.target
                    && detection.score >= self.threshold
                    && detection.reliable;
                debug!(
                    code = detection.code,
                    score = detection.score,
                    reliable = detection.reliable,
                    accepted = accepted,
                    "Language verdict"
                );
                accepted
            }
            Err(e) => {
                // Classification failure is data, not an error
                debug!(error = %e, "Detection failed, rejecting");
                false
            }
        }
    }
}
