//! Extraction orchestrator.
//!
//! Owns the recognition-worker lifecycle for one scan at a time: acquire
//! an image, run a worker scoped to the call, normalize the output, and
//! surface failures as a non-throwing outcome plus a user-facing message.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lexocr_engine::{with_engine, EngineProvider};

use crate::acquire::{acquire_from_camera, AcquiredImage, FileUpload, FrameCapture};
use crate::config::ScanConfig;
use crate::error::{ScanError, ScanErrorKind};

/// Normalized output of one successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Recognized text, whitespace-trimmed.
    pub text: String,

    /// Engine confidence rounded to the nearest whole percent (0 - 100).
    pub confidence: u8,
}

impl ExtractionResult {
    fn from_raw(text: &str, confidence: f32) -> Self {
        Self {
            text: text.trim().to_string(),
            confidence: confidence.clamp(0.0, 100.0).round() as u8,
        }
    }
}

/// Outcome of one scan, returned as a single inspectable value.
///
/// Failures are part of the outcome rather than an `Err`: a scan that
/// produces no text is routine, and the scanner stays usable afterwards.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// Extraction produced text.
    Succeeded(ExtractionResult),

    /// Extraction failed; `message` is ready for display.
    Failed {
        kind: ScanErrorKind,
        message: String,
    },
}

impl ScanOutcome {
    /// The extraction result, if the scan succeeded.
    pub fn result(self) -> Option<ExtractionResult> {
        match self {
            ScanOutcome::Succeeded(result) => Some(result),
            ScanOutcome::Failed { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Succeeded(_))
    }
}

/// Orchestrates document scans, one at a time.
///
/// Each scan starts a fresh recognition worker and tears it down before
/// returning. `&mut self` on the scan methods means callers serialize
/// scans per scanner instance at compile time.
pub struct DocumentScanner<P: EngineProvider> {
    provider: P,
    config: ScanConfig,
    processing: bool,
    last_error: Option<String>,
}

impl<P: EngineProvider> DocumentScanner<P> {
    /// Create a scanner with the default (French) configuration.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ScanConfig::default())
    }

    /// Create a scanner with an explicit configuration.
    pub fn with_config(provider: P, config: ScanConfig) -> Self {
        Self {
            provider,
            config,
            processing: false,
            last_error: None,
        }
    }

    /// True from the moment a scan is accepted until it resolves.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// The most recent user-facing error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Clear the stored error message.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Scan an uploaded file.
    ///
    /// A non-image upload fails before any worker is started.
    pub async fn scan_file(&mut self, upload: &FileUpload) -> ScanOutcome {
        self.begin();
        let outcome = self.run_file(upload).await;
        self.finish(outcome)
    }

    /// Scan one frame captured from an environment-facing camera.
    pub async fn scan_camera(&mut self, camera: &dyn FrameCapture) -> ScanOutcome {
        self.begin();
        let outcome = self.run_camera(camera).await;
        self.finish(outcome)
    }

    fn begin(&mut self) {
        self.processing = true;
        self.last_error = None;
        debug!("scan accepted");
    }

    // Single exit point for every scan: `processing` is cleared here and
    // nowhere else, so it is false whenever a scan resolves.
    fn finish(&mut self, outcome: Result<ExtractionResult, ScanError>) -> ScanOutcome {
        self.processing = false;
        match outcome {
            Ok(result) => {
                info!(
                    "extraction succeeded ({} chars, confidence {})",
                    result.text.len(),
                    result.confidence
                );
                ScanOutcome::Succeeded(result)
            }
            Err(err) => {
                let message = err.user_message();
                warn!("extraction failed: {}", err);
                self.last_error = Some(message.clone());
                ScanOutcome::Failed {
                    kind: err.kind(),
                    message,
                }
            }
        }
    }

    async fn run_file(&self, upload: &FileUpload) -> Result<ExtractionResult, ScanError> {
        let acquired = AcquiredImage::from_upload(upload)?;
        self.recognize(acquired).await
    }

    async fn run_camera(&self, camera: &dyn FrameCapture) -> Result<ExtractionResult, ScanError> {
        let acquired = acquire_from_camera(camera, self.config.jpeg_quality).await?;
        self.recognize(acquired).await
    }

    async fn recognize(&self, image: AcquiredImage) -> Result<ExtractionResult, ScanError> {
        debug!(
            "submitting {} ({}, {} bytes) to engine",
            image.file_name,
            image.media_type,
            image.bytes.len()
        );

        let recognition = with_engine(&self.provider, &self.config.lang, &image.bytes).await?;
        Ok(ExtractionResult::from_raw(
            &recognition.text,
            recognition.confidence,
        ))
    }
}
