//! Recognition-engine abstraction layer for lexocr.
//!
//! This crate provides a unified interface for optical character
//! recognition engines:
//! - the `RecognitionEngine` / `EngineProvider` traits, which treat the
//!   engine as an opaque, replaceable worker
//! - [`with_engine`], a scoped helper that pairs every engine start with
//!   exactly one teardown
//! - a concrete backend driving a Tesseract worker process

mod error;
pub mod tesseract;

pub use error::EngineError;
pub use tesseract::{TesseractEngine, TesseractProvider};

use async_trait::async_trait;
use tracing::warn;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Raw recognition output, on the engine-native scale.
#[derive(Debug, Clone)]
pub struct Recognition {
    /// Recognized text, as produced by the engine (not yet trimmed).
    pub text: String,

    /// Engine-reported confidence (0.0 - 100.0).
    pub confidence: f32,
}

/// A running recognition-engine worker.
///
/// An engine instance lives for exactly one recognition call; callers go
/// through [`with_engine`] rather than pairing start/terminate by hand.
#[async_trait]
pub trait RecognitionEngine: Send {
    /// Recognize text in an encoded image (JPEG, PNG, ...).
    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition>;

    /// Release the worker and any resources it holds.
    async fn terminate(&mut self) -> Result<()>;
}

/// Factory for recognition-engine workers.
///
/// Starting a worker is a suspending operation: the engine may need to
/// load language data before it is ready.
#[async_trait]
pub trait EngineProvider: Send + Sync {
    type Engine: RecognitionEngine;

    /// Start a worker configured for the given language (e.g. `"fra"`).
    async fn start(&self, lang: &str) -> Result<Self::Engine>;
}

/// Run one recognition with a worker scoped to the call.
///
/// The worker is terminated on every exit path, so no engine resources
/// leak across calls. A teardown failure after a successful recognition
/// is logged rather than reported, since the text was already produced.
pub async fn with_engine<P: EngineProvider>(
    provider: &P,
    lang: &str,
    image: &[u8],
) -> Result<Recognition> {
    let mut engine = provider.start(lang).await?;
    let result = engine.recognize(image).await;

    if let Err(e) = engine.terminate().await {
        warn!("engine teardown failed: {}", e);
    }

    result
}
