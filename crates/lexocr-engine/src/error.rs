//! Error types for the engine layer.

use thiserror::Error;

/// Errors that can occur while driving a recognition worker.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The worker failed to start or load its language data.
    #[error("failed to start engine: {0}")]
    Startup(String),

    /// The worker ran but could not recognize the image.
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// The worker process misbehaved (crashed, timed out, bad output).
    #[error("engine worker error: {0}")]
    Worker(String),

    /// I/O error when exchanging data with the worker.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
