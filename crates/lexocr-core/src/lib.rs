//! Core library for French legal-document text extraction.
//!
//! This crate provides:
//! - Image acquisition from file uploads and camera capture
//! - An extraction orchestrator that scopes one OCR worker per scan
//! - The caller-facing error taxonomy with localized messages

pub mod acquire;
pub mod config;
pub mod error;
pub mod scanner;

pub use acquire::{
    AcquiredImage, CameraFacing, CameraStream, FileUpload, FrameCapture, RawFrame,
};
pub use config::{EngineConfig, LexocrConfig, ScanConfig};
pub use error::{AcquireError, ScanError, ScanErrorKind};
pub use scanner::{DocumentScanner, ExtractionResult, ScanOutcome};

/// Re-export engine types.
pub use lexocr_engine::{EngineError, EngineProvider, Recognition, RecognitionEngine};

/// Result type for the lexocr library.
pub type Result<T> = std::result::Result<T, ScanError>;
