//! Image acquisition source.
//!
//! Produces a single still image for the orchestrator, either by
//! validating a user-supplied file upload or by driving a camera stream
//! to capture one frame.

mod camera;
mod upload;

pub use camera::{
    acquire_from_camera, CameraFacing, CameraStream, FrameCapture, RawFrame, CAPTURE_FILE_NAME,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A still image ready for recognition.
///
/// Produced by the acquisition source, consumed exactly once by the
/// orchestrator, then discarded.
#[derive(Debug, Clone)]
pub struct AcquiredImage {
    /// Encoded image bytes (JPEG, PNG, ...).
    pub bytes: Vec<u8>,

    /// Declared media type, e.g. `"image/jpeg"`.
    pub media_type: String,

    /// Original or synthetic file name.
    pub file_name: String,

    /// Capture timestamp; set only for camera captures.
    pub captured_at: Option<DateTime<Utc>>,
}

/// A candidate file supplied by the caller (the upload boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    /// File name as supplied by the caller.
    pub file_name: String,

    /// Declared MIME type, e.g. `"image/png"`.
    pub media_type: String,

    /// Raw file bytes.
    pub bytes: Vec<u8>,
}
