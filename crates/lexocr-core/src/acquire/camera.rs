//! Camera acquisition path.
//!
//! The camera hardware sits behind the [`FrameCapture`] capability so the
//! acquisition logic is testable without a real device. One frame is
//! captured at the stream's native resolution, the device is released,
//! and only then is the frame encoded and returned.

use async_trait::async_trait;
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::debug;

use crate::error::AcquireError;

use super::AcquiredImage;

/// Synthetic file name given to camera captures.
pub const CAPTURE_FILE_NAME: &str = "camera-capture.jpg";

/// Which camera to request from the capability layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Rear/document-facing camera.
    Environment,
    /// Front/user-facing camera.
    User,
}

/// One video frame at the stream's native resolution, in RGB8.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB8 pixels, row-major; length must be `width * height * 3`.
    pub pixels: Vec<u8>,
}

/// Capability granting access to a camera device.
#[async_trait]
pub trait FrameCapture: Send + Sync {
    /// Request exclusive access to a camera. Suspends until access is
    /// granted or rejected.
    async fn open(&self, facing: CameraFacing) -> Result<Box<dyn CameraStream>, AcquireError>;
}

/// An open camera stream holding the device.
#[async_trait]
pub trait CameraStream: Send {
    /// Wait for the first frame with known dimensions.
    async fn first_frame(&mut self) -> Result<RawFrame, AcquireError>;

    /// Stop the underlying hardware tracks. Must be safe to call exactly
    /// once on every path after `open` succeeds.
    fn release(&mut self);
}

/// Capture one frame from an environment-facing camera as a JPEG image.
///
/// The device is released as soon as a frame (or a frame failure) is
/// produced, before encoding and before any error is surfaced.
pub async fn acquire_from_camera(
    camera: &dyn FrameCapture,
    jpeg_quality: u8,
) -> Result<AcquiredImage, AcquireError> {
    let mut stream = camera
        .open(CameraFacing::Environment)
        .await
        .map_err(|e| match e {
            AcquireError::DeviceAccess(_) => e,
            other => AcquireError::DeviceAccess(other.to_string()),
        })?;

    let frame = stream.first_frame().await;
    stream.release();

    let frame = frame.map_err(|e| match e {
        AcquireError::Capture(_) => e,
        other => AcquireError::Capture(other.to_string()),
    })?;

    debug!("captured {}x{} frame", frame.width, frame.height);
    let bytes = encode_jpeg(&frame, jpeg_quality)?;

    Ok(AcquiredImage {
        bytes,
        media_type: "image/jpeg".to_string(),
        file_name: CAPTURE_FILE_NAME.to_string(),
        captured_at: Some(Utc::now()),
    })
}

fn encode_jpeg(frame: &RawFrame, quality: u8) -> Result<Vec<u8>, AcquireError> {
    let buffer = RgbImage::from_raw(frame.width, frame.height, frame.pixels.clone())
        .ok_or_else(|| {
            AcquireError::Capture("frame buffer does not match its dimensions".to_string())
        })?;

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(&buffer)
        .map_err(|e| AcquireError::Capture(e.to_string()))?;

    Ok(bytes)
}
