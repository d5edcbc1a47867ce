//! Error types for the lexocr-core library.

use thiserror::Error;

use lexocr_engine::EngineError;

/// User-facing (French) messages surfaced to callers.
pub mod messages {
    /// The supplied file is not an image.
    pub const SELECT_IMAGE: &str = "Veuillez sélectionner un fichier image (JPG, PNG, etc.)";

    /// The camera device was denied or unavailable.
    pub const CAMERA_ACCESS: &str = "Impossible d'accéder à la caméra";

    /// A frame could not be captured or encoded.
    pub const CAPTURE: &str = "Impossible de capturer l'image";

    /// Generic extraction failure.
    pub const EXTRACTION: &str = "Erreur lors de l'extraction du texte";
}

/// Main error type for an extraction operation.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Image acquisition failed.
    #[error("acquisition failed: {0}")]
    Acquire(#[from] AcquireError),

    /// The recognition engine failed to start or process.
    #[error("engine failed: {0}")]
    Engine(#[from] EngineError),
}

/// Errors from the image acquisition source.
#[derive(Error, Debug)]
pub enum AcquireError {
    /// The caller-supplied file is not an image; carries the declared
    /// media type.
    #[error("not an image file: {0}")]
    InvalidInput(String),

    /// Camera device access was denied or the device is unavailable.
    #[error("camera access failed: {0}")]
    DeviceAccess(String),

    /// Frame capture or JPEG encoding failed.
    #[error("frame capture failed: {0}")]
    Capture(String),
}

/// The error taxonomy surfaced to callers alongside a failed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// Caller-supplied file is not an image.
    InvalidInput,
    /// Camera unavailable or access denied.
    DeviceAccess,
    /// Frame capture or encoding failed.
    Capture,
    /// Recognition engine failed to start or process.
    Engine,
}

impl ScanError {
    /// Classify this error for the caller-facing taxonomy.
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            ScanError::Acquire(AcquireError::InvalidInput(_)) => ScanErrorKind::InvalidInput,
            ScanError::Acquire(AcquireError::DeviceAccess(_)) => ScanErrorKind::DeviceAccess,
            ScanError::Acquire(AcquireError::Capture(_)) => ScanErrorKind::Capture,
            ScanError::Engine(_) => ScanErrorKind::Engine,
        }
    }

    /// Localized message suitable for direct display to the user.
    ///
    /// Acquisition failures map to fixed messages; engine failures carry
    /// the underlying message when one exists.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::Acquire(AcquireError::InvalidInput(_)) => messages::SELECT_IMAGE.to_string(),
            ScanError::Acquire(AcquireError::DeviceAccess(_)) => {
                messages::CAMERA_ACCESS.to_string()
            }
            ScanError::Acquire(AcquireError::Capture(_)) => messages::CAPTURE.to_string(),
            ScanError::Engine(e) => {
                let detail = e.to_string();
                if detail.is_empty() {
                    messages::EXTRACTION.to_string()
                } else {
                    detail
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn acquire_errors_map_to_fixed_messages() {
        let invalid = ScanError::from(AcquireError::InvalidInput("text/plain".to_string()));
        assert_eq!(invalid.kind(), ScanErrorKind::InvalidInput);
        assert_eq!(invalid.user_message(), messages::SELECT_IMAGE);

        let denied = ScanError::from(AcquireError::DeviceAccess("denied".to_string()));
        assert_eq!(denied.kind(), ScanErrorKind::DeviceAccess);
        assert_eq!(denied.user_message(), messages::CAMERA_ACCESS);

        let capture = ScanError::from(AcquireError::Capture("bad frame".to_string()));
        assert_eq!(capture.kind(), ScanErrorKind::Capture);
        assert_eq!(capture.user_message(), messages::CAPTURE);
    }

    #[test]
    fn engine_errors_carry_the_underlying_message() {
        let err = ScanError::from(EngineError::Startup("no language data".to_string()));
        assert_eq!(err.kind(), ScanErrorKind::Engine);
        assert!(err.user_message().contains("no language data"));
    }
}
