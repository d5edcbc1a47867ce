//! Upload acquisition path.

use tracing::debug;

use crate::error::AcquireError;

use super::{AcquiredImage, FileUpload};

impl AcquiredImage {
    /// Validate a file upload and wrap it as an acquired image.
    ///
    /// The declared media type must begin with `"image/"`; anything else
    /// is rejected without side effects.
    pub fn from_upload(upload: &FileUpload) -> Result<Self, AcquireError> {
        if !upload.media_type.starts_with("image/") {
            return Err(AcquireError::InvalidInput(upload.media_type.clone()));
        }

        debug!(
            "accepted upload {} ({}, {} bytes)",
            upload.file_name,
            upload.media_type,
            upload.bytes.len()
        );

        Ok(Self {
            bytes: upload.bytes.clone(),
            media_type: upload.media_type.clone(),
            file_name: upload.file_name.clone(),
            captured_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn upload(media_type: &str) -> FileUpload {
        FileUpload {
            file_name: "acte.jpg".to_string(),
            media_type: media_type.to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[test]
    fn accepts_image_media_types() {
        for media_type in ["image/jpeg", "image/png", "image/webp"] {
            let acquired = AcquiredImage::from_upload(&upload(media_type)).unwrap();
            assert_eq!(acquired.media_type, media_type);
            assert_eq!(acquired.file_name, "acte.jpg");
            assert_eq!(acquired.bytes, vec![0xFF, 0xD8, 0xFF]);
            assert!(acquired.captured_at.is_none());
        }
    }

    #[test]
    fn rejects_non_image_media_types() {
        for media_type in ["text/plain", "application/pdf", "imagejpeg", ""] {
            let result = AcquiredImage::from_upload(&upload(media_type));
            assert!(matches!(result, Err(AcquireError::InvalidInput(_))));
        }
    }
}
