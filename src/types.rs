//! Core data types for the framing pipeline.
//!
//! These types describe what the embedder hands in (an uploaded file) and the
//! metadata that travels with a published preview.

use serde::{Deserialize, Serialize};

/// MIME types accepted for uploads.
pub const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// A user-selected file handed to the pipeline by the embedding layer.
///
/// The bytes are owned by the upload; one pipeline invocation consumes them
/// and only the composited canvas survives.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name of the file as selected by the user
    pub file_name: String,

    /// Declared MIME type (e.g. "image/jpeg")
    pub mime: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from its parts.
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Size of the upload in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the upload has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the declared MIME type is in the accepted set.
    pub fn has_supported_mime(&self) -> bool {
        SUPPORTED_MIME_TYPES.contains(&self.mime.as_str())
    }
}

/// Metadata for a published preview.
///
/// Travels with the [`PreviewHandle`](crate::preview::PreviewHandle) so the
/// embedding layer can render a download link without touching the blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewInfo {
    /// Suggested download filename
    pub download_name: String,

    /// MIME type of the encoded blob (always "image/png")
    pub mime: String,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Frame identifier composited over the photo, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<String>,

    /// BLAKE3 hash of the encoded bytes
    pub content_hash: String,

    /// Encoded blob size in bytes
    pub byte_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_mime() {
        let file = UploadedFile::new("photo.jpg", "image/jpeg", vec![1, 2, 3]);
        assert!(file.has_supported_mime());
        assert_eq!(file.len(), 3);
        assert!(!file.is_empty());
    }

    #[test]
    fn test_unsupported_mime() {
        let file = UploadedFile::new("doc.pdf", "application/pdf", vec![1]);
        assert!(!file.has_supported_mime());
    }

    #[test]
    fn test_preview_info_skips_none_frame() {
        let info = PreviewInfo {
            download_name: "hass_frame.png".to_string(),
            mime: "image/png".to_string(),
            width: 2000,
            height: 2000,
            frame_id: None,
            content_hash: "abc123".to_string(),
            byte_size: 1024,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("frame_id"));
        assert!(json.contains("\"download_name\":\"hass_frame.png\""));
    }

    #[test]
    fn test_preview_info_roundtrip() {
        let info = PreviewInfo {
            download_name: "hass_frame.png".to_string(),
            mime: "image/png".to_string(),
            width: 2000,
            height: 2000,
            frame_id: Some("HASS-2030-Frame-1".to_string()),
            content_hash: "abc123".to_string(),
            byte_size: 1024,
        };
        let json = serde_json::to_string(&info).unwrap();
        let parsed: PreviewInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.frame_id.as_deref(), Some("HASS-2030-Frame-1"));
        assert_eq!(parsed.byte_size, 1024);
    }
}
