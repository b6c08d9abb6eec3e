//! Image decoding with format detection and timeout support.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::PipelineError;
use crate::types::UploadedFile;

/// Image decoder with a configurable wall-clock timeout.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an upload.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an upload with timeout.
    ///
    /// Decoding runs on a blocking worker. The timer and the decode task
    /// race; whichever finishes first settles this stage. When the timer
    /// wins, the join handle is dropped and the worker's eventual result
    /// has nowhere to land, so a late decode cannot alter the outcome.
    pub async fn decode_upload(&self, file: &UploadedFile) -> Result<DecodedImage, PipelineError> {
        let bytes = file.bytes.clone();
        let name = file.file_name.clone();
        let timeout_duration = Duration::from_millis(self.limits.decode_timeout_ms);

        let decode_result = timeout(
            timeout_duration,
            tokio::task::spawn_blocking(move || Self::decode_bytes_sync(bytes, &name)),
        )
        .await;

        match decode_result {
            Ok(Ok(inner)) => inner,
            Ok(Err(e)) => Err(PipelineError::Decode {
                name: file.file_name.clone(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                name: file.file_name.clone(),
                stage: "decode".to_string(),
                timeout_ms: self.limits.decode_timeout_ms,
            }),
        }
    }

    /// Synchronous decode from bytes (runs in spawn_blocking).
    fn decode_bytes_sync(bytes: Vec<u8>, name: &str) -> Result<DecodedImage, PipelineError> {
        use std::io::Cursor;

        let cursor = Cursor::new(bytes);
        let reader = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                name: name.to_string(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        // Content detection wins over the declared MIME type
        let format = reader.format().ok_or_else(|| PipelineError::Decode {
            name: name.to_string(),
            message: "Cannot detect image format".to_string(),
        })?;
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
        assert_eq!(format_to_string(ImageFormat::WebP), "webp");
    }

    #[test]
    fn test_format_detected_by_content() {
        // PNG bytes under a .jpg name decode as PNG
        let result = ImageDecoder::decode_bytes_sync(png_bytes(8, 4), "misnamed.jpg").unwrap();
        assert_eq!(result.format, ImageFormat::Png);
        assert_eq!(result.width, 8);
        assert_eq!(result.height, 4);
    }

    #[test]
    fn test_corrupt_bytes_fail_decode() {
        let err = ImageDecoder::decode_bytes_sync(vec![0u8; 64], "junk.png").unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_decode_upload() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let file = UploadedFile::new("photo.png", "image/png", png_bytes(64, 32));
        let decoded = decoder.decode_upload(&file).await.unwrap();
        assert_eq!((decoded.width, decoded.height), (64, 32));
    }

    #[tokio::test]
    async fn test_decode_timeout() {
        // A zero timeout expires on the timer's first poll, before the
        // blocking worker can finish decoding a non-trivial image.
        let limits = LimitsConfig {
            decode_timeout_ms: 0,
            ..LimitsConfig::default()
        };
        let decoder = ImageDecoder::new(limits);
        let file = UploadedFile::new("slow.png", "image/png", png_bytes(512, 512));
        let err = decoder.decode_upload(&file).await.unwrap_err();
        match err {
            PipelineError::Timeout { stage, .. } => assert_eq!(stage, "decode"),
            other => panic!("expected timeout, got {other}"),
        }
    }
}
