//! Pipeline orchestration - wires together all processing stages.

use crate::config::Config;
use crate::error::PipelineError;
use crate::types::UploadedFile;

use super::compose::{Canvas, SquareCompositor};
use super::decode::{format_to_string, ImageDecoder};
use super::frames::FrameLibrary;
use super::validate::Validator;

/// Pipeline stages, in execution order.
///
/// An invocation moves forward through these; only the first of
/// decode-success, decode-failure, or timer expiry moves it out of
/// `Decoding` (enforced in the decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decoding,
    Validating,
    Compositing,
    OverlayPending,
    Done,
}

impl Stage {
    /// Stage name for logs and error context.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Decoding => "decode",
            Stage::Validating => "validate",
            Stage::Compositing => "composite",
            Stage::OverlayPending => "overlay",
            Stage::Done => "done",
        }
    }
}

/// The main frame processor that orchestrates the full pipeline.
pub struct FrameProcessor {
    validator: Validator,
    decoder: ImageDecoder,
    compositor: SquareCompositor,
    frames: FrameLibrary,
    max_dimension: u32,
}

impl FrameProcessor {
    /// Create a new frame processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            validator: Validator::new(config.limits.clone()),
            decoder: ImageDecoder::new(config.limits.clone()),
            compositor: SquareCompositor::new(config.canvas.clone()),
            frames: FrameLibrary::new(config.frames_dir()),
            max_dimension: config.limits.max_image_dimension,
        }
    }

    /// Validate an upload before running the pipeline.
    pub fn validate_upload(&self, file: &UploadedFile) -> Result<(), PipelineError> {
        self.validator.validate(file)
    }

    /// Run the full pipeline: validate, decode, square-crop, and (if a frame
    /// is requested) overlay.
    ///
    /// Resolves with the finished canvas or the first classified failure.
    pub async fn create_frame(
        &self,
        file: &UploadedFile,
        frame_id: Option<&str>,
    ) -> Result<Canvas, PipelineError> {
        self.validate_upload(file)?;
        let mut canvas = self.compose_photo(file).await?;
        if let Some(id) = frame_id {
            self.apply_frame(&mut canvas, id).await?;
        }
        Ok(canvas)
    }

    /// Decode an upload, gate its dimensions, and composite it onto a fresh
    /// canvas (the photo-only result).
    pub async fn compose_photo(&self, file: &UploadedFile) -> Result<Canvas, PipelineError> {
        let start = std::time::Instant::now();
        tracing::debug!("Processing upload: {}", file.file_name);

        // Decoding
        self.trace_stage(Stage::Decoding);
        let decoded = self.decoder.decode_upload(file).await?;
        tracing::trace!("  Decode: {:?}", start.elapsed());

        // Validating: dimension gate before any drawing occurs
        self.trace_stage(Stage::Validating);
        if decoded.width > self.max_dimension || decoded.height > self.max_dimension {
            return Err(PipelineError::ImageTooLarge {
                name: file.file_name.clone(),
                width: decoded.width,
                height: decoded.height,
                max_dim: self.max_dimension,
            });
        }

        // Compositing
        self.trace_stage(Stage::Compositing);
        let compose_start = std::time::Instant::now();
        let canvas = self.compositor.compose(&decoded.image);
        tracing::trace!("  Composite: {:?}", compose_start.elapsed());

        tracing::debug!(
            "Composited {} in {:?} ({}x{} {})",
            file.file_name,
            start.elapsed(),
            decoded.width,
            decoded.height,
            format_to_string(decoded.format)
        );
        Ok(canvas)
    }

    /// Load a frame asset and draw it over an already-composited canvas.
    pub async fn apply_frame(&self, canvas: &mut Canvas, frame_id: &str) -> Result<(), PipelineError> {
        self.trace_stage(Stage::OverlayPending);
        let start = std::time::Instant::now();

        let frame = self.frames.load(frame_id).await?;
        self.compositor.overlay(canvas, &frame);

        self.trace_stage(Stage::Done);
        tracing::trace!("  Overlay '{}': {:?}", frame_id, start.elapsed());
        Ok(())
    }

    fn trace_stage(&self, stage: Stage) {
        tracing::trace!(stage = stage.as_str(), "stage transition");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::Path;

    fn test_config(frames_dir: &Path) -> Config {
        let mut config = Config::default();
        config.canvas.size = 64;
        config.frames.dir = frames_dir.to_string_lossy().into_owned();
        config
    }

    fn png_upload(width: u32, height: u32, rgb: [u8; 3]) -> UploadedFile {
        let img = RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        UploadedFile::new("photo.png", "image/png", buffer.into_inner())
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Decoding.as_str(), "decode");
        assert_eq!(Stage::OverlayPending.as_str(), "overlay");
    }

    #[tokio::test]
    async fn test_create_frame_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let frame = RgbaImage::from_pixel(64, 64, Rgba([9, 9, 9, 255]));
        frame
            .save_with_format(dir.path().join("plain.png"), ImageFormat::Png)
            .unwrap();

        let processor = FrameProcessor::new(&test_config(dir.path()));
        let canvas = processor
            .create_frame(&png_upload(32, 16, [200, 0, 0]), Some("plain"))
            .await
            .unwrap();

        assert_eq!(canvas.size(), 64);
        // Opaque frame covers the whole photo
        assert_eq!(canvas.image().get_pixel(32, 32), &Rgba([9, 9, 9, 255]));
    }

    #[tokio::test]
    async fn test_create_frame_without_id_skips_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let processor = FrameProcessor::new(&test_config(dir.path()));
        let canvas = processor
            .create_frame(&png_upload(32, 32, [200, 0, 0]), None)
            .await
            .unwrap();

        assert_eq!(canvas.image().get_pixel(32, 32), &Rgba([200, 0, 0, 255]));
    }

    #[tokio::test]
    async fn test_dimension_gate_rejects_oversized_source() {
        let dir = tempfile::tempdir().unwrap();
        let processor = FrameProcessor::new(&test_config(dir.path()));
        let err = processor
            .create_frame(&png_upload(2100, 40, [0, 0, 0]), None)
            .await
            .unwrap_err();

        match err {
            PipelineError::ImageTooLarge { width, max_dim, .. } => {
                assert_eq!(width, 2100);
                assert_eq!(max_dim, 2000);
            }
            other => panic!("expected dimension failure, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_create_frame_rejects_bad_mime() {
        let dir = tempfile::tempdir().unwrap();
        let processor = FrameProcessor::new(&test_config(dir.path()));
        let file = UploadedFile::new("anim.gif", "image/gif", vec![b'G', b'I', b'F', b'8']);
        let err = processor.create_frame(&file, None).await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidFileType { .. }));
    }
}
