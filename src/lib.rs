//! Framer - Embeddable image compositing pipeline for framed photo previews.
//!
//! Framer takes a user-uploaded photo, center-crops it to a square scaled
//! onto a fixed-size canvas, optionally composites a decorative frame overlay
//! on top, and publishes the result as a downloadable PNG preview.
//!
//! # Architecture
//!
//! Framer is designed as a pure pipeline with no persistence:
//!
//! ```text
//! Upload → Validate → Decode → Square-crop → Frame overlay → PNG preview
//! ```
//!
//! Decoding is guarded by a wall-clock timeout, every failure is classified,
//! and published previews live in a single-owner slot: publishing a new
//! preview releases the previous one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use framer::{Config, Framer, UploadedFile};
//!
//! #[tokio::main]
//! async fn main() -> framer::Result<()> {
//!     let config = Config::load()?;
//!     let mut framer = Framer::new(config);
//!
//!     let file = UploadedFile::new("photo.jpg", "image/jpeg", std::fs::read("photo.jpg")?);
//!     let preview = framer.create_preview(&file, Some("HASS-2030-Frame-1")).await?;
//!     println!("Preview: {} ({} bytes)", preview.content_hash(), preview.bytes().len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod preview;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FramerError, PipelineError, PipelineResult, Result};
pub use pipeline::{Canvas, FrameLibrary, FrameProcessor, ImageDecoder, SquareCompositor, Stage};
pub use preview::{
    PreviewEncoder, PreviewHandle, PreviewSlot, PublishOutcome, PublishTicket, WeakPreviewHandle,
};
pub use types::{PreviewInfo, UploadedFile, SUPPORTED_MIME_TYPES};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Framing session - the main entry point for producing previews.
///
/// Owns the pipeline, the preview slot, and the session-visible state the
/// embedding layer renders: the busy flag and the last error message.
pub struct Framer {
    config: Config,
    processor: FrameProcessor,
    encoder: PreviewEncoder,
    slot: PreviewSlot,
    busy: bool,
    last_error: Option<String>,
}

impl Framer {
    /// Create a new framing session with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing framer v{}", VERSION);
        let processor = FrameProcessor::new(&config);
        let encoder = PreviewEncoder::new(config.output.clone());
        Self {
            config,
            processor,
            encoder,
            slot: PreviewSlot::new(),
            busy: false,
            last_error: None,
        }
    }

    /// Create a new framing session with default configuration.
    pub fn with_defaults() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::new(config))
    }

    /// Run the pipeline for an upload and publish the preview.
    ///
    /// With a frame identifier, the photo-only preview is published as soon
    /// as compositing finishes and the framed preview replaces it once the
    /// overlay is drawn; if the frame fails to load, the photo-only preview
    /// stays live and the error is returned. Without a frame identifier the
    /// photo-only preview is the final result.
    ///
    /// On every failure path the busy flag returns to false and
    /// [`last_error`](Self::last_error) carries the message.
    pub async fn create_preview(
        &mut self,
        file: &UploadedFile,
        frame_id: Option<&str>,
    ) -> Result<PreviewHandle> {
        self.busy = true;
        self.last_error = None;
        let outcome = self.run(file, frame_id).await;
        self.busy = false;
        match outcome {
            Ok(handle) => Ok(handle),
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    async fn run(
        &mut self,
        file: &UploadedFile,
        frame_id: Option<&str>,
    ) -> PipelineResult<PreviewHandle> {
        self.processor.validate_upload(file)?;
        let ticket = self.slot.begin();

        let mut canvas = self.processor.compose_photo(file).await?;

        // The photo-only preview goes up first; a frame failure after this
        // point leaves it in place
        let photo_only = self.encoder.encode(&canvas, None).await?;
        self.slot.publish(&ticket, photo_only.clone());

        let Some(id) = frame_id else {
            return Ok(photo_only);
        };

        self.processor.apply_frame(&mut canvas, id).await?;
        let framed = self.encoder.encode(&canvas, Some(id)).await?;
        self.slot.publish(&ticket, framed.clone());
        Ok(framed)
    }

    /// The currently published preview, if any.
    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.slot.current()
    }

    /// Release the current preview.
    pub fn clear_preview(&mut self) {
        self.slot.clear();
    }

    /// Whether an invocation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Message from the most recent failed invocation, cleared on the next one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_framer_new() {
        let framer = Framer::new(Config::default());
        assert_eq!(framer.config().canvas.size, 2000);
        assert!(!framer.is_busy());
        assert!(framer.preview().is_none());
    }

    #[tokio::test]
    async fn test_invalid_file_type_sets_error_and_resets_busy() {
        let mut framer = Framer::new(Config::default());
        let file = UploadedFile::new("doc.pdf", "application/pdf", vec![1, 2, 3, 4]);

        let err = framer.create_preview(&file, None).await.unwrap_err();
        assert!(matches!(
            err,
            FramerError::Pipeline(PipelineError::InvalidFileType { .. })
        ));
        assert!(!framer.is_busy());
        assert!(framer.last_error().unwrap().contains("Invalid file type"));
        assert!(framer.preview().is_none());
    }
}
