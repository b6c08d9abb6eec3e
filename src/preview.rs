//! Preview encoding and handle lifecycle.
//!
//! The finished canvas is encoded to a PNG blob and published through a
//! single-owner slot: publishing a new preview releases the previous one, so
//! at most one preview is ever live per session.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::sync::{Arc, Weak};

use crate::config::OutputConfig;
use crate::error::PipelineError;
use crate::pipeline::Canvas;
use crate::types::PreviewInfo;

/// An encoded preview: PNG bytes plus metadata.
pub struct PreviewBlob {
    bytes: Vec<u8>,
    info: PreviewInfo,
}

/// Opaque, cheaply cloneable reference to an encoded preview.
///
/// All clones share one blob; the blob is freed once the last handle drops.
#[derive(Clone)]
pub struct PreviewHandle {
    blob: Arc<PreviewBlob>,
}

impl PreviewHandle {
    /// The encoded PNG bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.blob.bytes
    }

    /// Metadata for the published preview.
    pub fn info(&self) -> &PreviewInfo {
        &self.blob.info
    }

    /// BLAKE3 hash of the encoded bytes, usable as a stable identity.
    pub fn content_hash(&self) -> &str {
        &self.blob.info.content_hash
    }

    /// Render the blob as a `data:image/png;base64,...` URL for display.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.blob.info.mime, BASE64.encode(&self.blob.bytes))
    }

    /// Serialize the preview metadata to JSON.
    pub fn info_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.blob.info)
    }

    /// Create a weak reference for observing handle liveness.
    pub fn downgrade(&self) -> WeakPreviewHandle {
        WeakPreviewHandle {
            blob: Arc::downgrade(&self.blob),
        }
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("content_hash", &self.blob.info.content_hash)
            .field("byte_size", &self.blob.info.byte_size)
            .finish()
    }
}

/// Weak reference to a preview blob; upgradeable while any handle is live.
pub struct WeakPreviewHandle {
    blob: Weak<PreviewBlob>,
}

impl WeakPreviewHandle {
    /// Whether the referenced blob is still held by a live handle.
    pub fn is_live(&self) -> bool {
        self.blob.strong_count() > 0
    }

    /// Re-acquire a strong handle if the blob is still live.
    pub fn upgrade(&self) -> Option<PreviewHandle> {
        self.blob.upgrade().map(|blob| PreviewHandle { blob })
    }
}

/// Encodes finished canvases to PNG preview blobs.
pub struct PreviewEncoder {
    config: OutputConfig,
}

impl PreviewEncoder {
    /// Create a new encoder with the given output settings.
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Encode a canvas to a PNG blob and wrap it in a handle.
    ///
    /// Encoding runs on a blocking worker. Failures are not expected for a
    /// valid canvas but are classified rather than panicking.
    pub async fn encode(
        &self,
        canvas: &Canvas,
        frame_id: Option<&str>,
    ) -> Result<PreviewHandle, PipelineError> {
        let extent = canvas.size();
        let image = canvas.image().clone();

        let bytes = tokio::task::spawn_blocking(move || {
            let mut buffer = Cursor::new(Vec::new());
            DynamicImage::ImageRgba8(image)
                .write_to(&mut buffer, ImageFormat::Png)
                .map(|_| buffer.into_inner())
        })
        .await
        .map_err(|e| PipelineError::Encode {
            message: format!("Task join error: {}", e),
        })?
        .map_err(|e| PipelineError::Encode {
            message: e.to_string(),
        })?;

        let info = PreviewInfo {
            download_name: self.config.download_name.clone(),
            mime: "image/png".to_string(),
            width: extent,
            height: extent,
            frame_id: frame_id.map(str::to_string),
            content_hash: blake3::hash(&bytes).to_hex().to_string(),
            byte_size: bytes.len() as u64,
        };
        Ok(PreviewHandle {
            blob: Arc::new(PreviewBlob { bytes, info }),
        })
    }
}

/// Outcome of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The handle replaced the current preview.
    Published,
    /// The publishing invocation was superseded; the handle was discarded.
    Stale,
}

/// Ticket identifying one publishing invocation.
///
/// Issued by [`PreviewSlot::begin`]; becomes stale once a newer invocation
/// begins.
#[derive(Debug, Clone, Copy)]
pub struct PublishTicket {
    generation: u64,
}

/// Single-owner slot for the session's current preview.
///
/// Holds at most one handle. `publish` replaces the current handle, dropping
/// the previous one, and only accepts the most recent invocation's ticket so
/// a superseded invocation cannot clobber a newer result.
#[derive(Default)]
pub struct PreviewSlot {
    current: Option<PreviewHandle>,
    generation: u64,
}

impl PreviewSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new publishing invocation, superseding any prior one.
    pub fn begin(&mut self) -> PublishTicket {
        self.generation += 1;
        PublishTicket {
            generation: self.generation,
        }
    }

    /// Replace the current preview if the ticket is still current.
    ///
    /// The previous handle is dropped on replacement. A stale ticket drops
    /// the offered handle instead and leaves the slot untouched.
    pub fn publish(&mut self, ticket: &PublishTicket, handle: PreviewHandle) -> PublishOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale preview publish"
            );
            return PublishOutcome::Stale;
        }
        self.current = Some(handle);
        PublishOutcome::Published
    }

    /// The currently published preview, if any.
    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    /// Release the current preview.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
