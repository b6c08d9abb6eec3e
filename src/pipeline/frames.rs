//! Frame overlay asset loading.

use image::DynamicImage;
use std::path::PathBuf;

use crate::error::PipelineError;

/// Resolves frame identifiers to overlay assets and decodes them.
///
/// Identifiers are not checked against a catalog; an unknown identifier
/// simply fails to load, which is pipeline-fatal for that invocation.
pub struct FrameLibrary {
    dir: PathBuf,
}

impl FrameLibrary {
    /// Create a frame library rooted at the given asset directory.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolve a frame identifier to its asset path: `{dir}/{frame_id}.png`.
    pub fn asset_path(&self, frame_id: &str) -> PathBuf {
        self.dir.join(format!("{frame_id}.png"))
    }

    /// Load and decode a frame asset.
    pub async fn load(&self, frame_id: &str) -> Result<DynamicImage, PipelineError> {
        let path = self.asset_path(frame_id);
        tracing::trace!("Loading frame asset: {:?}", path);

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| PipelineError::FrameLoad {
                frame_id: frame_id.to_string(),
                message: format!("Cannot read {}: {}", path.display(), e),
            })?;

        let id = frame_id.to_string();
        tokio::task::spawn_blocking(move || {
            image::load_from_memory(&bytes).map_err(|e| PipelineError::FrameLoad {
                frame_id: id,
                message: e.to_string(),
            })
        })
        .await
        .map_err(|e| PipelineError::FrameLoad {
            frame_id: frame_id.to_string(),
            message: format!("Task join error: {}", e),
        })?
    }
}
