//! Sub-configuration structs with defaults matching the pipeline contract.

use serde::{Deserialize, Serialize};

/// Composition canvas settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas extent in pixels. The canvas is always square; sources are
    /// center-cropped and scaled to fill it.
    pub size: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { size: 2000 }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum upload size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum decoded image dimension (width or height)
    pub max_image_dimension: u32,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 25,
            max_image_dimension: 2000,
            decode_timeout_ms: 20_000,
        }
    }
}

/// Frame asset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FramesConfig {
    /// Directory containing frame overlay assets. A frame identifier `id`
    /// resolves to `{dir}/{id}.png`.
    pub dir: String,
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            dir: "frames".to_string(),
        }
    }
}

/// Preview output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suggested filename for downloaded previews
    pub download_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_name: "hass_frame.png".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
