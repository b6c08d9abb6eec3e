//! Error types for the framing pipeline.
//!
//! Errors are organized by stage to provide clear, actionable messages that
//! include relevant context (upload names, frame identifiers, limits).

use thiserror::Error;

/// Top-level error type for framer operations.
#[derive(Error, Debug)]
pub enum FramerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Upload has no content
    #[error("Empty upload: {name}")]
    EmptyFile { name: String },

    /// Declared MIME type is not accepted
    #[error("Invalid file type for {name}: {mime} (expected JPEG, PNG, or WEBP)")]
    InvalidFileType { name: String, mime: String },

    /// Upload exceeds size limit
    #[error("File too large: {name} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        name: String,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image decoding failed
    #[error("Decode error for {name}: {message}")]
    Decode { name: String, message: String },

    /// Decoded image dimensions exceed limit
    #[error("Image too large: {name} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        name: String,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {name} after {timeout_ms}ms")]
    Timeout {
        name: String,
        stage: String,
        timeout_ms: u64,
    },

    /// Frame overlay asset could not be loaded or decoded
    #[error("Frame load failed for '{frame_id}': {message}")]
    FrameLoad { frame_id: String, message: String },

    /// Canvas encoding failed
    #[error("Encode error: {message}")]
    Encode { message: String },
}

/// Convenience type alias for framer results.
pub type Result<T> = std::result::Result<T, FramerError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
