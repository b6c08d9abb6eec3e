//! Image compositing pipeline components.
//!
//! This module contains all the stages of the framing pipeline:
//! - **validate**: Pre-pipeline upload validation
//! - **decode**: Decode uploads with a wall-clock timeout
//! - **compose**: Centered square crop scaled onto the canvas
//! - **frames**: Frame overlay asset loading
//! - **processor**: Orchestrates the full pipeline

pub mod compose;
pub mod decode;
pub mod frames;
pub mod processor;
pub mod validate;

// Re-exports for convenient access
pub use compose::{Canvas, SquareCompositor};
pub use decode::{DecodedImage, ImageDecoder};
pub use frames::FrameLibrary;
pub use processor::{FrameProcessor, Stage};
pub use validate::Validator;
