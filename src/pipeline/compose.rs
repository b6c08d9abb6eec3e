//! Square-crop compositing onto a fixed-size canvas.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::config::CanvasConfig;

/// A square RGBA drawing surface, exclusively owned by one pipeline
/// invocation until it is handed to the encoder.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Canvas extent in pixels (width == height).
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Borrow the underlying pixel buffer.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas, returning the pixel buffer.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Draws a centered square crop of a source image scaled to fill the canvas,
/// and frame overlays on top of it.
pub struct SquareCompositor {
    config: CanvasConfig,
}

impl SquareCompositor {
    /// Create a new compositor with the given canvas settings.
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    /// Compute the centered square crop region for a source of `width` x `height`.
    ///
    /// Returns `(x, y, size)` where `size = min(width, height)` and the
    /// origin is `((width - size) / 2, (height - size) / 2)`. Odd
    /// differences round the origin down.
    pub fn crop_region(width: u32, height: u32) -> (u32, u32, u32) {
        let size = width.min(height);
        ((width - size) / 2, (height - size) / 2, size)
    }

    /// Composite a source image onto a fresh canvas.
    ///
    /// The centered square region is cropped from the source and scaled to
    /// the full canvas extent, so output is always square and undistorted;
    /// content outside the centered square is discarded.
    pub fn compose(&self, source: &DynamicImage) -> Canvas {
        let (width, height) = source.dimensions();
        let (x, y, size) = Self::crop_region(width, height);

        let scaled = source
            .crop_imm(x, y, size, size)
            .resize_exact(self.config.size, self.config.size, FilterType::Triangle);

        Canvas {
            image: scaled.to_rgba8(),
        }
    }

    /// Alpha-composite a frame image over the full canvas extent.
    ///
    /// The frame is scaled to the canvas size if it doesn't already match.
    pub fn overlay(&self, canvas: &mut Canvas, frame: &DynamicImage) {
        let extent = canvas.size();
        let frame = if frame.dimensions() == (extent, extent) {
            frame.to_rgba8()
        } else {
            frame
                .resize_exact(extent, extent, FilterType::Triangle)
                .to_rgba8()
        };
        imageops::overlay(&mut canvas.image, &frame, 0, 0);
    }
}
