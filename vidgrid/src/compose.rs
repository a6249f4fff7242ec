use frame_fit::{FrameFitter, ScalingAlgorithm};
use frame_types::{Error, PixelFormat, Result, VideoFrame};
use image::RgbImage;

use crate::grid::{GridLayout, MAX_TILES};

/// Composes participant frames onto a single fixed-size canvas.
///
/// The canvas is laid out with [`GridLayout`] based on how many tiles are
/// given, each tile is cover-fitted into its slot, and unused slots stay
/// black. The canvas size never changes between calls, so the output can
/// be handed to a display surface without renegotiating buffers.
#[derive(Clone, Copy, Debug)]
pub struct GridComposer {
    width: u32,
    height: u32,
    algorithm: ScalingAlgorithm,
}

impl GridComposer {
    /// Create a composer producing `width` x `height` canvases.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimension(width, height));
        }
        Ok(Self {
            width,
            height,
            algorithm: ScalingAlgorithm::default(),
        })
    }

    /// Use `algorithm` when scaling tiles into their slots.
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Canvas size as `(width, height)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Compose `tiles` onto a fresh canvas.
    ///
    /// Tiles are placed left to right, top to bottom, in the order given.
    /// Anything past [`MAX_TILES`] is ignored. An empty slice produces an
    /// all-black canvas.
    pub fn compose(&self, tiles: &[VideoFrame]) -> Result<VideoFrame> {
        let mut canvas = RgbImage::new(self.width, self.height);

        let count = tiles.len().min(MAX_TILES);
        if count > 0 {
            let layout = GridLayout::for_count(count);
            let rects = layout.slot_rects(self.width, self.height)?;

            for (tile, rect) in tiles.iter().zip(rects) {
                let fitted = FrameFitter::cover(rect.width, rect.height)
                    .with_algorithm(self.algorithm)
                    .fit(tile)?;
                let buffer =
                    RgbImage::from_raw(fitted.width, fitted.height, fitted.data).ok_or_else(
                        || Error::invalid_data("fitted tile buffer does not match dimensions"),
                    )?;
                image::imageops::replace(&mut canvas, &buffer, rect.x as i64, rect.y as i64);
            }
        }

        Ok(VideoFrame::new(
            canvas.into_raw(),
            self.width,
            self.height,
            PixelFormat::Rgb24,
        ))
    }
}
