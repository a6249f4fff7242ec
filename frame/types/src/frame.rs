/*!
    Decoded frame types.
*/

use crate::{Error, PixelFormat, Result};

/**
    A decoded video frame.

    Contains raw pixel data in the format specified by `format`.
    All supported formats are packed, so `data` is a single contiguous
    buffer of `height` rows, each `width * bytes_per_pixel` bytes, with
    no padding between rows.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    /// Raw pixel data.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format of the data.
    pub format: PixelFormat,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /**
        Returns the expected data length in bytes for the frame's
        dimensions and format.
    */
    pub fn expected_data_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /**
        Check that the frame has positive dimensions and a data buffer
        matching them.

        Pipeline stages call this at their boundaries so that malformed
        frames are rejected before any pixel work happens.
    */
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_dimension(self.width, self.height));
        }
        if self.data.len() != self.expected_data_len() {
            return Err(Error::invalid_data(format!(
                "frame buffer is {} bytes, expected {} for {}x{} {:?}",
                self.data.len(),
                self.expected_data_len(),
                self.width,
                self.height,
                self.format,
            )));
        }
        Ok(())
    }

    /**
        Returns the width-to-height aspect ratio.
    */
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

// Ensure frames are Send + Sync
static_assertions::assert_impl_all!(VideoFrame: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_frame_construction() {
        let frame = VideoFrame::new(vec![0u8; 100 * 100 * 3], 100, 100, PixelFormat::Rgb24);

        assert_eq!(frame.width, 100);
        assert_eq!(frame.height, 100);
        assert_eq!(frame.format, PixelFormat::Rgb24);
        assert_eq!(frame.data.len(), 100 * 100 * 3);
    }

    #[test]
    fn video_frame_expected_data_len() {
        let frame = VideoFrame::new(vec![], 640, 480, PixelFormat::Rgb24);
        assert_eq!(frame.expected_data_len(), 640 * 480 * 3);

        let frame = VideoFrame::new(vec![], 640, 480, PixelFormat::Rgba32);
        assert_eq!(frame.expected_data_len(), 640 * 480 * 4);
    }

    #[test]
    fn video_frame_validate_ok() {
        let frame = VideoFrame::new(vec![0u8; 16 * 9 * 3], 16, 9, PixelFormat::Rgb24);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn video_frame_validate_zero_dimension() {
        let frame = VideoFrame::new(vec![], 0, 480, PixelFormat::Rgb24);
        assert!(matches!(
            frame.validate(),
            Err(Error::InvalidDimension {
                width: 0,
                height: 480
            })
        ));

        let frame = VideoFrame::new(vec![], 640, 0, PixelFormat::Rgb24);
        assert!(matches!(
            frame.validate(),
            Err(Error::InvalidDimension {
                width: 640,
                height: 0
            })
        ));
    }

    #[test]
    fn video_frame_validate_short_buffer() {
        let frame = VideoFrame::new(vec![0u8; 10], 16, 9, PixelFormat::Rgb24);
        assert!(matches!(
            frame.validate(),
            Err(Error::InvalidData { .. })
        ));
    }

    #[test]
    fn video_frame_aspect_ratio() {
        let frame = VideoFrame::new(vec![], 1920, 1080, PixelFormat::Rgb24);
        assert!((frame.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }
}
