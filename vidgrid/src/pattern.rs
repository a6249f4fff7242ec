use frame_types::{PixelFormat, VideoFrame};

/// Generate a gradient frame: red rises left to right, green top to
/// bottom, blue held at half intensity.
///
/// The pattern makes scaling and cropping mistakes visible at a glance,
/// which makes it a useful stand-in for camera input in headless runs
/// and tests.
pub fn gradient_frame(width: u32, height: u32) -> VideoFrame {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((255 * x as u64 / width.max(1) as u64) as u8);
            data.push((255 * y as u64 / height.max(1) as u64) as u8);
            data.push(128);
        }
    }
    VideoFrame::new(data, width, height, PixelFormat::Rgb24)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &VideoFrame, x: u32, y: u32) -> [u8; 3] {
        let i = (y * frame.width + x) as usize * 3;
        [frame.data[i], frame.data[i + 1], frame.data[i + 2]]
    }

    #[test]
    fn test_gradient_dimensions() {
        let frame = gradient_frame(640, 480);
        assert_eq!((frame.width, frame.height), (640, 480));
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_gradient_pattern() {
        let frame = gradient_frame(256, 256);

        // Red rises with x, green with y, blue stays flat.
        assert_eq!(pixel(&frame, 0, 0), [0, 0, 128]);
        assert_eq!(pixel(&frame, 255, 0), [254, 0, 128]);
        assert_eq!(pixel(&frame, 0, 255), [0, 254, 128]);
        assert_eq!(pixel(&frame, 128, 64), [127, 63, 128]);
    }
}
