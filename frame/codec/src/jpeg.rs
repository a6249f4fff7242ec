/*!
    JPEG frame codec.
*/

use frame_types::{Error, PixelFormat, Result, VideoFrame};
use image::{ImageEncoder, ImageFormat};
use image::codecs::jpeg::JpegEncoder;

/**
    Largest encoded frame the transport layer will carry in one datagram.

    Frames that encode above this size are unsendable and get dropped at
    the capture side rather than fragmented.
*/
pub const MAX_DATAGRAM_PAYLOAD: usize = 32 * 1024;

/**
    JPEG encoder with a fixed quality setting and an optional size budget.

    Quality runs 1 (worst) to 100 (best) and is clamped into that range
    at construction. The codec is stateless; one instance can encode
    frames of any size and be shared freely across threads.

    ```ignore
    use frame_codec::{JpegCodec, MAX_DATAGRAM_PAYLOAD};

    let codec = JpegCodec::new(40).with_max_encoded_len(MAX_DATAGRAM_PAYLOAD);
    let payload = codec.encode(&frame)?;
    ```
*/
#[derive(Clone, Copy, Debug)]
pub struct JpegCodec {
    quality: u8,
    max_encoded_len: Option<usize>,
}

impl JpegCodec {
    /**
        Create a codec with the given quality (clamped to 1..=100) and
        no size budget.
    */
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
            max_encoded_len: None,
        }
    }

    /**
        Fail encodes whose output exceeds `max` bytes with
        [`Error::FrameTooLarge`].
    */
    pub fn with_max_encoded_len(mut self, max: usize) -> Self {
        self.max_encoded_len = Some(max);
        self
    }

    /**
        Returns the configured quality.
    */
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /**
        Encode one frame to a JPEG byte buffer.

        Only [`PixelFormat::Rgb24`] frames are accepted; everything else
        in the pipeline converts to packed RGB before reaching the codec.
    */
    pub fn encode(&self, frame: &VideoFrame) -> Result<Vec<u8>> {
        frame.validate()?;
        if frame.format != PixelFormat::Rgb24 {
            return Err(Error::unsupported_format(format!(
                "JPEG encoding requires Rgb24 frames, got {:?}",
                frame.format
            )));
        }

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        encoder
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| Error::codec(e.to_string()))?;

        if let Some(max) = self.max_encoded_len
            && buffer.len() > max
        {
            return Err(Error::FrameTooLarge {
                len: buffer.len(),
                max,
            });
        }

        Ok(buffer)
    }
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new(75)
    }
}

/**
    Decode a JPEG byte buffer into an [`PixelFormat::Rgb24`] frame.

    Grayscale and other JPEG color spaces are converted to packed RGB
    so downstream stages see a single format.
*/
pub fn decode_jpeg(data: &[u8]) -> Result<VideoFrame> {
    let decoded = image::load_from_memory_with_format(data, ImageFormat::Jpeg)
        .map_err(|e| Error::codec(e.to_string()))?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    Ok(VideoFrame::new(
        rgb.into_raw(),
        width,
        height,
        PixelFormat::Rgb24,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> VideoFrame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                data.push((255 * x as u64 / width as u64) as u8);
                data.push((255 * y as u64 / height as u64) as u8);
                data.push(128);
            }
        }
        VideoFrame::new(data, width, height, PixelFormat::Rgb24)
    }

    #[test]
    fn encode_decode_round_trip_dimensions() {
        let frame = gradient(240, 180);
        let payload = JpegCodec::new(80).encode(&frame).unwrap();
        let decoded = decode_jpeg(&payload).unwrap();

        assert_eq!((decoded.width, decoded.height), (240, 180));
        assert_eq!(decoded.format, PixelFormat::Rgb24);
        assert_eq!(decoded.data.len(), decoded.expected_data_len());
    }

    #[test]
    fn lower_quality_encodes_smaller() {
        let frame = gradient(320, 240);
        let low = JpegCodec::new(10).encode(&frame).unwrap();
        let high = JpegCodec::new(95).encode(&frame).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(JpegCodec::new(0).quality(), 1);
        assert_eq!(JpegCodec::new(255).quality(), 100);
        assert_eq!(JpegCodec::new(40).quality(), 40);
    }

    #[test]
    fn size_budget_enforced() {
        let frame = gradient(320, 240);
        let codec = JpegCodec::new(80).with_max_encoded_len(16);

        match codec.encode(&frame) {
            Err(Error::FrameTooLarge { len, max }) => {
                assert!(len > 16);
                assert_eq!(max, 16);
            }
            other => panic!("expected FrameTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn size_budget_allows_frames_under_it() {
        let frame = gradient(64, 48);
        let codec = JpegCodec::new(40).with_max_encoded_len(MAX_DATAGRAM_PAYLOAD);
        let payload = codec.encode(&frame).unwrap();
        assert!(payload.len() <= MAX_DATAGRAM_PAYLOAD);
    }

    #[test]
    fn encode_rejects_wrong_format() {
        let frame = VideoFrame::new(vec![0u8; 4 * 4 * 4], 4, 4, PixelFormat::Rgba32);
        assert!(matches!(
            JpegCodec::new(80).encode(&frame),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn encode_rejects_invalid_frame() {
        let frame = VideoFrame::new(vec![0u8; 5], 4, 4, PixelFormat::Rgb24);
        assert!(matches!(
            JpegCodec::new(80).encode(&frame),
            Err(Error::InvalidData { .. })
        ));

        let frame = VideoFrame::new(vec![], 0, 0, PixelFormat::Rgb24);
        assert!(matches!(
            JpegCodec::new(80).encode(&frame),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode_jpeg(&[0xde, 0xad, 0xbe, 0xef]),
            Err(Error::Codec { .. })
        ));
        assert!(matches!(decode_jpeg(&[]), Err(Error::Codec { .. })));
    }

    #[test]
    fn decoded_pixels_resemble_source() {
        // JPEG is lossy; a smooth gradient should still come back close.
        let frame = gradient(160, 120);
        let payload = JpegCodec::new(90).encode(&frame).unwrap();
        let decoded = decode_jpeg(&payload).unwrap();

        let mut total_error = 0u64;
        for (a, b) in frame.data.iter().zip(decoded.data.iter()) {
            total_error += u64::from(a.abs_diff(*b));
        }
        let mean_error = total_error as f64 / frame.data.len() as f64;
        assert!(mean_error < 8.0, "mean channel error {mean_error}");
    }
}
