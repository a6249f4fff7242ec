use std::sync::Arc;
use std::time::Duration;

use frame_codec::{JpegCodec, MAX_DATAGRAM_PAYLOAD};
use frame_fit::{FrameFitter, ScalingAlgorithm};
use frame_types::{Clock, Error, Result, VideoFrame, WallClock};

use crate::settings::{CaptureSettings, ScreenSettings};

/// One processed frame ready for a transport to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundFrame {
    /// Frame number; consecutive across everything the pipeline emits
    pub seq: u64,
    /// Position on the sender's timeline when the frame entered the pipeline
    pub captured: Duration,
    /// JPEG payload, at most [`MAX_DATAGRAM_PAYLOAD`] bytes
    pub data: Vec<u8>,
}

/// Counters for one outbound pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptureStats {
    /// Frames offered to the pipeline
    pub processed: u64,
    /// Frames that came out the other end
    pub emitted: u64,
    /// Frames dropped for encoding over the datagram budget
    pub dropped_oversize: u64,
    /// Payload bytes emitted in total
    pub total_bytes: u64,
    /// Mean emitted payload size in bytes
    pub average_encoded_size: f64,
    /// Frames processed per second of pipeline lifetime
    pub actual_fps: f64,
}

/// Turns raw captured frames into sendable JPEG payloads.
///
/// A pipeline pairs a [`FrameFitter`] with a budgeted [`JpegCodec`]:
/// camera frames are resized to the exact transmit size, screen frames
/// only shrink to fit their bounds. Frames whose encoding exceeds the
/// datagram budget are dropped and counted; the transport never sees
/// them and their sequence numbers are not consumed, so receivers see
/// an unbroken sequence.
///
/// Reconfiguring a live capture means building a new pipeline; its
/// numbering and counters start over, which matches the stream restart
/// the receiving side performs.
pub struct OutboundPipeline {
    fitter: FrameFitter,
    codec: JpegCodec,
    clock: Arc<dyn Clock>,
    started: Duration,
    seq: u64,
    processed: u64,
    emitted: u64,
    dropped_oversize: u64,
    total_bytes: u64,
}

impl OutboundPipeline {
    /// Pipeline for camera frames: resize to exactly the transmit size,
    /// encode at the configured quality.
    pub fn video(settings: CaptureSettings) -> Self {
        Self::with_parts(
            FrameFitter::exact(settings.width, settings.height),
            JpegCodec::new(settings.quality).with_max_encoded_len(MAX_DATAGRAM_PAYLOAD),
        )
    }

    /// Pipeline for screen shares: shrink to fit the size bounds
    /// without cropping, keep smaller captures as they are.
    pub fn screen(settings: ScreenSettings) -> Self {
        Self::with_parts(
            FrameFitter::within(settings.max_width, settings.max_height),
            JpegCodec::new(settings.quality).with_max_encoded_len(MAX_DATAGRAM_PAYLOAD),
        )
    }

    fn with_parts(fitter: FrameFitter, codec: JpegCodec) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(WallClock::new());
        let started = clock.position();
        Self {
            fitter,
            codec,
            clock,
            started,
            seq: 0,
            processed: 0,
            emitted: 0,
            dropped_oversize: 0,
            total_bytes: 0,
        }
    }

    /// Use the given clock for capture timestamps and rate measurement.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.started = clock.position();
        self.clock = clock;
        self
    }

    /// Use the given scaling algorithm instead of the default.
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.fitter = self.fitter.with_algorithm(algorithm);
        self
    }

    /// Run one captured frame through the pipeline.
    ///
    /// Returns the encoded frame, or None if it encoded over the
    /// datagram budget and was dropped. Malformed input is an error;
    /// captured frames come from this process and should never be.
    pub fn process(&mut self, frame: &VideoFrame) -> Result<Option<OutboundFrame>> {
        self.processed += 1;
        let captured = self.clock.position();

        let fitted = self.fitter.fit(frame)?;
        match self.codec.encode(&fitted) {
            Ok(data) => {
                let seq = self.seq;
                self.seq += 1;
                self.emitted += 1;
                self.total_bytes += data.len() as u64;
                Ok(Some(OutboundFrame {
                    seq,
                    captured,
                    data,
                }))
            }
            Err(Error::FrameTooLarge { len, max }) => {
                self.dropped_oversize += 1;
                log::warn!("dropped oversize frame ({len} bytes, budget {max})");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// The transmit dimensions frames are fitted to.
    pub fn target_size(&self) -> (u32, u32) {
        self.fitter.target_size()
    }

    /// Counters since construction.
    pub fn stats(&self) -> CaptureStats {
        let elapsed = self.clock.position().saturating_sub(self.started);
        CaptureStats {
            processed: self.processed,
            emitted: self.emitted,
            dropped_oversize: self.dropped_oversize,
            total_bytes: self.total_bytes,
            average_encoded_size: if self.emitted > 0 {
                self.total_bytes as f64 / self.emitted as f64
            } else {
                0.0
            },
            actual_fps: if elapsed > Duration::ZERO {
                self.processed as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            },
        }
    }
}
