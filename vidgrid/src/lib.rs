/*!
    Video grid pipeline for a desktop conferencing client.

    This crate assembles the frame ecosystem crates into the two halves
    of a conference session:

    - **Inbound**: encoded frames from other participants land in a
      [`StreamRegistry`], get sequenced per stream, and a [`GridRenderer`]
      thread composes every stream's current frame into one grid canvas
      per tick, delivered through a [`frame_types::FrameSink`].
    - **Outbound**: locally captured camera or screen frames run through
      an [`OutboundPipeline`], which sizes and JPEG-encodes them under
      the datagram budget for a transport to send.

    # Receiving

    ```ignore
    use std::sync::Arc;
    use vidgrid::{GridRenderer, RenderConfig, StreamRegistry};

    let registry = Arc::new(StreamRegistry::new());
    let renderer = GridRenderer::spawn(RenderConfig::new(1280, 720), registry.clone(), sink)?;

    // Network thread, per received datagram:
    registry.ingest_encoded(stream_id, seq, captured, sent, &payload);
    ```

    # Sending

    ```ignore
    use vidgrid::{CaptureSettings, OutboundPipeline};

    let mut pipeline = OutboundPipeline::video(CaptureSettings::new());

    if let Some(outbound) = pipeline.process(&captured_frame)? {
        transport.send(outbound.seq, outbound.captured, outbound.data);
    }
    ```

    Capture and screen share settings persist across sessions via
    [`SessionPrefs`].
*/

pub use frame_codec::{JpegCodec, MAX_DATAGRAM_PAYLOAD, decode_jpeg};
pub use frame_fit::{FitMode, FrameFitter, ScalingAlgorithm};
pub use frame_sequence::{FrameSequencer, SequencerConfig, SequencerStats};
pub use frame_types::{
    Clock, Error, FrameSink, ManualClock, PixelFormat, Result, StreamSignal, VideoFrame, WallClock,
};

mod capture;
mod compose;
mod grid;
mod pattern;
mod prefs;
mod render;
mod settings;
mod sink;
mod streams;

pub use capture::{CaptureStats, OutboundFrame, OutboundPipeline};
pub use compose::GridComposer;
pub use grid::{GridLayout, MAX_TILES, SlotRect};
pub use pattern::gradient_frame;
pub use prefs::SessionPrefs;
pub use render::{GridRenderer, RenderConfig, RenderStats};
pub use settings::{CaptureSettings, ScreenSettings};
pub use sink::{CollectSink, NullSink};
pub use streams::{
    DEFAULT_INACTIVE_TIMEOUT, MAX_DISPLAY_BUFFER, RegistryStats, StreamId, StreamRegistry,
    StreamStats,
};
