/*!
    Shared types for the frame crate ecosystem.

    This crate defines the vocabulary of the ecosystem — the types that cross crate
    boundaries. It has no dependency on image or codec libraries, making it
    lightweight and enabling consumers to depend on it without pulling those in.

    # Core Types

    - [`VideoFrame`] - Decoded frame data
    - [`PixelFormat`] - Video pixel formats

    # Clock Types

    - [`Clock`] - Trait for pipeline clocks
    - [`WallClock`] - Wall-time clock for live pipelines
    - [`ManualClock`] - Manually stepped clock for deterministic tests

    # Error Handling

    - [`Error`] and [`Result`] - Common error types

    # Pipeline Control

    - [`StreamSignal`] - Signals for flush and end-of-stream
    - [`FrameSink`] - Destination trait for finished frames
*/

mod clock;
mod error;
mod format;
mod frame;
mod signal;
mod sink;

pub use clock::{Clock, ManualClock, WallClock};
pub use error::{Error, Result};
pub use format::PixelFormat;
pub use frame::VideoFrame;
pub use signal::StreamSignal;
pub use sink::FrameSink;
