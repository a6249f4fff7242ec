/*!
    Timestamped frame type.
*/

use std::time::Duration;

use frame_types::VideoFrame;

/**
    A frame carrying the full set of pipeline timestamps.

    All timestamps are positions on a shared timeline (see
    [`frame_types::Clock`]). `captured` and `sent` are stamped by the
    sender; `arrived` is stamped by the receiver when the frame enters
    the sequencer.
*/
#[derive(Clone, Debug)]
pub struct TimedFrame {
    /// Sender-assigned sequence number.
    pub seq: u64,
    /// When the sender captured the frame.
    pub captured: Duration,
    /// When the sender put the frame on the wire.
    pub sent: Duration,
    /// When the frame arrived at the receiver.
    pub arrived: Duration,
    /// The decoded frame.
    pub frame: VideoFrame,
}

impl TimedFrame {
    /**
        Create a new timed frame.
    */
    pub fn new(
        seq: u64,
        captured: Duration,
        sent: Duration,
        arrived: Duration,
        frame: VideoFrame,
    ) -> Self {
        Self {
            seq,
            captured,
            sent,
            arrived,
            frame,
        }
    }
}
