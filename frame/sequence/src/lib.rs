/*!
    Frame sequencing for the frame crate ecosystem.

    Frames from a remote participant arrive over a lossy transport:
    late, out of order, duplicated, or not at all. This crate reorders
    them into strict chronological display order.

    Each [`FrameSequencer`] handles one stream. Frames are buffered on a
    min-heap keyed by capture timestamp, a small jitter buffer smooths
    irregular arrival, bounded waits cover missing sequence numbers, and
    anything too stale to display gets dropped. Every decision is
    counted in [`SequencerStats`].

    # Usage

    ```ignore
    use frame_sequence::FrameSequencer;

    let mut sequencer = FrameSequencer::new();

    // Per received frame (network side):
    let accepted = sequencer.push(seq, captured, sent, frame, clock.position());

    // Per render tick (display side):
    while let Some(timed) = sequencer.next_ready(clock.position()) {
        display(timed.frame);
    }
    ```

    # Time Handling

    The sequencer never reads a clock. Callers pass the current position
    on the receiver timeline into `push` and `next_ready`, which makes
    the whole state machine deterministic and directly testable. Sender
    timestamps live on a different clock; the offset between the two is
    measured from the first frame and applied to all age checks.
*/

pub use frame_types::{Error, Result, StreamSignal, VideoFrame};

mod config;
mod frame;
mod sequencer;

pub use config::SequencerConfig;
pub use frame::TimedFrame;
pub use sequencer::{FrameSequencer, SequencerStats, SequencerStatus};
