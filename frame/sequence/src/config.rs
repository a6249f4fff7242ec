/*!
    Sequencer configuration.
*/

use std::time::Duration;

/**
    Tuning knobs for a [`FrameSequencer`](crate::FrameSequencer).

    The defaults are sized for 30 fps camera streams over a lossy
    transport and work unchanged for most callers.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Most frames buffered at once; the oldest captures are evicted past this.
    pub max_buffer: usize,
    /// Frames held back for jitter compensation before display starts.
    pub jitter_buffer: usize,
    /// Frames older than this on arrival (or while buffered) are dropped.
    pub max_frame_age: Duration,
    /// Largest sequence gap worth waiting for; beyond it, display immediately.
    pub max_sequence_gap: u64,
    /// How long to hold a frame hoping its missing predecessors arrive.
    pub reorder_timeout: Duration,
}

impl SequencerConfig {
    /**
        Create a config with default settings.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Use the given buffer capacity.
    */
    pub fn with_max_buffer(mut self, max_buffer: usize) -> Self {
        self.max_buffer = max_buffer;
        self
    }

    /**
        Use the given jitter buffer depth.
    */
    pub fn with_jitter_buffer(mut self, jitter_buffer: usize) -> Self {
        self.jitter_buffer = jitter_buffer;
        self
    }

    /**
        Use the given maximum frame age.
    */
    pub fn with_max_frame_age(mut self, max_frame_age: Duration) -> Self {
        self.max_frame_age = max_frame_age;
        self
    }

    /**
        Use the given maximum sequence gap.
    */
    pub fn with_max_sequence_gap(mut self, max_sequence_gap: u64) -> Self {
        self.max_sequence_gap = max_sequence_gap;
        self
    }

    /**
        Use the given reorder timeout.
    */
    pub fn with_reorder_timeout(mut self, reorder_timeout: Duration) -> Self {
        self.reorder_timeout = reorder_timeout;
        self
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            max_buffer: 10,
            jitter_buffer: 3,
            max_frame_age: Duration::from_secs(1),
            max_sequence_gap: 10,
            reorder_timeout: Duration::from_millis(100),
        }
    }
}
