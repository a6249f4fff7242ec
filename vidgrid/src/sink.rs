use frame_types::{FrameSink, Result, VideoFrame};
use parking_lot::Mutex;

/// Sink that retains every presented frame.
///
/// Backs headless runs and tests, where composed canvases are inspected
/// after the fact instead of hitting a display surface.
#[derive(Default)]
pub struct CollectSink {
    frames: Mutex<Vec<VideoFrame>>,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    /// True if nothing has been presented.
    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    /// The most recently presented frame.
    pub fn last(&self) -> Option<VideoFrame> {
        self.frames.lock().last().cloned()
    }

    /// Remove and return all presented frames.
    pub fn take(&self) -> Vec<VideoFrame> {
        std::mem::take(&mut *self.frames.lock())
    }
}

impl FrameSink for CollectSink {
    fn present(&self, frame: VideoFrame) -> Result<()> {
        self.frames.lock().push(frame);
        Ok(())
    }
}

/// Sink that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&self, _frame: VideoFrame) -> Result<()> {
        Ok(())
    }
}
