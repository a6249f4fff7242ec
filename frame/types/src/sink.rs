/*!
    Rendering sink trait.
*/

use crate::{Result, VideoFrame};

/**
    Destination for finished frames.

    The render side of the pipeline produces fixed-size canvases and
    hands them off through this trait, so the same pipeline can drive
    a window surface, a recording, or a test buffer. Implementations
    are called from a background render thread and must be thread safe.

    A sink receives frames at their final size and must not resize or
    otherwise transform them.
*/
pub trait FrameSink: Send + Sync {
    /**
        Present one frame.

        Errors are reported to the caller but do not stop the render
        loop; a sink that wants rendering to end should signal that out
        of band.
    */
    fn present(&self, frame: VideoFrame) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        presented: AtomicUsize,
    }

    impl FrameSink for CountingSink {
        fn present(&self, _frame: VideoFrame) -> Result<()> {
            self.presented.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn sink_object_safety() {
        let sink = CountingSink {
            presented: AtomicUsize::new(0),
        };
        let dyn_sink: &dyn FrameSink = &sink;

        let frame = VideoFrame::new(vec![0u8; 3], 1, 1, PixelFormat::Rgb24);
        dyn_sink.present(frame).unwrap();

        assert_eq!(sink.presented.load(Ordering::Relaxed), 1);
    }
}
