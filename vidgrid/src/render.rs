use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use frame_types::{FrameSink, Result};
use parking_lot::Mutex;

use crate::compose::GridComposer;
use crate::streams::StreamRegistry;

/// Render loop configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Ticks per second the loop aims for
    pub fps: u32,
}

impl RenderConfig {
    pub const DEFAULT_FPS: u32 = 60;

    /// Configuration for the given canvas at the default tick rate.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fps: Self::DEFAULT_FPS,
        }
    }

    /// Use the given tick rate (at least one per second).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }
}

/// Counters for a render loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Loop iterations completed
    pub ticks: u64,
    /// Canvases the sink accepted
    pub frames_presented: u64,
    /// Ticks where composition failed
    pub compose_errors: u64,
    /// Ticks where the sink rejected the canvas
    pub present_errors: u64,
}

/// Background thread that turns registry state into presented canvases.
///
/// Each tick advances every stream, composes the current frames into
/// the grid canvas, and hands it to the sink; inactive streams are
/// cleaned up along the way. The loop paces itself to the configured
/// tick rate and runs until [`stop`](Self::stop) or drop.
pub struct GridRenderer {
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    stats: Arc<Mutex<RenderStats>>,
}

impl GridRenderer {
    /// Start rendering the registry's streams into the sink.
    ///
    /// Fails if the canvas dimensions are unusable.
    pub fn spawn(
        config: RenderConfig,
        registry: Arc<StreamRegistry>,
        sink: Arc<dyn FrameSink>,
    ) -> Result<Self> {
        let composer = GridComposer::new(config.width, config.height)?;
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(RenderStats::default()));

        let handle = {
            let stop = Arc::clone(&stop_flag);
            let stats = Arc::clone(&stats);
            thread::spawn(move || render_loop(composer, registry, sink, config.fps, stop, stats))
        };

        Ok(Self {
            stop_flag,
            handle: Some(handle),
            stats,
        })
    }

    /// Counters since the loop started.
    pub fn stats(&self) -> RenderStats {
        self.stats.lock().clone()
    }

    /// True while the render thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the loop and wait for the render thread to finish.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GridRenderer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn render_loop(
    composer: GridComposer,
    registry: Arc<StreamRegistry>,
    sink: Arc<dyn FrameSink>,
    fps: u32,
    stop: Arc<AtomicBool>,
    stats: Arc<Mutex<RenderStats>>,
) {
    let interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
    log::info!("render loop started at {fps} fps");

    while !stop.load(Ordering::Relaxed) {
        let tick_start = Instant::now();

        registry.advance();
        let tiles = registry.current_frames();

        match composer.compose(&tiles) {
            Ok(canvas) => {
                if let Err(e) = sink.present(canvas) {
                    stats.lock().present_errors += 1;
                    log::warn!("sink rejected canvas: {e}");
                } else {
                    stats.lock().frames_presented += 1;
                }
            }
            Err(e) => {
                stats.lock().compose_errors += 1;
                log::error!("grid composition failed: {e}");
            }
        }

        registry.cleanup_inactive();
        stats.lock().ticks += 1;

        if let Some(remaining) = interval.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    log::info!("render loop ended");
}
