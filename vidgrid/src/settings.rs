use serde::{Deserialize, Serialize};

/// Camera capture settings.
///
/// Defaults apply verbatim; values passed to the builders are clamped
/// into the supported ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Transmit frame width in pixels
    pub width: u32,
    /// Transmit frame height in pixels
    pub height: u32,
    /// Capture rate in frames per second
    pub fps: u32,
    /// JPEG compression quality
    pub quality: u8,
}

impl CaptureSettings {
    pub const DEFAULT_WIDTH: u32 = 240;
    pub const DEFAULT_HEIGHT: u32 = 180;
    pub const DEFAULT_FPS: u32 = 60;
    pub const DEFAULT_QUALITY: u8 = 40;

    /// Create settings with the defaults.
    pub fn new() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            fps: Self::DEFAULT_FPS,
            quality: Self::DEFAULT_QUALITY,
        }
    }

    /// Use the given width, clamped to 160..=1920.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width.clamp(160, 1920);
        self
    }

    /// Use the given height, clamped to 120..=1080.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height.clamp(120, 1080);
        self
    }

    /// Use the given frame rate, clamped to 5..=30.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(5, 30);
        self
    }

    /// Use the given JPEG quality, clamped to 10..=100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(10, 100);
        self
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Screen share capture settings.
///
/// Screen content tolerates far lower rates and quality than camera
/// video, and captures are bounded instead of resized to a fixed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSettings {
    /// Widest frame that will be transmitted; larger captures shrink to fit
    pub max_width: u32,
    /// Tallest frame that will be transmitted
    pub max_height: u32,
    /// Capture rate in frames per second
    pub fps: u32,
    /// JPEG compression quality
    pub quality: u8,
}

impl ScreenSettings {
    pub const DEFAULT_MAX_WIDTH: u32 = 800;
    pub const DEFAULT_MAX_HEIGHT: u32 = 600;
    pub const DEFAULT_FPS: u32 = 2;
    pub const DEFAULT_QUALITY: u8 = 30;

    /// Create settings with the defaults.
    pub fn new() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_WIDTH,
            max_height: Self::DEFAULT_MAX_HEIGHT,
            fps: Self::DEFAULT_FPS,
            quality: Self::DEFAULT_QUALITY,
        }
    }

    /// Use the given frame rate, clamped to 1..=15.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(1, 15);
        self
    }

    /// Use the given JPEG quality, clamped to 10..=100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(10, 100);
        self
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self::new()
    }
}
