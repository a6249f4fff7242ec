/*!
    Fit plan execution.
*/

use frame_types::{Error, PixelFormat, Result, VideoFrame};
use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::plan::{self, FitMode};

/**
    Scaling algorithms, ordered roughly by quality (and cost).
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalingAlgorithm {
    /// Nearest neighbor — fastest, visibly blocky.
    Nearest,
    /// Bilinear filtering — the speed/quality tradeoff used by default.
    #[default]
    Bilinear,
    /// Bicubic (Catmull-Rom) filtering — sharper than bilinear.
    Bicubic,
    /// Lanczos windowed sinc — best quality, slowest.
    Lanczos,
}

impl ScalingAlgorithm {
    fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::Bicubic => FilterType::CatmullRom,
            Self::Lanczos => FilterType::Lanczos3,
        }
    }
}

/**
    Fits frames to a fixed target rectangle.

    A fitter is cheap to construct and stateless; each frame transforms
    independently, so one fitter can serve frames of varying sizes (its
    plan is recomputed per frame from the frame's dimensions).

    ```ignore
    use frame_fit::FrameFitter;

    // Fill a 640x480 slot, cropping whatever overflows
    let fitter = FrameFitter::cover(640, 480);
    let fitted = fitter.fit(&frame)?;
    assert_eq!((fitted.width, fitted.height), (640, 480));
    ```
*/
#[derive(Clone, Copy, Debug)]
pub struct FrameFitter {
    mode: FitMode,
    target_width: u32,
    target_height: u32,
    algorithm: ScalingAlgorithm,
}

impl FrameFitter {
    /**
        Fitter that fills `width x height` exactly, center-cropping the
        overflow ([`FitMode::Cover`]).
    */
    pub fn cover(width: u32, height: u32) -> Self {
        Self::with_mode(FitMode::Cover, width, height)
    }

    /**
        Fitter that shrinks frames to fit within `width x height`
        without cropping or upscaling ([`FitMode::Within`]).
    */
    pub fn within(width: u32, height: u32) -> Self {
        Self::with_mode(FitMode::Within, width, height)
    }

    /**
        Fitter that resizes frames to `width x height` exactly,
        distorting if the aspect ratios differ ([`FitMode::Exact`]).
    */
    pub fn exact(width: u32, height: u32) -> Self {
        Self::with_mode(FitMode::Exact, width, height)
    }

    fn with_mode(mode: FitMode, width: u32, height: u32) -> Self {
        Self {
            mode,
            target_width: width,
            target_height: height,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    /**
        Use the given scaling algorithm instead of the default.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /**
        Returns the fit mode.
    */
    pub fn mode(&self) -> FitMode {
        self.mode
    }

    /**
        Returns the target dimensions.
    */
    pub fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    /**
        Fit one frame to the target rectangle.

        Returns a new frame; the input is untouched. Frames that already
        satisfy the fit are returned as an unmodified copy, making the
        operation idempotent down to the byte level.
    */
    pub fn fit(&self, frame: &VideoFrame) -> Result<VideoFrame> {
        frame.validate()?;
        if frame.format != PixelFormat::Rgb24 {
            return Err(Error::unsupported_format(format!(
                "fitting requires Rgb24 frames, got {:?}",
                frame.format
            )));
        }

        let plan = plan::plan(
            self.mode,
            frame.width,
            frame.height,
            self.target_width,
            self.target_height,
        )?;

        if plan.is_identity(frame.width, frame.height) {
            return Ok(frame.clone());
        }

        let source = RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
            .ok_or_else(|| Error::invalid_data("frame buffer does not match its dimensions"))?;

        let scaled = if plan.scaled_width == frame.width && plan.scaled_height == frame.height {
            source
        } else {
            imageops::resize(
                &source,
                plan.scaled_width,
                plan.scaled_height,
                self.algorithm.filter_type(),
            )
        };

        let (out_width, out_height) = plan.output_size();
        let output = if out_width == plan.scaled_width && out_height == plan.scaled_height {
            scaled
        } else {
            imageops::crop_imm(&scaled, plan.crop.x, plan.crop.y, out_width, out_height)
                .to_image()
        };

        Ok(VideoFrame::new(
            output.into_raw(),
            out_width,
            out_height,
            PixelFormat::Rgb24,
        ))
    }
}

/**
    Fit a frame into a `width x height` slot.

    Convenience for the common case: [`FitMode::Cover`] with the default
    scaling algorithm. The result always has exactly the requested
    dimensions.
*/
pub fn fit(frame: &VideoFrame, width: u32, height: u32) -> Result<VideoFrame> {
    FrameFitter::cover(width, height).fit(frame)
}
