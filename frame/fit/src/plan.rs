/*!
    Fit planning.

    Pure dimension math: given a source size, a target size, and a fit
    mode, compute the uniform resize size and the crop rectangle that
    together map the source into the target. No pixels are touched here.
*/

use frame_types::{Error, Result};

/**
    How a source frame is mapped into a target rectangle.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FitMode {
    /**
        Scale uniformly until the target is fully covered, then crop the
        overflow symmetrically around the center.

        The output always has exactly the target dimensions. Content is
        never distorted and the target is never padded; whichever source
        axis overshoots loses its edges in equal amounts.
    */
    Cover,
    /**
        Shrink uniformly until the source fits inside the target bounds.

        Aspect ratio is preserved and nothing is cropped, so the output
        is usually smaller than the bounds on one axis. Sources already
        within bounds pass through at their original size; this mode
        never upscales.
    */
    Within,
    /**
        Resize directly to the target dimensions, ignoring aspect ratio.
    */
    Exact,
}

/**
    Crop region in pixels, relative to the scaled image.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/**
    A computed fit: the size of the uniform resize step and the crop to
    apply afterwards.

    `crop` is always contained in `scaled_width x scaled_height`, and
    `crop.width x crop.height` is the output size.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FitPlan {
    /// Width of the uniform resize step.
    pub scaled_width: u32,
    /// Height of the uniform resize step.
    pub scaled_height: u32,
    /// Region of the scaled image that becomes the output.
    pub crop: CropRect,
}

impl FitPlan {
    /**
        Returns the output dimensions this plan produces.
    */
    pub fn output_size(&self) -> (u32, u32) {
        (self.crop.width, self.crop.height)
    }

    /**
        Returns true if executing this plan on a source of the given
        size would leave every pixel untouched.
    */
    pub fn is_identity(&self, source_width: u32, source_height: u32) -> bool {
        self.scaled_width == source_width
            && self.scaled_height == source_height
            && self.crop.x == 0
            && self.crop.y == 0
            && self.crop.width == source_width
            && self.crop.height == source_height
    }

    fn uncropped(width: u32, height: u32) -> Self {
        Self {
            scaled_width: width,
            scaled_height: height,
            crop: CropRect {
                x: 0,
                y: 0,
                width,
                height,
            },
        }
    }
}

/**
    Compute the fit plan for mapping `source_width x source_height` into
    `target_width x target_height` under the given mode.

    Fails with [`Error::InvalidDimension`] if any dimension is zero.
*/
pub fn plan(
    mode: FitMode,
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> Result<FitPlan> {
    if source_width == 0 || source_height == 0 {
        return Err(Error::invalid_dimension(source_width, source_height));
    }
    if target_width == 0 || target_height == 0 {
        return Err(Error::invalid_dimension(target_width, target_height));
    }

    Ok(match mode {
        FitMode::Cover => cover(source_width, source_height, target_width, target_height),
        FitMode::Within => within(source_width, source_height, target_width, target_height),
        FitMode::Exact => FitPlan::uncropped(target_width, target_height),
    })
}

fn cover(sw: u32, sh: u32, tw: u32, th: u32) -> FitPlan {
    // Matching aspect ratios scale straight to the target with no crop.
    // Cross-multiplied in u64 so the comparison is exact.
    if sw as u64 * th as u64 == sh as u64 * tw as u64 {
        return FitPlan::uncropped(tw, th);
    }

    let scale = f64::max(tw as f64 / sw as f64, th as f64 / sh as f64);

    // Round to the nearest pixel, then clamp up so rounding can never
    // leave the scaled image short of the target on either axis.
    let scaled_width = ((sw as f64 * scale).round() as u32).max(tw);
    let scaled_height = ((sh as f64 * scale).round() as u32).max(th);

    FitPlan {
        scaled_width,
        scaled_height,
        crop: CropRect {
            x: (scaled_width - tw) / 2,
            y: (scaled_height - th) / 2,
            width: tw,
            height: th,
        },
    }
}

fn within(sw: u32, sh: u32, max_w: u32, max_h: u32) -> FitPlan {
    let scale = f64::min(max_w as f64 / sw as f64, max_h as f64 / sh as f64);
    if scale >= 1.0 {
        return FitPlan::uncropped(sw, sh);
    }

    // Extreme aspect ratios can round an axis down to zero; one pixel
    // is the floor.
    let scaled_width = ((sw as f64 * scale).round() as u32).clamp(1, max_w);
    let scaled_height = ((sh as f64 * scale).round() as u32).clamp(1, max_h);

    FitPlan::uncropped(scaled_width, scaled_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover_plan(sw: u32, sh: u32, tw: u32, th: u32) -> FitPlan {
        plan(FitMode::Cover, sw, sh, tw, th).unwrap()
    }

    #[test]
    fn cover_landscape_into_smaller_slot() {
        // 16:9 into 4:3 — height drives the scale, width overflows.
        let p = cover_plan(1920, 1080, 640, 480);

        assert_eq!(p.scaled_width, 853);
        assert_eq!(p.scaled_height, 480);
        assert_eq!(p.crop.x, 106);
        assert_eq!(p.crop.y, 0);
        assert_eq!(p.output_size(), (640, 480));
    }

    #[test]
    fn cover_matching_aspect_upscales_without_crop() {
        let p = cover_plan(640, 360, 1280, 720);

        assert_eq!(p.scaled_width, 1280);
        assert_eq!(p.scaled_height, 720);
        assert_eq!(p.crop.x, 0);
        assert_eq!(p.crop.y, 0);
    }

    #[test]
    fn cover_upscale_with_crop() {
        // 4:3 into 16:9 — width drives the scale, height overflows.
        let p = cover_plan(640, 480, 1280, 720);

        assert_eq!(p.scaled_width, 1280);
        assert_eq!(p.scaled_height, 960);
        assert_eq!(p.crop.x, 0);
        assert_eq!(p.crop.y, 120);
        assert_eq!(p.output_size(), (1280, 720));
    }

    #[test]
    fn cover_portrait_into_landscape() {
        let p = cover_plan(1080, 1920, 1280, 720);

        assert_eq!(p.scaled_width, 1280);
        assert_eq!(p.scaled_height, 2276);
        assert_eq!(p.crop.x, 0);
        assert_eq!(p.crop.y, 778);
        assert_eq!(p.output_size(), (1280, 720));
    }

    #[test]
    fn cover_identity_when_source_equals_target() {
        let p = cover_plan(640, 480, 640, 480);
        assert!(p.is_identity(640, 480));
    }

    #[test]
    fn cover_scaled_image_always_covers_target() {
        let cases = [
            (1920, 1080, 640, 480),
            (640, 480, 1280, 720),
            (1080, 1920, 1280, 720),
            (800, 800, 640, 360),
            (123, 457, 640, 480),
            (3, 5000, 640, 480),
        ];

        for (sw, sh, tw, th) in cases {
            let p = cover_plan(sw, sh, tw, th);
            assert!(p.scaled_width >= tw, "{sw}x{sh} -> {tw}x{th}");
            assert!(p.scaled_height >= th, "{sw}x{sh} -> {tw}x{th}");
            // One axis matches the target exactly; the scale is minimal.
            assert!(
                p.scaled_width == tw || p.scaled_height == th,
                "{sw}x{sh} -> {tw}x{th} overshoots both axes"
            );
            // Crop stays within the scaled image.
            assert!(p.crop.x + p.crop.width <= p.scaled_width);
            assert!(p.crop.y + p.crop.height <= p.scaled_height);
            assert_eq!(p.output_size(), (tw, th));
        }
    }

    #[test]
    fn cover_crop_is_centered() {
        let p = cover_plan(1920, 1080, 640, 480);
        let left = p.crop.x;
        let right = p.scaled_width - p.crop.width - p.crop.x;
        // Odd overflow puts the extra pixel on the trailing edge.
        assert!(right == left || right == left + 1);
        assert_eq!(left, 106);
        assert_eq!(right, 107);
    }

    #[test]
    fn within_shrinks_preserving_aspect() {
        let p = plan(FitMode::Within, 1600, 1200, 800, 600).unwrap();
        assert_eq!(p.output_size(), (800, 600));
        assert_eq!(p.crop.x, 0);
        assert_eq!(p.crop.y, 0);
    }

    #[test]
    fn within_never_upscales() {
        let p = plan(FitMode::Within, 320, 240, 800, 600).unwrap();
        assert!(p.is_identity(320, 240));
    }

    #[test]
    fn within_bounded_by_tighter_axis() {
        // 1920x1080 into 800x600: width is the tighter bound.
        let p = plan(FitMode::Within, 1920, 1080, 800, 600).unwrap();
        assert_eq!(p.scaled_width, 800);
        assert_eq!(p.scaled_height, 450);
    }

    #[test]
    fn within_extreme_aspect_keeps_one_pixel() {
        let p = plan(FitMode::Within, 10000, 10, 100, 100).unwrap();
        assert_eq!(p.scaled_width, 100);
        assert!(p.scaled_height >= 1);
    }

    #[test]
    fn exact_ignores_aspect() {
        let p = plan(FitMode::Exact, 1920, 1080, 240, 180).unwrap();
        assert_eq!(p.scaled_width, 240);
        assert_eq!(p.scaled_height, 180);
        assert_eq!(p.output_size(), (240, 180));
    }

    #[test]
    fn zero_dimensions_rejected() {
        for mode in [FitMode::Cover, FitMode::Within, FitMode::Exact] {
            assert!(matches!(
                plan(mode, 0, 480, 640, 480),
                Err(Error::InvalidDimension { .. })
            ));
            assert!(matches!(
                plan(mode, 640, 0, 640, 480),
                Err(Error::InvalidDimension { .. })
            ));
            assert!(matches!(
                plan(mode, 640, 480, 0, 480),
                Err(Error::InvalidDimension { .. })
            ));
            assert!(matches!(
                plan(mode, 640, 480, 640, 0),
                Err(Error::InvalidDimension { .. })
            ));
        }
    }
}
