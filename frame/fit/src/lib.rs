/*!
    Frame fitting for the frame crate ecosystem.

    This crate maps frames of arbitrary dimensions onto fixed rectangles:
    - **Cover**: fill a slot completely, center-cropping the overflow
    - **Within**: shrink to fit inside bounds, never cropping or upscaling
    - **Exact**: resize to the rectangle, ignoring aspect ratio

    This is the geometry layer between sources and display. Participant
    tiles in a grid use Cover so every slot is filled edge to edge with
    undistorted content; outbound screen shares use Within so large
    captures shrink without losing anything; outbound camera frames use
    Exact to hit the negotiated transmit size.

    # Fitting Frames

    ```ignore
    use frame_fit::FrameFitter;

    // Fill 640x480 slots, cropping whatever overflows
    let fitter = FrameFitter::cover(640, 480);

    for frame in incoming_frames {
        let fitted = fitter.fit(&frame)?;
        // fitted is exactly 640x480, aspect preserved, center cropped
    }
    ```

    # Planning Only

    The dimension math is exposed separately for callers that lay out
    geometry without touching pixels:

    ```ignore
    use frame_fit::{plan, FitMode};

    let p = plan(FitMode::Cover, 1920, 1080, 640, 480)?;
    assert_eq!(p.scaled_width, 853);
    assert_eq!(p.crop.x, 106);
    ```

    # Stateless

    Fitters are stateless: each frame transforms independently and the
    plan is recomputed from the frame's own dimensions, so one fitter
    handles sources that change size mid-stream.
*/

pub use frame_types::{Error, PixelFormat, Result, VideoFrame};

mod fitter;
mod plan;

pub use fitter::{FrameFitter, ScalingAlgorithm, fit};
pub use plan::{CropRect, FitMode, FitPlan, plan};
