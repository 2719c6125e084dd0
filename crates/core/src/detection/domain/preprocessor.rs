use opencv::core::Mat;
use opencv::imgproc;
use opencv::prelude::*;

use crate::shared::frame::{Frame, FrameSize};

/// Normalizes a frame for cascade detection: grayscale, area-resampled to
/// the working resolution, histogram-equalized.
///
/// Runs once per frame; every model in the detector set shares the result.
pub fn preprocess(frame: &Frame, working: FrameSize) -> Result<Mat, Box<dyn std::error::Error>> {
    if frame.is_empty() {
        return Err(format!("Cannot preprocess empty frame {}", frame.index()).into());
    }
    if working.width == 0 || working.height == 0 {
        return Err(format!(
            "Invalid working resolution {}x{}",
            working.width, working.height
        )
        .into());
    }

    let gray = if frame.channels() == 1 {
        frame.mat().try_clone()?
    } else {
        let mut gray = Mat::default();
        imgproc::cvt_color_def(frame.mat(), &mut gray, imgproc::COLOR_BGR2GRAY)?;
        gray
    };

    let mut resized = Mat::default();
    imgproc::resize(
        &gray,
        &mut resized,
        working.to_cv(),
        0.0,
        0.0,
        imgproc::INTER_AREA,
    )?;

    let mut equalized = Mat::default();
    imgproc::equalize_hist(&resized, &mut equalized)?;
    Ok(equalized)
}
