use opencv::core::{Mat, Size};
use opencv::imgproc;
use opencv::prelude::*;

use crate::display::domain::display_surface::DisplaySurface;
use crate::display::domain::layout::DisplayLayout;
use crate::display::infrastructure::overlay;
use crate::shared::constants::PREVIEW_WINDOW_TITLE;
use crate::shared::frame::FrameSize;
use crate::shared::region::Region;

/// Presentation state for a run: the working layout and the surface frames
/// are rendered to.
pub struct Display {
    surface: Box<dyn DisplaySurface>,
    layout: Option<DisplayLayout>,
}

impl Display {
    pub fn new(surface: Box<dyn DisplaySurface>) -> Self {
        Self {
            surface,
            layout: None,
        }
    }

    /// Derives the working layout from `frame`.
    ///
    /// Called once per run, on the first frame.
    pub fn set_orientation(&mut self, frame: FrameSize) -> DisplayLayout {
        let layout = DisplayLayout::for_frame(frame);
        log::info!(
            "{:?} input {}x{}, working resolution {}x{}",
            layout.orientation,
            frame.width,
            frame.height,
            layout.working.width,
            layout.working.height
        );
        self.layout = Some(layout);
        layout
    }

    pub fn working_size(&self) -> Option<FrameSize> {
        self.layout.map(|l| l.working)
    }

    /// Draws `regions` over a copy of `frame` and shows it in `title`,
    /// resized by `scale`.
    pub fn render(
        &mut self,
        frame: &Mat,
        regions: &[Region],
        title: &str,
        scale: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut canvas = frame.try_clone()?;
        overlay::draw_regions(&mut canvas, regions)?;
        let shown = resize_for_display(&canvas, scale)?;
        self.surface.show(title, &shown)
    }

    /// Shows the preprocessed working frame with working-space regions.
    pub fn render_preview(
        &mut self,
        processed: &Mat,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut canvas = Mat::default();
        if processed.channels() == 1 {
            imgproc::cvt_color_def(processed, &mut canvas, imgproc::COLOR_GRAY2BGR)?;
        } else {
            canvas = processed.try_clone()?;
        }
        overlay::draw_regions(&mut canvas, regions)?;
        self.surface.show(PREVIEW_WINDOW_TITLE, &canvas)
    }

    pub fn wait_key(&mut self, delay_ms: i32) -> Result<i32, Box<dyn std::error::Error>> {
        self.surface.wait_key(delay_ms)
    }
}

fn resize_for_display(image: &Mat, scale: f64) -> opencv::Result<Mat> {
    if (scale - 1.0).abs() < f64::EPSILON {
        return image.try_clone();
    }
    let mut out = Mat::default();
    imgproc::resize(
        image,
        &mut out,
        Size::default(),
        scale,
        scale,
        imgproc::INTER_AREA,
    )?;
    Ok(out)
}
