use std::collections::HashSet;

use opencv::core::Mat;
use opencv::highgui;

use crate::display::domain::display_surface::DisplaySurface;

/// On-screen windows through OpenCV HighGUI.
///
/// Windows are created lazily on first show and destroyed on drop.
#[derive(Default)]
pub struct HighguiSurface {
    windows: HashSet<String>,
}

impl HighguiSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySurface for HighguiSurface {
    fn show(&mut self, window: &str, image: &Mat) -> Result<(), Box<dyn std::error::Error>> {
        if self.windows.insert(window.to_string()) {
            highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;
        }
        highgui::imshow(window, image)?;
        Ok(())
    }

    fn wait_key(&mut self, delay_ms: i32) -> Result<i32, Box<dyn std::error::Error>> {
        Ok(highgui::wait_key(delay_ms)?)
    }
}

impl Drop for HighguiSurface {
    fn drop(&mut self) {
        if !self.windows.is_empty() {
            let _ = highgui::destroy_all_windows();
        }
    }
}
