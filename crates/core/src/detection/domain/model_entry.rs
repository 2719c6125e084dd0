use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::color::Color;
use crate::shared::region::Shape;

/// A loaded model together with how its detections are drawn.
///
/// The shape is derived from the detector's native window once, at
/// construction, and stays fixed for the rest of the run.
pub struct ModelEntry {
    name: String,
    detector: Box<dyn ObjectDetector>,
    color: Color,
    shape: Shape,
}

impl ModelEntry {
    pub fn new(name: impl Into<String>, detector: Box<dyn ObjectDetector>, color: Color) -> Self {
        let (width, height) = detector.window_size();
        Self {
            name: name.into(),
            detector,
            color,
            shape: Shape::for_window(width, height),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn detector_mut(&mut self) -> &mut dyn ObjectDetector {
        self.detector.as_mut()
    }
}
