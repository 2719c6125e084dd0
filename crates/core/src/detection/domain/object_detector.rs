use opencv::core::Mat;

/// Axis-aligned detector output, in the coordinates of the frame it ran on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Domain interface for a loaded object-detection model.
///
/// `detect_regions` takes `&mut self` because OpenCV's cascade evaluation
/// mutates internal buffers.
pub trait ObjectDetector: Send {
    fn detect_regions(
        &mut self,
        frame: &Mat,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>>;

    /// Native detection window `(width, height)` the model was trained on.
    fn window_size(&self) -> (i32, i32);
}
