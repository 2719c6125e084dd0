use crate::shared::color::Color;
use crate::shared::frame::FrameSize;

/// Outline drawn around a detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Ellipse,
}

impl Shape {
    /// Square detection windows are treated as face-like and drawn as ellipses.
    pub fn for_window(width: i32, height: i32) -> Self {
        if width == height {
            Shape::Ellipse
        } else {
            Shape::Rectangle
        }
    }
}

/// Per-axis ratio between the original frame and the working resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub fn between(original: FrameSize, working: FrameSize) -> Self {
        Self {
            x: original.width as f64 / working.width as f64,
            y: original.height as f64 / working.height as f64,
        }
    }

    pub fn identity() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// A detected area with the color and shape used to draw it.
///
/// Coordinates live in whichever space the region was built for: working
/// space for the processed-frame preview, original-frame space otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    pub shape: Shape,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: Color, shape: Shape) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
            shape,
        }
    }

    /// Linear rescale of position and size, no rounding.
    pub fn rescaled(&self, scale: ScaleFactors) -> Self {
        Self {
            x: self.x * scale.x,
            y: self.y * scale.y,
            width: self.width * scale.x,
            height: self.height * scale.y,
            ..*self
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn semi_axes(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}
