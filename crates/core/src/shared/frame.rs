use opencv::core::Mat;
use opencv::prelude::*;

/// Width and height of a frame, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_cv(self) -> opencv::core::Size {
        opencv::core::Size::new(self.width as i32, self.height as i32)
    }
}

/// A single decoded video/image frame in OpenCV's BGR layout.
///
/// `index` is the zero-based decode position within its source.
#[derive(Clone)]
pub struct Frame {
    mat: Mat,
    index: usize,
}

impl Frame {
    pub fn new(mat: Mat, index: usize) -> Self {
        Self { mat, index }
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn width(&self) -> u32 {
        self.mat.cols().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.mat.rows().max(0) as u32
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width(), self.height())
    }

    pub fn channels(&self) -> i32 {
        self.mat.channels()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.mat.empty()
    }
}
