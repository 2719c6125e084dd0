use opencv::imgcodecs;
use opencv::prelude::*;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::shared::video_source::VideoSource;
use crate::video::domain::frame_source::FrameSource;

/// Adapts a single image file to the [`FrameSource`] interface.
///
/// Treats the image as a one-frame video with `fps=0` and `total_frames=1`,
/// so still images and streams share the detection path.
#[derive(Default)]
pub struct ImageFileReader {
    frame: Option<Frame>,
}

impl ImageFileReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSource for ImageFileReader {
    fn open(&mut self, source: &VideoSource) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        let VideoSource::FilePath(path) = source else {
            return Err(format!("ImageFileReader needs a file path, got {source}").into());
        };
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Image path is not valid UTF-8: {}", path.display()))?;

        // imread signals unreadable files with an empty matrix.
        let mat = imgcodecs::imread(path_str, imgcodecs::IMREAD_COLOR)?;
        if mat.empty() {
            return Err(format!("Failed to decode image {}", path.display()).into());
        }

        let frame = Frame::new(mat, 0);
        let metadata = VideoMetadata {
            width: frame.width(),
            height: frame.height(),
            fps: 0.0,
            total_frames: Some(1),
            source: source.clone(),
        };
        self.frame = Some(frame);
        Ok(metadata)
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        Ok(self.frame.take())
    }

    fn close(&mut self) {
        self.frame = None;
    }
}
