use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::frame::Frame;
use crate::shared::video_metadata::{frame_count_from_property, VideoMetadata};
use crate::shared::video_source::VideoSource;
use crate::video::domain::frame_source::FrameSource;

/// Cameras and video files through OpenCV `videoio`.
#[derive(Default)]
pub struct CaptureReader {
    capture: Option<VideoCapture>,
    next_index: usize,
}

impl CaptureReader {
    pub fn new() -> Self {
        Self::default()
    }
}

fn open_capture(source: &VideoSource) -> Result<VideoCapture, Box<dyn std::error::Error>> {
    let capture = match source {
        VideoSource::CameraIndex(index) => VideoCapture::new(*index, videoio::CAP_ANY)?,
        VideoSource::FilePath(path) => {
            let path = path
                .to_str()
                .ok_or_else(|| format!("Video path is not valid UTF-8: {}", path.display()))?;
            VideoCapture::from_file(path, videoio::CAP_ANY)?
        }
    };
    if !capture.is_opened()? {
        return Err(format!("Video source can't be opened: {source}").into());
    }
    Ok(capture)
}

impl FrameSource for CaptureReader {
    fn open(&mut self, source: &VideoSource) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        let capture = open_capture(source)?;

        let metadata = VideoMetadata {
            width: capture.get(videoio::CAP_PROP_FRAME_WIDTH)?.max(0.0) as u32,
            height: capture.get(videoio::CAP_PROP_FRAME_HEIGHT)?.max(0.0) as u32,
            fps: capture.get(videoio::CAP_PROP_FPS)?,
            total_frames: frame_count_from_property(capture.get(videoio::CAP_PROP_FRAME_COUNT)?),
            source: source.clone(),
        };
        self.capture = Some(capture);
        self.next_index = 0;
        Ok(metadata)
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let capture = self
            .capture
            .as_mut()
            .ok_or("CaptureReader: not opened")?;
        let mut mat = Mat::default();
        if !capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        let frame = Frame::new(mat, self.next_index);
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            let _ = capture.release();
        }
    }
}
