use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::shared::video_source::VideoSource;

/// Reads frames from a camera, video file or still image.
///
/// Implementations handle device and codec details while the pipeline works
/// with the abstract `Frame` and `VideoMetadata` types.
pub trait FrameSource: Send {
    /// Opens the source and returns its metadata.
    fn open(&mut self, source: &VideoSource) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Next frame in decode order; `Ok(None)` once the source is exhausted.
    fn read_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
