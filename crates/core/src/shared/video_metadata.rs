use crate::shared::video_source::VideoSource;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// `None` when the source cannot report a positive frame count (cameras).
    pub total_frames: Option<usize>,
    pub source: VideoSource,
}

impl VideoMetadata {
    /// Frame count worth sizing a timing buffer for: bounded, non-camera sources only.
    pub fn bounded_frame_count(&self) -> Option<usize> {
        if self.source.is_camera() {
            return None;
        }
        self.total_frames.filter(|&n| n > 0)
    }
}

/// Maps a raw `CAP_PROP_FRAME_COUNT` reading to a known frame count.
pub fn frame_count_from_property(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 1.0 {
        Some(value as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn meta(source: VideoSource, total_frames: Option<usize>) -> VideoMetadata {
        VideoMetadata {
            width: 640,
            height: 480,
            fps: 30.0,
            total_frames,
            source,
        }
    }

    #[test]
    fn test_file_with_count_is_bounded() {
        let m = meta(VideoSource::FilePath(PathBuf::from("a.mp4")), Some(10));
        assert_eq!(m.bounded_frame_count(), Some(10));
    }

    #[test]
    fn test_camera_is_never_bounded() {
        let m = meta(VideoSource::CameraIndex(0), Some(10));
        assert_eq!(m.bounded_frame_count(), None);
    }

    #[test]
    fn test_file_without_count_is_unbounded() {
        let m = meta(VideoSource::FilePath(PathBuf::from("a.mp4")), None);
        assert_eq!(m.bounded_frame_count(), None);
    }

    #[test]
    fn test_zero_count_is_unbounded() {
        let m = meta(VideoSource::FilePath(PathBuf::from("a.mp4")), Some(0));
        assert_eq!(m.bounded_frame_count(), None);
    }

    #[rstest]
    #[case::camera(-1.0, None)]
    #[case::zero(0.0, None)]
    #[case::nan(f64::NAN, None)]
    #[case::ten(10.0, Some(10))]
    #[case::fractional(10.7, Some(10))]
    fn test_frame_count_from_property(#[case] value: f64, #[case] expected: Option<usize>) {
        assert_eq!(frame_count_from_property(value), expected);
    }
}
