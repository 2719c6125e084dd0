use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where streaming frames come from.
///
/// A purely numeric source string selects a camera by index; anything else
/// is treated as a video file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoSource {
    CameraIndex(i32),
    FilePath(PathBuf),
}

impl VideoSource {
    pub fn parse(source: &str) -> Self {
        let numeric = !source.is_empty() && source.bytes().all(|b| b.is_ascii_digit());
        match source.parse::<i32>() {
            Ok(index) if numeric => VideoSource::CameraIndex(index),
            _ => VideoSource::FilePath(PathBuf::from(source)),
        }
    }

    pub fn is_camera(&self) -> bool {
        matches!(self, VideoSource::CameraIndex(_))
    }
}

impl FromStr for VideoSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSource::CameraIndex(index) => write!(f, "camera {index}"),
            VideoSource::FilePath(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_camera("0", VideoSource::CameraIndex(0))]
    #[case::second_camera("1", VideoSource::CameraIndex(1))]
    #[case::leading_zero("007", VideoSource::CameraIndex(7))]
    #[case::video_file("clip.mp4", VideoSource::FilePath(PathBuf::from("clip.mp4")))]
    #[case::negative("-1", VideoSource::FilePath(PathBuf::from("-1")))]
    #[case::signed("+1", VideoSource::FilePath(PathBuf::from("+1")))]
    #[case::empty("", VideoSource::FilePath(PathBuf::new()))]
    #[case::overflow("99999999999", VideoSource::FilePath(PathBuf::from("99999999999")))]
    fn test_parse(#[case] input: &str, #[case] expected: VideoSource) {
        assert_eq!(VideoSource::parse(input), expected);
    }

    #[test]
    fn test_from_str_matches_parse() {
        let source: VideoSource = "3".parse().unwrap();
        assert_eq!(source, VideoSource::CameraIndex(3));
    }

    #[test]
    fn test_is_camera() {
        assert!(VideoSource::CameraIndex(0).is_camera());
        assert!(!VideoSource::FilePath(PathBuf::from("a.avi")).is_camera());
    }

    #[test]
    fn test_display() {
        assert_eq!(VideoSource::CameraIndex(2).to_string(), "camera 2");
        assert_eq!(
            VideoSource::FilePath(PathBuf::from("/tmp/a.avi")).to_string(),
            "/tmp/a.avi"
        );
    }
}
