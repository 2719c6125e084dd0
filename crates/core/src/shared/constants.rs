pub const DEFAULT_MODEL_NAME: &str = "haarcascade_frontalface_default.xml";

pub const HAAR_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades";
pub const LBP_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/lbpcascades";

/// Multi-scale pyramid step passed to every cascade.
pub const DETECTION_SCALE_FACTOR: f64 = 1.2;
pub const DETECTION_MIN_NEIGHBORS: i32 = 3;

/// Longer side of the working resolution, in pixels.
pub const WORKING_LONG_SIDE: u32 = 640;

pub const MAIN_WINDOW_TITLE: &str = "Face detection with HCC";
pub const PREVIEW_WINDOW_TITLE: &str = "Processed frame preview";
pub const DEFAULT_DISPLAY_SCALE: f64 = 0.4;

pub const ESC_KEY: i32 = 27;
/// `wait_key` delay while streaming; 0 blocks until a key is pressed.
pub const STREAM_KEY_DELAY_MS: i32 = 1;
pub const IMAGE_KEY_DELAY_MS: i32 = 0;

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";
