pub mod color;
pub mod constants;
pub mod frame;
pub mod region;
pub mod video_metadata;
pub mod video_source;
