pub mod detection;
pub mod display;
pub mod pipeline;
pub mod settings;
pub mod shared;
pub mod video;
