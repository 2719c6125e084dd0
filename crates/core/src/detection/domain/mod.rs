pub mod color_palette;
pub mod detector_set;
pub mod model_entry;
pub mod object_detector;
pub mod preprocessor;
