pub mod highgui_surface;
pub mod overlay;
