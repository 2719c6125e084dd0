pub mod display_surface;
pub mod layout;
