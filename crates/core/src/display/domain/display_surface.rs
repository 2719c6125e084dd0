use opencv::core::Mat;

/// Where rendered frames end up and where key presses come from.
pub trait DisplaySurface: Send {
    /// Shows `image` in the window named `window`, creating it if needed.
    fn show(&mut self, window: &str, image: &Mat) -> Result<(), Box<dyn std::error::Error>>;

    /// Waits up to `delay_ms` for a key (0 waits forever); -1 if none.
    fn wait_key(&mut self, delay_ms: i32) -> Result<i32, Box<dyn std::error::Error>>;
}
