use log::Level;

/// ~60 Hz ceiling for scroll/resize handlers.
pub const SCROLL_THROTTLE_MS: u32 = 16;
/// Quiet period after the last scroll event before the page counts as idle.
pub const SCROLL_DEBOUNCE_MS: u32 = 100;
/// Fraction of the viewport an element has to reach before it counts as visible.
pub const VIEWPORT_THRESHOLD: f64 = 0.1;
pub const COUNTER_DURATION_MS: f64 = 2000.0;
/// Height of the sticky header, subtracted when jumping to an anchor.
pub const ANCHOR_OFFSET_PX: f64 = 80.0;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose listener/animation lifecycle while developing
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
