//! Pure measurement helpers shared by the hooks. Nothing in here touches the
//! DOM; `dom.rs` reads the numbers and hands them over.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn percentage(&self) -> f64 {
        scroll_percentage(self)
    }
}

/// How far the document is scrolled, 0 to 100.
///
/// A page that cannot scroll reports 0 instead of dividing by zero.
pub fn scroll_percentage(metrics: &ScrollMetrics) -> f64 {
    let scrollable = metrics.scroll_height - metrics.client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (metrics.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Bounding box relative to the viewport, as `getBoundingClientRect` reports it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// Whether `rect` counts as on screen.
///
/// The top edge has to be above `height * (1 - threshold)` and the bottom
/// edge below `height * threshold`, with any horizontal overlap. This only
/// approximates "threshold of the element is showing"; it is not an area
/// intersection.
pub fn is_in_viewport(rect: Rect, viewport: ViewportSize, threshold: f64) -> bool {
    let vertical = rect.top < viewport.height * (1.0 - threshold)
        && rect.bottom > viewport.height * threshold;
    let horizontal = rect.left < viewport.width && rect.right > 0.0;
    vertical && horizontal
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// `1 - (1 - t)^3`, the curve the statistic counters use.
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve. Out-of-range input is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}
