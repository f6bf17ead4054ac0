use web_sys::{Element, ScrollBehavior, ScrollToOptions, Window};

use crate::measure::{self, Rect, ScrollMetrics, ViewportSize};

pub fn window_scroll_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let root = window.document()?.document_element()?;
    let metrics = ScrollMetrics {
        scroll_top: window.scroll_y().ok()?,
        scroll_height: f64::from(root.scroll_height()),
        client_height: f64::from(root.client_height()),
    };
    Some(metrics)
}

/// Falls back to the top of a non-scrollable page when the window could not
/// be measured.
pub fn scroll_metrics_or_top(metrics: Option<ScrollMetrics>) -> ScrollMetrics {
    metrics.unwrap_or_else(|| {
        log::warn!("Scroll metrics unavailable, reporting top of page");
        ScrollMetrics::default()
    })
}

pub fn viewport_size() -> Option<ViewportSize> {
    let window = web_sys::window()?;
    let root = window.document().and_then(|document| document.document_element());
    let height = window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .or_else(|| root.as_ref().map(|root| f64::from(root.client_height())))?;
    let width = window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .or_else(|| root.as_ref().map(|root| f64::from(root.client_width())))?;
    Some(ViewportSize { width, height })
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top(),
        left: rect.left(),
        bottom: rect.bottom(),
        right: rect.right(),
    }
}

pub fn is_element_in_viewport(element: &Element, threshold: f64) -> bool {
    match viewport_size() {
        Some(viewport) => measure::is_in_viewport(element_rect(element), viewport, threshold),
        None => {
            log::warn!("Viewport size unavailable, treating element as hidden");
            false
        }
    }
}

/// The pieces of the page a smooth anchor jump reads and writes.
pub trait ScrollSurface {
    /// Top edge of the element with `id`, relative to the viewport.
    fn element_top(&self, id: &str) -> Option<f64>;
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, top: f64);
}

pub struct WindowSurface {
    window: Window,
}

impl WindowSurface {
    pub fn current() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl ScrollSurface for WindowSurface {
    fn element_top(&self, id: &str) -> Option<f64> {
        let element = self.window.document()?.get_element_by_id(id)?;
        Some(element.get_bounding_client_rect().top())
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Smooth-scroll so the element with `id` sits `offset` pixels below the
/// top of the viewport. Returns false, without scrolling, if there is no
/// such element.
pub fn smooth_scroll_to<S: ScrollSurface>(surface: &S, id: &str, offset: f64) -> bool {
    let Some(top) = surface.element_top(id) else {
        log::debug!("No element with id '{}' to scroll to", id);
        return false;
    };
    let target = (top + surface.scroll_y() - offset).max(0.0);
    surface.scroll_to(target);
    true
}

pub fn scroll_to_anchor(id: &str, offset: f64) -> bool {
    WindowSurface::current()
        .map(|surface| smooth_scroll_to(&surface, id, offset))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSurface {
        elements: HashMap<&'static str, f64>,
        scroll_y: f64,
        scrolled_to: RefCell<Vec<f64>>,
    }

    impl ScrollSurface for FakeSurface {
        fn element_top(&self, id: &str) -> Option<f64> {
            self.elements.get(id).copied()
        }

        fn scroll_y(&self) -> f64 {
            self.scroll_y
        }

        fn scroll_to(&self, top: f64) {
            self.scrolled_to.borrow_mut().push(top);
        }
    }

    #[test]
    fn test_unreadable_scroll_metrics_fall_back_to_top() {
        let fallback = scroll_metrics_or_top(None);
        assert_eq!(fallback, ScrollMetrics::default());
        assert_eq!(fallback.percentage(), 0.0);

        let measured = ScrollMetrics {
            scroll_top: 400.0,
            scroll_height: 2400.0,
            client_height: 800.0,
        };
        assert_eq!(scroll_metrics_or_top(Some(measured)), measured);
    }

    #[test]
    fn test_missing_anchor_is_a_noop() {
        let surface = FakeSurface::default();
        assert!(!smooth_scroll_to(&surface, "nonexistent-id", 80.0));
        assert!(surface.scrolled_to.borrow().is_empty());
    }

    #[test]
    fn test_scrolls_to_element_minus_header_offset() {
        let surface = FakeSurface {
            elements: HashMap::from([("pricing", 600.0), ("contacts", -300.0)]),
            scroll_y: 1000.0,
            ..Default::default()
        };
        assert!(smooth_scroll_to(&surface, "pricing", 80.0));
        assert!(smooth_scroll_to(&surface, "contacts", 80.0));
        assert_eq!(*surface.scrolled_to.borrow(), vec![1520.0, 620.0]);
    }

    #[test]
    fn test_target_never_goes_above_the_page() {
        let surface = FakeSurface {
            elements: HashMap::from([("hero", 20.0)]),
            ..Default::default()
        };
        assert!(smooth_scroll_to(&surface, "hero", 80.0));
        assert_eq!(*surface.scrolled_to.borrow(), vec![0.0]);
    }
}
