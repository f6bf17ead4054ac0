use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use yew::prelude::*;

use crate::config;
use crate::dom;
use crate::rate_limit::throttle;
use crate::scheduler::BrowserScheduler;

/// One-way record of whether an element has ever been on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latch {
    #[default]
    Unseen,
    Seen,
}

impl Latch {
    /// Feed a visibility reading. Returns true only for the reading that
    /// moves the latch from `Unseen` to `Seen`.
    pub fn observe(&mut self, visible: bool) -> bool {
        match (*self, visible) {
            (Latch::Unseen, true) => {
                *self = Latch::Seen;
                true
            }
            _ => false,
        }
    }

    pub fn is_seen(self) -> bool {
        self == Latch::Seen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityState {
    pub is_visible: bool,
    pub has_been_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub throttle_ms: u32,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: config::VIEWPORT_THRESHOLD,
            throttle_ms: config::SCROLL_THROTTLE_MS,
        }
    }
}

pub struct VisibilityCallbacks {
    pub on_change: Callback<VisibilityState>,
    /// Fires once, the first time the element is seen.
    pub on_enter: Option<Callback<()>>,
}

struct TrackerState {
    /// `None` until the first check, which always publishes.
    is_visible: Option<bool>,
    latch: Latch,
}

struct TrackerInner {
    sensor: Box<dyn Fn() -> bool>,
    callbacks: VisibilityCallbacks,
    state: RefCell<TrackerState>,
}

/// Re-runs a visibility sensor and keeps the latest reading next to the
/// one-way "seen" latch.
#[derive(Clone)]
pub struct VisibilityTracker {
    inner: Rc<TrackerInner>,
}

impl VisibilityTracker {
    pub fn new<F>(sensor: F, callbacks: VisibilityCallbacks) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self {
            inner: Rc::new(TrackerInner {
                sensor: Box::new(sensor),
                callbacks,
                state: RefCell::new(TrackerState {
                    is_visible: None,
                    latch: Latch::Unseen,
                }),
            }),
        }
    }

    pub fn state(&self) -> VisibilityState {
        let state = self.inner.state.borrow();
        VisibilityState {
            is_visible: state.is_visible.unwrap_or(false),
            has_been_visible: state.latch.is_seen(),
        }
    }

    pub fn check(&self) {
        let visible = (self.inner.sensor)();
        let (changed, entered) = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.is_visible != Some(visible);
            state.is_visible = Some(visible);
            (changed, state.latch.observe(visible))
        };

        if changed {
            self.inner.callbacks.on_change.emit(self.state());
        }
        if entered {
            if let Some(on_enter) = &self.inner.callbacks.on_enter {
                on_enter.emit(());
            }
        }
    }
}

/// Whether the element behind `node` is on screen, and whether it ever was.
#[hook]
pub fn use_in_viewport(node: NodeRef, options: VisibilityOptions) -> VisibilityState {
    use_in_viewport_with(node, options, None)
}

/// [`use_in_viewport`] that also calls `on_enter` once, on the first sighting.
#[hook]
pub fn use_in_viewport_with(
    node: NodeRef,
    options: VisibilityOptions,
    on_enter: Option<Callback<()>>,
) -> VisibilityState {
    let state = use_state_eq(VisibilityState::default);

    {
        let setter = state.setter();
        use_effect_with_deps(
            move |(node, options, on_enter)| {
                let threshold = options.threshold;
                let sensor = {
                    let node = node.clone();
                    move || {
                        node.cast::<web_sys::Element>()
                            .map(|element| dom::is_element_in_viewport(&element, threshold))
                            .unwrap_or(false)
                    }
                };
                let tracker = VisibilityTracker::new(
                    sensor,
                    VisibilityCallbacks {
                        on_change: Callback::from(move |state| setter.set(state)),
                        on_enter: on_enter.clone(),
                    },
                );
                tracker.check();

                // Scroll and resize share one throttle window.
                let on_event = {
                    let tracker = tracker.clone();
                    Rc::new(RefCell::new(throttle(
                        BrowserScheduler,
                        options.throttle_ms,
                        move |()| tracker.check(),
                    )))
                };
                let listeners = web_sys::window()
                    .map(|window| {
                        ["scroll", "resize"]
                            .into_iter()
                            .map(|event| {
                                let on_event = on_event.clone();
                                EventListener::new(&window, event, move |_| (&mut *on_event.borrow_mut())(()))
                            })
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                move || {
                    drop(listeners);
                    drop(tracker);
                }
            },
            (node, options, on_enter),
        );
    }

    *state
}
