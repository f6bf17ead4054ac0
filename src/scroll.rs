use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use yew::prelude::*;

use crate::config;
use crate::dom;
use crate::measure::ScrollMetrics;
use crate::rate_limit::{debounce, Debounced, Throttle};
use crate::scheduler::{BrowserScheduler, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub offset: f64,
    pub percentage: f64,
    pub is_scrolling: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Scrolling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub throttle_ms: u32,
    pub debounce_ms: u32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            throttle_ms: config::SCROLL_THROTTLE_MS,
            debounce_ms: config::SCROLL_DEBOUNCE_MS,
        }
    }
}

pub struct ScrollCallbacks {
    /// Receives every snapshot the tracker publishes.
    pub on_change: Callback<ScrollSnapshot>,
    /// `(offset, percentage)` for every admitted scroll event.
    pub on_scroll: Option<Callback<(f64, f64)>>,
    pub on_scroll_end: Option<Callback<()>>,
}

struct TrackerState {
    phase: ScrollPhase,
    snapshot: ScrollSnapshot,
    throttle: Throttle,
}

struct TrackerInner<S: Scheduler> {
    scheduler: S,
    quiet: Debounced<S, ()>,
    sample: Box<dyn Fn() -> ScrollMetrics>,
    callbacks: ScrollCallbacks,
    state: RefCell<TrackerState>,
}

/// Follows the page scroll position and whether the user is scrolling.
///
/// Each raw scroll event restarts a quiet timer; the tracker goes back to
/// idle once `debounce_ms` pass without one. Position samples are throttled
/// to one per `throttle_ms`. Dropping the last clone cancels the quiet timer.
pub struct ScrollTracker<S: Scheduler> {
    inner: Rc<TrackerInner<S>>,
}

impl<S: Scheduler> Clone for ScrollTracker<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Scheduler> ScrollTracker<S> {
    pub fn new<F>(scheduler: S, options: ScrollOptions, sample: F, callbacks: ScrollCallbacks) -> Self
    where
        F: Fn() -> ScrollMetrics + 'static,
    {
        let inner = Rc::new_cyclic(|weak: &Weak<TrackerInner<S>>| {
            let weak = weak.clone();
            let quiet = debounce(scheduler.clone(), options.debounce_ms, move |()| {
                if let Some(inner) = weak.upgrade() {
                    ScrollTracker { inner }.settle();
                }
            });
            TrackerInner {
                scheduler,
                quiet,
                sample: Box::new(sample),
                callbacks,
                state: RefCell::new(TrackerState {
                    phase: ScrollPhase::Idle,
                    snapshot: ScrollSnapshot::default(),
                    throttle: Throttle::new(options.throttle_ms),
                }),
            }
        });
        Self { inner }
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.inner.state.borrow().snapshot
    }

    pub fn phase(&self) -> ScrollPhase {
        self.inner.state.borrow().phase
    }

    /// Publish the current position without touching the phase. Used on mount.
    pub fn sync(&self) {
        let metrics = (self.inner.sample)();
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            state.snapshot.offset = metrics.scroll_top;
            state.snapshot.percentage = metrics.percentage();
            state.snapshot
        };
        self.inner.callbacks.on_change.emit(snapshot);
    }

    pub fn handle_event(&self) {
        let inner = &self.inner;
        let now = inner.scheduler.now();
        inner.quiet.call(());

        let admitted = {
            let mut state = inner.state.borrow_mut();
            if state.throttle.admit(now) {
                let metrics = (inner.sample)();
                state.phase = ScrollPhase::Scrolling;
                state.snapshot = ScrollSnapshot {
                    offset: metrics.scroll_top,
                    percentage: metrics.percentage(),
                    is_scrolling: true,
                };
                Some(state.snapshot)
            } else {
                None
            }
        };

        if let Some(snapshot) = admitted {
            inner.callbacks.on_change.emit(snapshot);
            if let Some(on_scroll) = &inner.callbacks.on_scroll {
                on_scroll.emit((snapshot.offset, snapshot.percentage));
            }
        }
    }

    fn settle(&self) {
        let inner = &self.inner;
        let settled = {
            let mut state = inner.state.borrow_mut();
            if state.phase != ScrollPhase::Scrolling {
                None
            } else {
                // Throttling drops trailing events, so take one last sample
                // to report where the page actually came to rest.
                let metrics = (inner.sample)();
                let moved = metrics.scroll_top != state.snapshot.offset;
                state.phase = ScrollPhase::Idle;
                // The next event after going idle always gets through.
                state.throttle.reset();
                state.snapshot = ScrollSnapshot {
                    offset: metrics.scroll_top,
                    percentage: metrics.percentage(),
                    is_scrolling: false,
                };
                Some((state.snapshot, moved))
            }
        };

        let Some((snapshot, moved)) = settled else {
            return;
        };
        inner.callbacks.on_change.emit(snapshot);
        if moved {
            if let Some(on_scroll) = &inner.callbacks.on_scroll {
                on_scroll.emit((snapshot.offset, snapshot.percentage));
            }
        }
        if let Some(on_scroll_end) = &inner.callbacks.on_scroll_end {
            on_scroll_end.emit(());
        }
    }
}

/// Window scroll position, percentage and an "is scrolling" flag.
#[hook]
pub fn use_scroll(
    options: ScrollOptions,
    on_scroll: Option<Callback<(f64, f64)>>,
    on_scroll_end: Option<Callback<()>>,
) -> ScrollSnapshot {
    let snapshot = use_state_eq(ScrollSnapshot::default);

    {
        let setter = snapshot.setter();
        use_effect_with_deps(
            move |(options, on_scroll, on_scroll_end)| {
                let tracker = ScrollTracker::new(
                    BrowserScheduler,
                    *options,
                    || dom::scroll_metrics_or_top(dom::window_scroll_metrics()),
                    ScrollCallbacks {
                        on_change: Callback::from(move |snapshot| setter.set(snapshot)),
                        on_scroll: on_scroll.clone(),
                        on_scroll_end: on_scroll_end.clone(),
                    },
                );
                tracker.sync();

                let listener = web_sys::window().map(|window| {
                    let tracker = tracker.clone();
                    EventListener::new(&window, "scroll", move |_| tracker.handle_event())
                });
                log::debug!("scroll tracking attached ({:?})", options);

                move || {
                    drop(listener);
                    drop(tracker);
                    log::debug!("scroll tracking detached");
                }
            },
            (options, on_scroll, on_scroll_end),
        );
    }

    *snapshot
}
