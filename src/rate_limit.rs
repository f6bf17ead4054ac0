use std::cell::RefCell;
use std::rc::Rc;

use crate::scheduler::Scheduler;

/// Leading-edge throttle window.
///
/// The first call is admitted and opens a window of `interval_ms`. Calls
/// inside the window are dropped, not queued. The first call after the
/// window has elapsed is admitted and opens a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            window_start: None,
        }
    }

    pub fn admit(&mut self, now: f64) -> bool {
        let open = match self.window_start {
            None => true,
            Some(start) => now - start >= self.interval_ms,
        };
        if open {
            self.window_start = Some(now);
        }
        open
    }

    pub fn reset(&mut self) {
        self.window_start = None;
    }
}

/// Wrap `f` so it runs at most once per `interval_ms`.
pub fn throttle<S, A, F>(scheduler: S, interval_ms: u32, mut f: F) -> impl FnMut(A)
where
    S: Scheduler,
    F: FnMut(A),
{
    let mut window = Throttle::new(interval_ms);
    move |arg| {
        if window.admit(scheduler.now()) {
            f(arg);
        }
    }
}

struct DebounceInner<S: Scheduler, A> {
    pending: Option<S::Handle>,
    latest: Option<A>,
}

/// Delays a call until `wait_ms` pass without another one.
///
/// Only the argument of the last call in a burst is delivered. Dropping the
/// debouncer cancels whatever is still waiting.
pub struct Debounced<S: Scheduler, A: 'static> {
    scheduler: S,
    wait_ms: u32,
    callback: Rc<dyn Fn(A)>,
    inner: Rc<RefCell<DebounceInner<S, A>>>,
}

pub fn debounce<S, A, F>(scheduler: S, wait_ms: u32, f: F) -> Debounced<S, A>
where
    S: Scheduler,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        scheduler,
        wait_ms,
        callback: Rc::new(f),
        inner: Rc::new(RefCell::new(DebounceInner {
            pending: None,
            latest: None,
        })),
    }
}

impl<S: Scheduler, A: 'static> Debounced<S, A> {
    pub fn call(&self, arg: A) {
        let inner = Rc::downgrade(&self.inner);
        let callback = self.callback.clone();
        let handle = self.scheduler.timeout(
            self.wait_ms,
            Box::new(move || {
                let Some(inner) = inner.upgrade() else {
                    return;
                };
                let arg = {
                    let mut inner = inner.borrow_mut();
                    inner.pending = None;
                    inner.latest.take()
                };
                if let Some(arg) = arg {
                    callback(arg);
                }
            }),
        );
        // Replacing the handle drops, and so cancels, the previous timer.
        let previous = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = Some(arg);
            inner.pending.replace(handle)
        };
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = None;
            inner.pending.take()
        };
        drop(previous);
    }

    pub fn is_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }
}
