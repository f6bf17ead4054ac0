use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;

/// Source of time, timers and animation frames for the motion controllers.
///
/// Every scheduled task is owned by the returned handle. Dropping the handle
/// cancels the task if it has not run yet, so a controller that owns its
/// handles cannot leave timers or frames behind when it goes away.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    /// Milliseconds on the same clock animation frames are stamped with.
    fn now(&self) -> f64;

    fn timeout(&self, millis: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    fn animation_frame(&self, task: Box<dyn FnOnce(f64)>) -> Self::Handle;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserScheduler;

pub enum BrowserTask {
    Timeout(Timeout),
    Frame(AnimationFrame),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTask;

    fn now(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or_else(web_sys::js_sys::Date::now)
    }

    fn timeout(&self, millis: u32, task: Box<dyn FnOnce()>) -> BrowserTask {
        BrowserTask::Timeout(Timeout::new(millis, task))
    }

    fn animation_frame(&self, task: Box<dyn FnOnce(f64)>) -> BrowserTask {
        BrowserTask::Frame(request_animation_frame(task))
    }
}
