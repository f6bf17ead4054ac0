use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::config;
use crate::measure::Easing;
use crate::scheduler::{BrowserScheduler, Scheduler};
use crate::visibility::{use_in_viewport_with, VisibilityOptions};

/// Precision ceiling for counting and display. Larger requests are clamped.
pub const MAX_DECIMALS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterOptions {
    pub duration_ms: f64,
    /// Decimal places kept while counting.
    pub decimals: u32,
    pub easing: Easing,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            duration_ms: config::COUNTER_DURATION_MS,
            decimals: 0,
            easing: Easing::EaseOutCubic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterState {
    pub value: f64,
    pub is_animating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CounterPhase {
    #[default]
    NotStarted,
    Animating {
        started_at: f64,
    },
    Settled,
}

/// Time-based curve from 0 to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    target: f64,
    options: CounterOptions,
}

impl Tween {
    pub fn new(target: f64, options: CounterOptions) -> Self {
        Self { target, options }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Value after `elapsed` ms and whether the tween is finished. A finished
    /// tween reports `target` exactly, whatever rounding would give.
    pub fn value_at(&self, elapsed: f64) -> (f64, bool) {
        if self.options.duration_ms <= 0.0 {
            return (self.target, true);
        }
        let progress = (elapsed / self.options.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return (self.target, true);
        }
        let eased = self.options.easing.apply(progress);
        (round_to(self.target * eased, self.options.decimals), false)
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * factor).round() / factor
}

/// Render `value` with `decimals` places (at most [`MAX_DECIMALS`]) and comma
/// thousands separators.
pub fn format_value(value: f64, decimals: u32) -> String {
    let formatted = format!("{:.*}", decimals.min(MAX_DECIMALS) as usize, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + whole.len() / 3 + 1);
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

struct AnimatorState<S: Scheduler> {
    phase: CounterPhase,
    value: f64,
    frame: Option<S::Handle>,
}

struct AnimatorInner<S: Scheduler> {
    scheduler: S,
    tween: Tween,
    on_change: Callback<CounterState>,
    state: RefCell<AnimatorState<S>>,
}

/// Runs a [`Tween`] once on animation frames.
///
/// `start` only has an effect the first time; after the tween settles the
/// animator never publishes again. Dropping the last clone cancels the
/// pending frame.
pub struct CounterAnimator<S: Scheduler> {
    inner: Rc<AnimatorInner<S>>,
}

impl<S: Scheduler> Clone for CounterAnimator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Scheduler> CounterAnimator<S> {
    pub fn new(scheduler: S, tween: Tween, on_change: Callback<CounterState>) -> Self {
        Self {
            inner: Rc::new(AnimatorInner {
                scheduler,
                tween,
                on_change,
                state: RefCell::new(AnimatorState {
                    phase: CounterPhase::NotStarted,
                    value: 0.0,
                    frame: None,
                }),
            }),
        }
    }

    pub fn phase(&self) -> CounterPhase {
        self.inner.state.borrow().phase
    }

    pub fn state(&self) -> CounterState {
        let state = self.inner.state.borrow();
        CounterState {
            value: state.value,
            is_animating: matches!(state.phase, CounterPhase::Animating { .. }),
        }
    }

    /// Begin counting. Returns false if the counter already ran.
    pub fn start(&self) -> bool {
        let started_at = self.inner.scheduler.now();
        {
            let mut state = self.inner.state.borrow_mut();
            if state.phase != CounterPhase::NotStarted {
                return false;
            }
            state.phase = CounterPhase::Animating { started_at };
            state.value = 0.0;
        }
        log::debug!("Counter to {} started", self.inner.tween.target());
        self.inner.on_change.emit(self.state());
        self.request_frame();
        true
    }

    fn request_frame(&self) {
        let weak = Rc::downgrade(&self.inner);
        let frame = self.inner.scheduler.animation_frame(Box::new(move |timestamp| {
            if let Some(inner) = weak.upgrade() {
                CounterAnimator { inner }.on_frame(timestamp);
            }
        }));
        let previous = self.inner.state.borrow_mut().frame.replace(frame);
        drop(previous);
    }

    fn on_frame(&self, timestamp: f64) {
        let (done, finished) = {
            let mut state = self.inner.state.borrow_mut();
            let CounterPhase::Animating { started_at } = state.phase else {
                return;
            };
            let (value, done) = self.inner.tween.value_at(timestamp - started_at);
            state.value = value;
            if done {
                state.phase = CounterPhase::Settled;
            }
            (done, if done { state.frame.take() } else { None })
        };
        drop(finished);

        self.inner.on_change.emit(self.state());
        if done {
            log::debug!("Counter settled at {}", self.inner.tween.target());
        } else {
            self.request_frame();
        }
    }
}

/// Counts from 0 up to `target` the first time the element behind `node`
/// scrolls into view.
#[hook]
pub fn use_animated_counter(node: NodeRef, target: f64, options: CounterOptions) -> CounterState {
    let state = use_state_eq(CounterState::default);
    let animator = use_mut_ref(|| None::<CounterAnimator<BrowserScheduler>>);
    let seen = use_mut_ref(|| false);

    // Registered before the viewport effect so the animator exists by the
    // time the mount check can report a first sighting.
    {
        let setter = state.setter();
        let animator = animator.clone();
        let seen = seen.clone();
        use_effect_with_deps(
            move |(target, options)| {
                let counter = CounterAnimator::new(
                    BrowserScheduler,
                    Tween::new(*target, *options),
                    Callback::from(move |state| setter.set(state)),
                );
                if *seen.borrow() {
                    counter.start();
                }
                *animator.borrow_mut() = Some(counter);
                move || drop(animator.borrow_mut().take())
            },
            (target, options),
        );
    }

    let on_enter = {
        let animator = animator.clone();
        let seen = seen.clone();
        use_memo(
            move |_| {
                Callback::from(move |_: ()| {
                    *seen.borrow_mut() = true;
                    if let Some(counter) = animator.borrow().as_ref() {
                        counter.start();
                    }
                })
            },
            (),
        )
    };
    use_in_viewport_with(node, VisibilityOptions::default(), Some((*on_enter).clone()));

    *state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::ManualScheduler;

    fn animator(
        scheduler: &ManualScheduler,
        target: f64,
        options: CounterOptions,
    ) -> (CounterAnimator<ManualScheduler>, Rc<RefCell<Vec<CounterState>>>) {
        let published = Rc::new(RefCell::new(Vec::new()));
        let on_change = {
            let published = published.clone();
            Callback::from(move |state| published.borrow_mut().push(state))
        };
        (
            CounterAnimator::new(scheduler.clone(), Tween::new(target, options), on_change),
            published,
        )
    }

    #[test]
    fn test_tween_curve() {
        let tween = Tween::new(1250.0, CounterOptions::default());
        assert_eq!(tween.value_at(0.0), (0.0, false));
        assert_eq!(tween.value_at(1000.0), (1094.0, false));
        assert_eq!(tween.value_at(2000.0), (1250.0, true));
        assert_eq!(tween.value_at(5000.0), (1250.0, true));
        assert_eq!(tween.value_at(-50.0), (0.0, false));
    }

    #[test]
    fn test_tween_keeps_decimals() {
        let options = CounterOptions {
            decimals: 1,
            easing: Easing::Linear,
            ..Default::default()
        };
        let tween = Tween::new(4.9, options);
        assert_eq!(tween.value_at(1000.0), (2.5, false));
        assert_eq!(tween.value_at(2000.0), (4.9, true));
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let options = CounterOptions {
            duration_ms: 0.0,
            ..Default::default()
        };
        assert_eq!(Tween::new(7.0, options).value_at(0.0), (7.0, true));
    }

    #[test]
    fn test_counter_reaches_target_on_schedule() {
        let scheduler = ManualScheduler::new();
        let (counter, _) = animator(&scheduler, 1250.0, CounterOptions::default());
        assert_eq!(counter.phase(), CounterPhase::NotStarted);

        assert!(counter.start());
        assert_eq!(
            counter.state(),
            CounterState {
                value: 0.0,
                is_animating: true
            }
        );

        scheduler.advance_frame(1000.0);
        let midway = counter.state().value;
        assert!(midway > 0.0 && midway < 1250.0, "midway value {}", midway);
        assert!(counter.state().is_animating);

        scheduler.advance_frame(1000.0);
        assert_eq!(
            counter.state(),
            CounterState {
                value: 1250.0,
                is_animating: false
            }
        );
        assert_eq!(counter.phase(), CounterPhase::Settled);
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_counter_is_monotonic_and_silent_after_settling() {
        let scheduler = ManualScheduler::new();
        let (counter, published) = animator(&scheduler, 987.0, CounterOptions::default());
        counter.start();
        for _ in 0..200 {
            scheduler.advance_frame(16.0);
        }

        let values: Vec<f64> = published.borrow().iter().map(|state| state.value).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(values.last(), Some(&987.0));
        assert_eq!(published.borrow().iter().filter(|s| !s.is_animating).count(), 1);

        let count = published.borrow().len();
        scheduler.advance_frame(16.0);
        assert!(!counter.start());
        assert_eq!(published.borrow().len(), count);
    }

    #[test]
    fn test_second_start_does_not_restart() {
        let scheduler = ManualScheduler::new();
        let (counter, _) = animator(&scheduler, 100.0, CounterOptions::default());
        assert!(counter.start());
        scheduler.advance_frame(500.0);
        let value = counter.state().value;
        assert!(!counter.start());
        assert_eq!(counter.state().value, value);
        assert_eq!(scheduler.pending_frames(), 1);
    }

    #[test]
    fn test_dropping_counter_cancels_frame() {
        let scheduler = ManualScheduler::new();
        let (counter, published) = animator(&scheduler, 100.0, CounterOptions::default());
        counter.start();
        assert_eq!(scheduler.pending_frames(), 1);
        drop(counter);
        assert_eq!(scheduler.pending_frames(), 0);
        scheduler.advance_frame(16.0);
        assert_eq!(published.borrow().len(), 1);
    }

    #[test]
    fn test_visibility_entry_starts_the_counter_once() {
        use crate::visibility::{VisibilityCallbacks, VisibilityTracker};
        use std::cell::Cell;

        let scheduler = ManualScheduler::new();
        let (counter, published) = animator(&scheduler, 640.0, CounterOptions::default());
        let visible = Rc::new(Cell::new(false));
        let starts = Rc::new(Cell::new(0));
        let tracker = {
            let visible = visible.clone();
            let counter = counter.clone();
            let starts = starts.clone();
            VisibilityTracker::new(
                move || visible.get(),
                VisibilityCallbacks {
                    on_change: Callback::noop(),
                    on_enter: Some(Callback::from(move |_| {
                        if counter.start() {
                            starts.set(starts.get() + 1);
                        }
                    })),
                },
            )
        };

        tracker.check();
        assert_eq!(counter.phase(), CounterPhase::NotStarted);

        for round in 0..300 {
            visible.set(round % 3 != 2);
            tracker.check();
            scheduler.advance_frame(16.0);
        }

        assert_eq!(starts.get(), 1);
        assert_eq!(counter.phase(), CounterPhase::Settled);
        assert_eq!(scheduler.pending_frames(), 0);
        let values: Vec<f64> = published.borrow().iter().map(|state| state.value).collect();
        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.iter().filter(|value| **value == 0.0).count(), 1);
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(values.last(), Some(&640.0));
    }

    #[test]
    fn test_decimals_are_clamped() {
        assert_eq!(format_value(1.5, 400), "1.500000");
        assert_eq!(format_value(1234.5, u32::MAX), "1,234.500000");

        let options = CounterOptions {
            decimals: 400,
            easing: Easing::Linear,
            ..Default::default()
        };
        let (value, done) = Tween::new(3.0, options).value_at(500.0);
        assert!(value.is_finite());
        assert_eq!(value, 0.75);
        assert!(!done);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0, 0), "0");
        assert_eq!(format_value(999.0, 0), "999");
        assert_eq!(format_value(1250.0, 0), "1,250");
        assert_eq!(format_value(1234567.0, 0), "1,234,567");
        assert_eq!(format_value(98.5, 1), "98.5");
        assert_eq!(format_value(12500.25, 2), "12,500.25");
        assert_eq!(format_value(-4200.0, 0), "-4,200");
    }
}
