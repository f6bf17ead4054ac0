//! Scroll, viewport and counter motion for the marketing site.
//!
//! The controllers (`ScrollTracker`, `VisibilityTracker`, `CounterAnimator`)
//! hold all of the timing logic and run against a [`scheduler::Scheduler`],
//! so they can be driven by a virtual clock in tests. The `use_*` hooks plug
//! them into yew with the browser scheduler and window listeners.

pub mod config;
pub mod counter;
pub mod dom;
pub mod measure;
pub mod rate_limit;
pub mod scheduler;
pub mod scroll;
pub mod stats;
pub mod visibility;
pub mod components {
    pub mod anchor_link;
    pub mod animated_stat;
    pub mod progress_bar;
    pub mod reveal;
}
