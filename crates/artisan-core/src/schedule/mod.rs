//! Timer-based coalescing for workspace triggers.

pub mod debounce;

pub use debounce::DebounceScheduler;
