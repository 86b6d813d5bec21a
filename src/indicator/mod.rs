//! Derived per-cell indicators: day/night, business hours, and day progress.
//!
//! Every function here is a pure function of a local wall-clock reading that
//! has already been converted into the slot's timezone.

mod core;

pub use core::{
    BusinessStatus, DayPhase, DayProgress, ProgressBand, SECONDS_PER_DAY, business_hours,
    day_phase, day_progress, progress_bar,
};
