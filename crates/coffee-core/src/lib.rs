//! Caffeine half-life estimator.
//!
//! Answers one question: if you drink a dose of caffeine now, how much of it
//! is still circulating when you go to bed? Bedtime is a wall-clock hour
//! (`12AM`, `9PM`, ...) resolved to its next occurrence after "now", and the
//! remaining amount follows a fixed 6-hour exponential half-life.
//!
//! Zero I/O and no clock reads: callers supply "now" and re-evaluate whenever
//! it changes.

pub mod bedtime;
pub mod constants;
pub mod decay;
pub mod dose;
pub mod error;
pub mod estimate;

pub use bedtime::{BedtimeSpec, Meridiem, normalize_bedtime};
pub use constants::{HALF_LIFE_HOURS, REFERENCE_DOSE_MG};
pub use decay::{elapsed_hours, remaining_after};
pub use dose::Dose;
pub use error::{CoreError, Result};
pub use estimate::{Estimate, estimate_remaining, percent_of_reference};
