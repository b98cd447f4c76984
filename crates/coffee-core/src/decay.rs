use chrono::{DateTime, TimeZone};

use crate::constants::{HALF_LIFE_HOURS, MILLIS_PER_HOUR};

/// Caffeine left after `elapsed_hours` of first-order elimination:
/// `dose * 0.5^(elapsed / half_life)`.
///
/// Equals `dose_mg` at zero elapsed time and halves every
/// [`HALF_LIFE_HOURS`]. Callers must not pass NaN or infinite values.
pub fn remaining_after(dose_mg: f64, elapsed_hours: f64) -> f64 {
    dose_mg * 0.5_f64.powf(elapsed_hours / HALF_LIFE_HOURS)
}

/// Hours from `now` until `bedtime`, at millisecond resolution, clamped to 0.
pub fn elapsed_hours<Tz: TimeZone>(now: &DateTime<Tz>, bedtime: &DateTime<Tz>) -> f64 {
    let millis = bedtime.clone().signed_duration_since(now.clone()).num_milliseconds();
    (millis as f64 / MILLIS_PER_HOUR).max(0.0)
}
