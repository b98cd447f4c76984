use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::constants::REFERENCE_DOSE_MG;
use crate::decay::{elapsed_hours, remaining_after};
use crate::dose::Dose;

/// Result of one evaluation. Recomputed from scratch whenever an input changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Hours between "now" and bedtime, never negative.
    pub elapsed_hours: f64,
    /// Caffeine still in the body at bedtime.
    pub remaining_mg: f64,
    /// `remaining_mg` as a whole percentage of one cup of coffee.
    pub percent: u32,
}

/// `round(remaining / 90 * 100)`, halves rounded away from zero.
pub fn percent_of_reference(remaining_mg: f64) -> u32 {
    (remaining_mg / REFERENCE_DOSE_MG * 100.0).round().max(0.0) as u32
}

/// Estimate the caffeine left at `bedtime` from `dose` taken at `now`.
///
/// A bedtime at or before `now` counts as zero elapsed hours.
pub fn estimate_remaining<Tz: TimeZone>(
    dose: Dose,
    now: &DateTime<Tz>,
    bedtime: &DateTime<Tz>,
) -> Estimate {
    let elapsed_hours = elapsed_hours(now, bedtime);
    let remaining_mg = remaining_after(dose.mg(), elapsed_hours);
    Estimate {
        elapsed_hours,
        remaining_mg,
        percent: percent_of_reference(remaining_mg),
    }
}
