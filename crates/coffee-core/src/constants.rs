/// Approximate biological half-life of caffeine, in hours.
pub const HALF_LIFE_HOURS: f64 = 6.0;

/// One regular cup of coffee (8oz / 236 mL), in milligrams.
/// Percentages are expressed relative to this dose.
pub const REFERENCE_DOSE_MG: f64 = 90.0;

pub(crate) const MILLIS_PER_HOUR: f64 = 60.0 * 60.0 * 1000.0;
