//! End-to-end checks of the estimator: bedtime normalization feeding the
//! decay model, plus property tests over arbitrary doses and clock times.

use approx::assert_relative_eq;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use coffee_core::{
    BedtimeSpec, CoreError, Dose, Meridiem, estimate_remaining, normalize_bedtime,
    percent_of_reference, remaining_after,
};
use proptest::prelude::*;

fn at(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .unwrap()
        .and_utc()
}

fn midnight() -> BedtimeSpec {
    BedtimeSpec::new(12, Meridiem::Am).unwrap()
}

/// Late evening coffee, bed at midnight two hours later.
#[test]
fn evening_cup_before_midnight() {
    let now = at("2024-01-01T22:00:00");
    let bedtime = normalize_bedtime(midnight(), &now).unwrap();
    assert_eq!(bedtime, at("2024-01-02T00:00:00"));

    let est = estimate_remaining(Dose::cup_of_coffee(), &now, &bedtime);
    assert_relative_eq!(est.elapsed_hours, 2.0);
    assert_relative_eq!(est.remaining_mg, 90.0 * 0.5_f64.powf(2.0 / 6.0), epsilon = 1e-9);
    assert_relative_eq!(est.remaining_mg, 71.433, epsilon = 1e-3);
    assert_eq!(est.percent, 79);
}

/// Just past midnight: today's midnight has gone, so bedtime is tomorrow's.
#[test]
fn past_midnight_rolls_to_next_day() {
    let now = at("2024-01-01T00:30:00");
    let bedtime = normalize_bedtime(midnight(), &now).unwrap();
    assert_eq!(bedtime, at("2024-01-02T00:00:00"));

    let est = estimate_remaining(Dose::cup_of_coffee(), &now, &bedtime);
    assert_relative_eq!(est.elapsed_hours, 23.5);
    assert_relative_eq!(est.remaining_mg, 90.0 * 0.5_f64.powf(23.5 / 6.0), epsilon = 1e-9);
    assert_eq!(est.percent, 7);
}

#[test]
fn zero_dose_leaves_nothing() {
    let now = at("2024-05-17T13:12:11");
    for spec in BedtimeSpec::all() {
        let bedtime = normalize_bedtime(spec, &now).unwrap();
        let est = estimate_remaining(Dose::new(0.0).unwrap(), &now, &bedtime);
        assert_eq!(est.remaining_mg, 0.0, "bedtime {spec}");
        assert_eq!(est.percent, 0, "bedtime {spec}");
    }
}

#[test]
fn invalid_hour_is_rejected() {
    let now = at("2024-01-01T22:00:00");
    let spec = BedtimeSpec {
        hour: 13,
        meridiem: Meridiem::Am,
    };
    let err = normalize_bedtime(spec, &now).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    assert!(err.to_string().contains("13"), "message should name the hour: {err}");
}

#[test]
fn exactly_one_half_life() {
    let now = at("2024-01-01T16:00:00");
    let bedtime = normalize_bedtime(BedtimeSpec::new(10, Meridiem::Pm).unwrap(), &now).unwrap();
    let est = estimate_remaining(Dose::new(200.0).unwrap(), &now, &bedtime);
    assert_relative_eq!(est.elapsed_hours, 6.0);
    assert_relative_eq!(est.remaining_mg, 100.0, epsilon = 1e-9);
}

#[test]
fn bedtime_equal_to_now_waits_a_full_day() {
    let now = at("2024-01-01T21:00:00");
    let bedtime = normalize_bedtime(BedtimeSpec::new(9, Meridiem::Pm).unwrap(), &now).unwrap();
    assert_eq!(bedtime - now, TimeDelta::hours(24));

    let est = estimate_remaining(Dose::cup_of_coffee(), &now, &bedtime);
    assert_relative_eq!(est.remaining_mg, 90.0 / 16.0, epsilon = 1e-9);
    assert_eq!(est.percent, 6);
}

#[test]
fn reference_cup_is_one_hundred_percent() {
    assert_eq!(percent_of_reference(90.0), 100);
}

fn any_now() -> impl Strategy<Value = DateTime<Utc>> {
    // 2000-01-01 .. 2100-01-01, millisecond resolution
    (946_684_800_000_i64..4_102_444_800_000_i64)
        .prop_map(|ms| DateTime::from_timestamp_millis(ms).unwrap())
}

fn any_spec() -> impl Strategy<Value = BedtimeSpec> {
    (0u32..24).prop_map(|h| BedtimeSpec::from_hour_of_day(h).unwrap())
}

proptest! {
    #[test]
    fn prop_bedtime_strictly_after_now(now in any_now(), spec in any_spec()) {
        let bedtime = normalize_bedtime(spec, &now).unwrap();
        prop_assert!(bedtime > now);
        prop_assert!(bedtime - now <= TimeDelta::hours(24));
    }

    #[test]
    fn prop_remaining_never_exceeds_dose(
        dose in 0.0f64..2000.0,
        now in any_now(),
        spec in any_spec(),
    ) {
        let bedtime = normalize_bedtime(spec, &now).unwrap();
        let est = estimate_remaining(Dose::new(dose).unwrap(), &now, &bedtime);
        prop_assert!(est.remaining_mg <= dose);
        prop_assert!(est.remaining_mg >= 0.0);
    }

    #[test]
    fn prop_strictly_decreasing(dose in 0.1f64..2000.0, a in 0.0f64..48.0, delta in 0.01f64..48.0) {
        prop_assert!(remaining_after(dose, a + delta) < remaining_after(dose, a));
    }

    #[test]
    fn prop_half_life(dose in 0.0f64..2000.0) {
        let half = remaining_after(dose, 6.0);
        prop_assert!((half - dose * 0.5).abs() <= 1e-9 * dose.max(1.0));
    }

    #[test]
    fn prop_percent_matches_rounding(
        dose in 0.0f64..2000.0,
        now in any_now(),
        spec in any_spec(),
    ) {
        let bedtime = normalize_bedtime(spec, &now).unwrap();
        let est = estimate_remaining(Dose::new(dose).unwrap(), &now, &bedtime);
        prop_assert_eq!(est.percent, (est.remaining_mg / 90.0 * 100.0).round() as u32);
    }
}
