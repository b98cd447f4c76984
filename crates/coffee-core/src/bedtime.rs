use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Days, NaiveDateTime, TimeDelta, TimeZone};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

static BEDTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\s*([AaPp][Mm])\s*$").unwrap());

/// Half of the 12-hour clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => f.write_str("AM"),
            Meridiem::Pm => f.write_str("PM"),
        }
    }
}

impl FromStr for Meridiem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            other => Err(CoreError::InvalidInput(format!(
                "meridiem must be AM or PM, got '{other}'"
            ))),
        }
    }
}

/// A wall-clock bedtime hour with no date attached, e.g. `12AM` or `9PM`.
///
/// Fields are public so callers can hand over raw picker values; every
/// operation that interprets the hour validates it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BedtimeSpec {
    /// 1..=12
    pub hour: u8,
    pub meridiem: Meridiem,
}

impl BedtimeSpec {
    /// Build a spec, rejecting hours outside 1..=12.
    pub fn new(hour: u8, meridiem: Meridiem) -> Result<Self> {
        let spec = Self { hour, meridiem };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if (1..=12).contains(&self.hour) {
            Ok(())
        } else {
            Err(CoreError::InvalidInput(format!(
                "bedtime hour must be between 1 and 12, got {}",
                self.hour
            )))
        }
    }

    /// 24-hour clock hour: 12AM → 0, 1..11AM → 1..11, 12PM → 12, 1..11PM → 13..23.
    pub fn hour_of_day(&self) -> Result<u32> {
        self.validate()?;
        let h = u32::from(self.hour) % 12;
        Ok(match self.meridiem {
            Meridiem::Am => h,
            Meridiem::Pm => h + 12,
        })
    }

    /// Inverse of [`hour_of_day`](Self::hour_of_day).
    pub fn from_hour_of_day(hour: u32) -> Result<Self> {
        let hour = u8::try_from(hour)
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| {
                CoreError::InvalidInput(format!("hour of day must be 0..=23, got {hour}"))
            })?;
        Ok(Self::from_index(hour))
    }

    /// All 24 selectable bedtimes in clock order, starting at `12AM`.
    pub fn all() -> impl Iterator<Item = BedtimeSpec> {
        (0..24).map(Self::from_index)
    }

    /// Picker label, e.g. `12:00 AM`.
    pub fn label(&self) -> String {
        format!("{}:00 {}", self.hour, self.meridiem)
    }

    fn from_index(i: u8) -> Self {
        let hour = match i % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if i < 12 { Meridiem::Am } else { Meridiem::Pm };
        Self { hour, meridiem }
    }
}

impl Default for BedtimeSpec {
    fn default() -> Self {
        Self {
            hour: 12,
            meridiem: Meridiem::Am,
        }
    }
}

impl fmt::Display for BedtimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hour, self.meridiem)
    }
}

impl FromStr for BedtimeSpec {
    type Err = CoreError;

    /// Parses the `<hour><AM|PM>` form (`12AM`, `9 pm`).
    fn from_str(s: &str) -> Result<Self> {
        let caps = BEDTIME_RE.captures(s).ok_or_else(|| {
            CoreError::InvalidInput(format!("bedtime must look like '12AM' or '9PM', got '{s}'"))
        })?;
        let hour: u8 = caps[1]
            .parse()
            .map_err(|_| CoreError::InvalidInput(format!("bad bedtime hour in '{s}'")))?;
        let meridiem: Meridiem = caps[2].parse()?;
        Self::new(hour, meridiem)
    }
}

impl TryFrom<String> for BedtimeSpec {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BedtimeSpec> for String {
    fn from(spec: BedtimeSpec) -> Self {
        spec.to_string()
    }
}

/// Resolve `spec` to its next occurrence strictly after `now`.
///
/// The candidate shares now's local calendar date with minutes, seconds and
/// sub-seconds zeroed. A candidate at or before `now` moves forward one
/// calendar day, so a bedtime equal to `now` lands a full day later.
pub fn normalize_bedtime<Tz: TimeZone>(spec: BedtimeSpec, now: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let hour = spec.hour_of_day()?;
    let tz = now.timezone();

    let candidate = now
        .naive_local()
        .date()
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| CoreError::InvalidInput(format!("no such hour of day: {hour}")))?;

    let bedtime = resolve_local(&tz, candidate)?;
    if bedtime > *now {
        return Ok(bedtime);
    }

    let next_day = candidate
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CoreError::InvalidInput(format!("{candidate} is at the end of the calendar")))?;
    resolve_local(&tz, next_day)
}

/// Map a wall-clock time onto the zone. Ambiguous times (fall-back) take the
/// earlier instant; times inside a spring-forward gap move ahead one hour.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .ok_or_else(|| {
            CoreError::InvalidInput(format!("{naive} does not exist in the local time zone"))
        })
}
