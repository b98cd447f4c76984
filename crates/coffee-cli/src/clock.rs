//! "Now" handling: parsing `--now` and the live refresh loop.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDateTime};
use coffee_core::{BedtimeSpec, Dose};

use crate::view::{Mode, Report};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse RFC 3339, or a zone-less timestamp read as local wall-clock time.
pub fn parse_now(raw: &str) -> Result<DateTime<Local>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Local));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive
                .and_local_timezone(Local)
                .earliest()
                .with_context(|| format!("{raw} does not exist in the local time zone"));
        }
    }
    bail!("cannot parse '{raw}' as a timestamp (expected e.g. 2024-01-01T22:00:00)")
}

/// Re-evaluate and print every `interval` until `ticks` renders have been
/// printed (forever when `None`) or Ctrl-C arrives.
pub async fn watch(
    mode: Mode,
    dose: Dose,
    bedtime: BedtimeSpec,
    interval: Duration,
    ticks: Option<u64>,
) -> Result<()> {
    if interval.is_zero() {
        bail!("refresh interval must be greater than zero");
    }
    if ticks == Some(0) {
        bail!("--ticks must be at least 1");
    }
    tracing::info!(?mode, %bedtime, interval_ms = interval.as_millis() as u64, "starting live refresh");

    let mut timer = tokio::time::interval(interval);
    let mut stdout = std::io::stdout();
    let clear = stdout.is_terminal();
    let mut rendered = 0u64;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = timer.tick() => {}
            _ = &mut ctrl_c => {
                tracing::info!("interrupted, stopping live refresh");
                break;
            }
        }

        let now = Local::now();
        let report = Report::evaluate(mode, dose, bedtime, &now)?;
        if clear {
            write!(stdout, "\x1b[2J\x1b[H")?;
        }
        writeln!(stdout, "{}", now.format("%H:%M:%S"))?;
        write!(stdout, "{}", report.render())?;
        if !clear {
            writeln!(stdout)?;
        }
        stdout.flush()?;

        rendered += 1;
        if ticks.is_some_and(|n| rendered >= n) {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn test_parse_rfc3339() {
        let t = parse_now("2024-01-01T22:00:00+00:00").unwrap();
        assert_eq!(t.with_timezone(&Utc).hour(), 22);
    }

    #[test]
    fn test_parse_naive_is_local_wall_clock() {
        let t = parse_now("2024-01-01T22:15:00").unwrap();
        assert_eq!(t.hour(), 22);
        assert_eq!(t.minute(), 15);

        let t = parse_now("2024-01-01 06:00:00").unwrap();
        assert_eq!(t.hour(), 6);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_now("tonight").is_err());
        assert!(parse_now("2024-13-01T00:00:00").is_err());
    }
}
