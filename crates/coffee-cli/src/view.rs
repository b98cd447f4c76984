//! Display strategies over the core estimator.
//!
//! Regular mode pins the inputs to one cup of coffee and a midnight bedtime;
//! custom mode lets the caller choose both. Both call the same two core
//! operations and share the result wording.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use coffee_core::{BedtimeSpec, Dose, Estimate, estimate_remaining, normalize_bedtime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Regular,
    Custom,
}

/// Everything one render needs: resolved inputs plus the computed estimate.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub mode: Mode,
    pub dose_mg: f64,
    pub bedtime: BedtimeSpec,
    pub bedtime_at: DateTime<Local>,
    #[serde(flatten)]
    pub estimate: Estimate,
}

impl Report {
    /// Run both core operations for `now`. Regular mode ignores the given
    /// dose and bedtime.
    pub fn evaluate(
        mode: Mode,
        dose: Dose,
        bedtime: BedtimeSpec,
        now: &DateTime<Local>,
    ) -> coffee_core::Result<Self> {
        let (dose, bedtime) = match mode {
            Mode::Regular => (Dose::cup_of_coffee(), BedtimeSpec::default()),
            Mode::Custom => (dose, bedtime),
        };
        let bedtime_at = normalize_bedtime(bedtime, now)?;
        let estimate = estimate_remaining(dose, now, &bedtime_at);

        tracing::debug!(
            ?mode,
            dose_mg = dose.mg(),
            %bedtime,
            elapsed_hours = estimate.elapsed_hours,
            remaining_mg = estimate.remaining_mg,
            percent = estimate.percent,
            "evaluated estimate"
        );

        Ok(Self {
            mode,
            dose_mg: dose.mg(),
            bedtime,
            bedtime_at,
            estimate,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.mode == Mode::Regular {
            out.push_str(
                "Assuming you're drinking a cup of coffee (8oz/236 mL) containing 90mg of caffeine right now:\n",
            );
        }
        let _ = writeln!(
            out,
            "You would have {:.1}mg of caffeine in your blood if you went to bed at {}.",
            self.estimate.remaining_mg, self.bedtime
        );
        let _ = writeln!(
            out,
            "It's as if you had drunk {}% of a cup of coffee before you went to bed.",
            self.estimate.percent
        );
        out
    }
}
