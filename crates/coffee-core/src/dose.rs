use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::REFERENCE_DOSE_MG;
use crate::error::{CoreError, Result};

/// Amount of caffeine taken, in milligrams. Always finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Dose(f64);

impl Dose {
    pub fn new(mg: f64) -> Result<Self> {
        if !mg.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "dose must be a finite number of milligrams, got {mg}"
            )));
        }
        if mg < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "dose cannot be negative, got {mg}mg"
            )));
        }
        // -0.0 renders as "-0.0mg"
        Ok(Self(if mg == 0.0 { 0.0 } else { mg }))
    }

    /// One regular cup of coffee.
    pub fn cup_of_coffee() -> Self {
        Self(REFERENCE_DOSE_MG)
    }

    pub fn mg(self) -> f64 {
        self.0
    }
}

impl Default for Dose {
    fn default() -> Self {
        Self::cup_of_coffee()
    }
}

impl fmt::Display for Dose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mg", self.0)
    }
}

impl TryFrom<f64> for Dose {
    type Error = CoreError;

    fn try_from(mg: f64) -> Result<Self> {
        Self::new(mg)
    }
}

impl From<Dose> for f64 {
    fn from(dose: Dose) -> Self {
        dose.0
    }
}
