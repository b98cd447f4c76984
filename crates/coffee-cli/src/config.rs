//! Layered defaults: TOML file, then `COFFEE_*` environment, then flags.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use coffee_core::{BedtimeSpec, Dose};
use serde::Deserialize;

use crate::view::Mode;

pub const CONFIG_ENV: &str = "COFFEE_CONFIG";
pub const DOSE_ENV: &str = "COFFEE_DOSE_MG";
pub const BEDTIME_ENV: &str = "COFFEE_BEDTIME";

const DEFAULT_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dose_mg: Dose,
    pub bedtime: BedtimeSpec,
    pub mode: Mode,
    pub interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dose_mg: Dose::cup_of_coffee(),
            bedtime: BedtimeSpec::default(),
            mode: Mode::Regular,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load from `explicit`, else `$COFFEE_CONFIG`, else the default
    /// location, then apply environment overrides. A missing file is not an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(default_path);

        let config = Self::from_file(&path)?;
        config.with_overrides(|key| env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `COFFEE_DOSE_MG` / `COFFEE_BEDTIME` as looked up by `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(DOSE_ENV) {
            let mg: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{DOSE_ENV}='{raw}' is not a number"))?;
            self.dose_mg = Dose::new(mg).with_context(|| format!("{DOSE_ENV}='{raw}'"))?;
        }
        if let Some(raw) = lookup(BEDTIME_ENV) {
            self.bedtime = raw
                .parse()
                .with_context(|| format!("{BEDTIME_ENV}='{raw}'"))?;
        }
        Ok(self)
    }
}

/// `$HOME/.coffee-o-clock/config.toml`
fn default_path() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".coffee-o-clock")
        .join("config.toml")
}
