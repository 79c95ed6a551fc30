use std::env;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::TriageError;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SEED_COUNT: u32 = 60;
pub const DEFAULT_SEED_ANCHOR: &str = "2025-01-01";

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pseudo-random seed for the request population.
    pub seed: u64,
    /// Number of seeded requests; ids run `1..=seed_count`.
    pub seed_count: u32,
    /// Day the seeded creation timestamps count back from.
    pub seed_anchor: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            seed_count: DEFAULT_SEED_COUNT,
            seed_anchor: parse_anchor(DEFAULT_SEED_ANCHOR)
                .expect("DEFAULT_SEED_ANCHOR is a valid YYYY-MM-DD date"),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, TriageError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads through `lookup`, so callers
    /// can feed values without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TriageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = parse_var(&lookup, "TRIAGE_SEED", DEFAULT_SEED)?;
        let seed_count = parse_var(&lookup, "TRIAGE_SEED_COUNT", DEFAULT_SEED_COUNT)?;
        let seed_anchor = match lookup("TRIAGE_SEED_ANCHOR") {
            Some(raw) => parse_anchor(&raw)?,
            None => parse_anchor(DEFAULT_SEED_ANCHOR)?,
        };

        Ok(Self {
            seed,
            seed_count,
            seed_anchor,
        })
    }

    /// UTC midnight of the anchor day.
    pub fn anchor_instant(&self) -> DateTime<Utc> {
        self.seed_anchor.and_time(NaiveTime::default()).and_utc()
    }
}

fn parse_anchor(raw: &str) -> Result<NaiveDate, TriageError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        TriageError::Config(format!(
            "TRIAGE_SEED_ANCHOR must be a YYYY-MM-DD date, got {raw:?}: {e}"
        ))
    })
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, TriageError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| TriageError::Config(format!("{key} must be a number, got {raw:?}: {e}"))),
    }
}
