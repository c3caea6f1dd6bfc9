//! Watcher configuration.
//!
//! Defaults match the production cadence. `from_env` overrides them from
//! `GRAVEWATCH_*` environment variables and fails fast on bad values.

use std::time::Duration;

use thiserror::Error;

pub const ENV_INGEST_INTERVAL: &str = "GRAVEWATCH_INGEST_INTERVAL_SECS";
pub const ENV_RECHECK_PACING: &str = "GRAVEWATCH_RECHECK_PACING_SECS";
pub const ENV_AGING_THRESHOLD: &str = "GRAVEWATCH_AGING_THRESHOLD_SECS";
pub const ENV_CHECK_INTERVAL: &str = "GRAVEWATCH_CHECK_INTERVAL_SECS";
pub const ENV_LOG: &str = "GRAVEWATCH_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}={value:?} is not a whole number of seconds")]
    NotSeconds { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Sleep between ingestion cycles; bounds the rate of initial lookups.
    pub ingest_interval: Duration,

    /// Sleep before each status lookup during a re-check pass.
    pub recheck_pacing: Duration,

    /// Minimum time since closure before a watched post is re-checked.
    pub aging_threshold: chrono::Duration,

    /// Cadence of the watched set's `checked` notification (used when the
    /// watcher builds its own in-memory sets).
    pub check_interval: Duration,

    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            ingest_interval: Duration::from_secs(2),
            recheck_pacing: Duration::from_secs(2),
            aging_threshold: chrono::Duration::hours(24),
            check_interval: Duration::from_secs(15 * 60),
            log_level: "info".to_string(),
        }
    }
}

impl WatcherConfig {
    /// Load configuration from the process environment.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(secs) = seconds(&lookup, ENV_INGEST_INTERVAL)? {
            config.ingest_interval = Duration::from_secs(non_zero(secs, ENV_INGEST_INTERVAL)?);
        }
        if let Some(secs) = seconds(&lookup, ENV_RECHECK_PACING)? {
            config.recheck_pacing = Duration::from_secs(secs);
        }
        if let Some(secs) = seconds(&lookup, ENV_AGING_THRESHOLD)? {
            config.aging_threshold = chrono::Duration::seconds(secs as i64);
        }
        if let Some(secs) = seconds(&lookup, ENV_CHECK_INTERVAL)? {
            config.check_interval = Duration::from_secs(non_zero(secs, ENV_CHECK_INTERVAL)?);
        }
        if let Some(level) = lookup(ENV_LOG) {
            config.log_level = level;
        }

        Ok(config)
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    // Capped so the aging threshold always fits a chrono::Duration.
    match value.trim().parse::<u64>() {
        Ok(secs) if secs <= i32::MAX as u64 => Ok(Some(secs)),
        _ => Err(ConfigError::NotSeconds { name, value }),
    }
}

// A zero ingest interval would turn the ingestion loop into a busy spin.
fn non_zero(secs: u64, name: &'static str) -> Result<u64, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Zero { name });
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_match_production_cadence() {
        let config = WatcherConfig::default();
        assert_eq!(config.ingest_interval, Duration::from_secs(2));
        assert_eq!(config.recheck_pacing, Duration::from_secs(2));
        assert_eq!(config.aging_threshold, chrono::Duration::hours(24));
        assert_eq!(config.check_interval, Duration::from_secs(900));
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = WatcherConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, WatcherConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = WatcherConfig::from_lookup(lookup_from(&[
            (ENV_INGEST_INTERVAL, "1"),
            (ENV_RECHECK_PACING, "0"),
            (ENV_AGING_THRESHOLD, "3600"),
            (ENV_CHECK_INTERVAL, " 60 "),
            (ENV_LOG, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.ingest_interval, Duration::from_secs(1));
        assert_eq!(config.recheck_pacing, Duration::ZERO);
        assert_eq!(config.aging_threshold, chrono::Duration::hours(1));
        assert_eq!(config.check_interval, Duration::from_secs(60));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn bad_values_fail_fast() {
        let err = WatcherConfig::from_lookup(lookup_from(&[(ENV_INGEST_INTERVAL, "2s")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotSeconds {
                name: ENV_INGEST_INTERVAL,
                value: "2s".to_string(),
            }
        );

        let err =
            WatcherConfig::from_lookup(lookup_from(&[(ENV_CHECK_INTERVAL, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Zero {
                name: ENV_CHECK_INTERVAL
            }
        );
    }

    #[rstest]
    #[case(ENV_INGEST_INTERVAL)]
    #[case(ENV_CHECK_INTERVAL)]
    fn zero_intervals_are_rejected(#[case] name: &'static str) {
        let err = WatcherConfig::from_lookup(lookup_from(&[(name, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero { name });
    }

    #[test]
    fn zero_recheck_pacing_is_allowed() {
        let config =
            WatcherConfig::from_lookup(lookup_from(&[(ENV_RECHECK_PACING, "0")])).unwrap();
        assert_eq!(config.recheck_pacing, Duration::ZERO);
    }
}
