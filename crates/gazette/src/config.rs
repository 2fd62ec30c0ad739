//! # Configuration
//!
//! All knobs live in one TOML file, loaded once at startup and
//! validated before any actor is spawned. Every field has a default, so
//! an empty file (or no file at all) runs the pressroom demo under the
//! exclusive gate.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use gazette_core::{GazetteError, GazetteResult, Strategy};

/// Which demonstration this process runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Two typists under one exclusion gate.
    Pressroom,
    /// Reader cohort plus periodic writer over one document.
    Newsroom,
}

/// Start-time configuration for a gazette process.
///
/// Periods are milliseconds. The defaults reproduce the canonical demo:
/// a 1 s lead typist against a 1.9 s drifting one, and a four-reader
/// newsroom on 10 s / 20 s periods.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GazetteConfig {
    /// Scenario to run.
    pub scenario: Scenario,
    /// Exclusion discipline for the pressroom page:
    /// `signal | counting | exclusive | none`.
    pub strategy: String,
    /// Whether the two typists handshake once before steady state.
    pub rendezvous: bool,
    /// Per-party rendezvous wait bounds, lead first.
    pub rendezvous_wait_ms: [u64; 2],
    /// Simulated long-lasting startup activity before the handshake.
    pub rendezvous_setup_ms: u64,
    /// Lead typist period.
    pub lead_period_ms: u64,
    /// Drift typist period. Deliberately off-beat against the lead.
    pub drift_period_ms: u64,
    /// The lead typist recomposes on every n-th tick only.
    pub compose_every: u64,
    /// How long the drift typist keeps the gate after its copy lands,
    /// in lead periods.
    pub hold_ticks: u64,
    /// Size of the reader cohort.
    pub reader_count: usize,
    /// Reader period.
    pub reader_period_ms: u64,
    /// Extra startup offset per reader index, to spread the cohort.
    pub reader_stagger_ms: u64,
    /// Writer period.
    pub writer_period_ms: u64,
    /// Busy-wait inserted between copied bytes of a compose.
    pub pace_per_byte_us: u64,
    /// Wall-clock run length; 0 runs until the process is killed.
    pub run_for_ms: u64,
}

impl Default for GazetteConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Pressroom,
            strategy: "exclusive".to_owned(),
            rendezvous: false,
            rendezvous_wait_ms: [10_000, 1_000],
            rendezvous_setup_ms: 10_000,
            lead_period_ms: 1_000,
            drift_period_ms: 1_900,
            compose_every: 2,
            hold_ticks: 5,
            reader_count: 4,
            reader_period_ms: 10_000,
            reader_stagger_ms: 5_000,
            writer_period_ms: 20_000,
            pace_per_byte_us: 2_000,
            run_for_ms: 15_000,
        }
    }
}

impl GazetteConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> GazetteResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GazetteError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| GazetteError::InvalidConfig(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every knob before any actor starts.
    pub fn validate(&self) -> GazetteResult<()> {
        self.strategy()?;
        if self.reader_count == 0 {
            return Err(GazetteError::InvalidConfig(
                "reader_count must be at least 1".to_owned(),
            ));
        }
        if self.compose_every == 0 {
            return Err(GazetteError::InvalidConfig(
                "compose_every must be at least 1".to_owned(),
            ));
        }
        let periods = [
            ("lead_period_ms", self.lead_period_ms),
            ("drift_period_ms", self.drift_period_ms),
            ("reader_period_ms", self.reader_period_ms),
            ("writer_period_ms", self.writer_period_ms),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(GazetteError::InvalidConfig(format!(
                    "{name} must be non-zero"
                )));
            }
        }
        if self.pace_per_byte_us > 1_000_000 {
            return Err(GazetteError::InvalidConfig(
                "pace_per_byte_us above one second defeats the demo".to_owned(),
            ));
        }
        Ok(())
    }

    /// The parsed exclusion discipline.
    pub fn strategy(&self) -> GazetteResult<Strategy> {
        Strategy::from_str(&self.strategy).map_err(GazetteError::InvalidConfig)
    }

    /// Busy-wait inserted between copied bytes.
    #[must_use]
    pub fn pace_per_byte(&self) -> Duration {
        Duration::from_micros(self.pace_per_byte_us)
    }

    /// The drift typist's post-copy hold: `hold_ticks` lead periods.
    #[must_use]
    pub fn drift_hold(&self) -> Duration {
        Duration::from_millis(self.hold_ticks * self.lead_period_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GazetteConfig::default();
        config.validate().expect("defaults must be runnable");
        assert_eq!(config.scenario, Scenario::Pressroom);
        assert_eq!(config.strategy().unwrap(), Strategy::Exclusive);
    }

    #[test]
    fn test_parse_sample_toml() {
        let raw = r#"
            scenario = "newsroom"
            strategy = "counting"
            rendezvous = true
            rendezvous_wait_ms = [2000, 500]
            reader_count = 6
            run_for_ms = 0
        "#;
        let config: GazetteConfig = toml::from_str(raw).expect("sample must parse");
        config.validate().expect("sample must validate");

        assert_eq!(config.scenario, Scenario::Newsroom);
        assert_eq!(config.strategy().unwrap(), Strategy::Counting);
        assert_eq!(config.reader_count, 6);
        assert_eq!(config.rendezvous_wait_ms, [2000, 500]);
        // Unset fields keep their defaults.
        assert_eq!(config.writer_period_ms, 20_000);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let raw = "priority_ceiling = true";
        assert!(toml::from_str::<GazetteConfig>(raw).is_err());
    }

    #[test]
    fn test_zero_readers_rejected() {
        let config = GazetteConfig {
            reader_count: 0,
            ..GazetteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let config = GazetteConfig {
            strategy: "optimistic".to_owned(),
            ..GazetteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GazetteError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = GazetteConfig {
            drift_period_ms: 0,
            ..GazetteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_drift_hold_spans_lead_periods() {
        let config = GazetteConfig::default();
        assert_eq!(config.drift_hold(), Duration::from_millis(5_000));
    }
}
