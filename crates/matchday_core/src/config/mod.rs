//! # Simulation Configuration
//!
//! All tuning constants of the match/season core, grouped by component.
//!
//! ## Usage
//! ```rust
//! use matchday_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! let arcade = SimConfig::arcade();
//! assert!(arcade.events.goal_probability > config.events.goal_probability);
//! ```

mod event_config;
mod playback_config;
mod resolver_config;

pub use event_config::EventConfig;
pub use playback_config::PlaybackConfig;
pub use resolver_config::ResolverConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::models::MATCH_MINUTES;

/// Reference configuration shipped with the crate.
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../../../data/sim_config.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimConfig {
    #[serde(default)]
    pub events: EventConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl SimConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// More goals, fewer stoppages.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.events.goal_probability = 0.04;
        cfg.events.chance_probability = 0.07;
        cfg.events.foul_probability = 0.02;
        cfg.resolver.base_expected_goals = 2.1;
        cfg
    }

    /// Tight, low-scoring football.
    pub fn defensive() -> Self {
        let mut cfg = Self::default();
        cfg.events.goal_probability = 0.017;
        cfg.events.foul_probability = 0.04;
        cfg.events.yellow_card_probability = 0.02;
        cfg.resolver.base_expected_goals = 1.1;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: SimConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let ev = &self.events;
        for (name, p) in [
            ("goal_probability", ev.goal_probability),
            ("chance_probability", ev.chance_probability),
            ("yellow_card_probability", ev.yellow_card_probability),
            ("corner_probability", ev.corner_probability),
            ("foul_probability", ev.foul_probability),
            ("save_share", ev.save_share),
            ("red_card_share", ev.red_card_share),
            ("ticker_card_probability", self.resolver.ticker_card_probability),
            ("ticker_red_share", self.resolver.ticker_red_share),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::Config(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if ev.band_total() > 1.0 {
            return Err(CoreError::Config(format!(
                "event bands sum to {:.3}, must not exceed 1",
                ev.band_total()
            )));
        }
        if ev.min_substitutions > ev.max_substitutions {
            return Err(CoreError::Config(format!(
                "min_substitutions ({}) exceeds max_substitutions ({})",
                ev.min_substitutions, ev.max_substitutions
            )));
        }
        if ev.earliest_substitution == 0 || ev.earliest_substitution > MATCH_MINUTES {
            return Err(CoreError::Config(format!(
                "earliest_substitution must be within 1..={MATCH_MINUTES}"
            )));
        }
        let res = &self.resolver;
        for (name, v) in [
            ("events.home_advantage", ev.home_advantage),
            ("resolver.home_advantage", res.home_advantage),
            ("base_expected_goals", res.base_expected_goals),
            ("reputation_divisor", res.reputation_divisor),
            ("min_expected_goals", res.min_expected_goals),
        ] {
            if !v.is_finite() {
                return Err(CoreError::Config(format!("{name} must be a finite number, got {v}")));
            }
        }
        if ev.home_advantage < 0.0 || res.home_advantage < 0.0 {
            return Err(CoreError::Config("home advantage must not be negative".into()));
        }
        if self.resolver.reputation_divisor <= 0.0 {
            return Err(CoreError::Config("reputation_divisor must be positive".into()));
        }
        if self.resolver.min_expected_goals <= 0.0 {
            return Err(CoreError::Config("min_expected_goals must be positive".into()));
        }
        if self.playback.base_tick_ms == 0 {
            return Err(CoreError::Config("base_tick_ms must be positive".into()));
        }
        crate::engine::clock::PlaybackSpeed::try_from(self.playback.default_speed)?;
        Ok(())
    }
}

/// Clamp a probability into [0, 1]; NaN counts as never.
pub(crate) fn unit_interval(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_presets_are_valid() {
        for cfg in [SimConfig::realistic(), SimConfig::arcade(), SimConfig::defensive()] {
            cfg.validate().unwrap();
        }
    }

    #[test]
    fn test_shipped_yaml_matches_default() {
        let cfg = SimConfig::from_yaml_str(DEFAULT_CONFIG_YAML).unwrap();
        assert_eq!(cfg, SimConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = SimConfig::from_yaml_str("events:\n  goal_probability: 0.03\n").unwrap();
        assert_eq!(cfg.events.goal_probability, 0.03);
        assert_eq!(cfg.events.foul_probability, EventConfig::default().foul_probability);
        assert_eq!(cfg.resolver, ResolverConfig::default());
    }

    #[test]
    fn test_rejects_overfull_bands() {
        let err = SimConfig::from_yaml_str("events:\n  foul_probability: 0.95\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)), "{err}");
    }

    #[test]
    fn test_rejects_bad_speed() {
        let err = SimConfig::from_yaml_str("playback:\n  default_speed: 3\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidSpeed(3)));
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        for yaml in [
            "events:\n  home_advantage: .nan\n",
            "resolver:\n  home_advantage: .inf\n",
            "resolver:\n  base_expected_goals: .nan\n",
            "events:\n  save_share: .nan\n",
        ] {
            let err = SimConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, CoreError::Config(_)), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_unit_interval_sanitises_probabilities() {
        assert_eq!(unit_interval(0.3), 0.3);
        assert_eq!(unit_interval(-1.0), 0.0);
        assert_eq!(unit_interval(f64::INFINITY), 1.0);
        assert_eq!(unit_interval(f64::NAN), 0.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resolver:\n  home_advantage: 0.5").unwrap();
        let cfg = SimConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.resolver.home_advantage, 0.5);
    }
}
