//! Quick-resolution parameters for non-focal matches

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Expected goals for two equal sides (default: 1.5)
    pub base_expected_goals: f64,
    /// Reputation delta is divided by this before being added (default: 100)
    pub reputation_divisor: f64,
    /// Added to the home side only (default: 0.3)
    pub home_advantage: f64,
    /// Lower bound on either side's expected goals (default: 0.5)
    pub min_expected_goals: f64,
    /// Sampled goal counts are capped here (default: 10)
    pub max_goals: u8,

    /// Card slots in the live ticker (default: 15)
    pub ticker_slots: u8,
    /// Chance of a card in each ticker slot (default: 0.12)
    pub ticker_card_probability: f64,
    /// Share of ticker cards that are red (default: 0.08)
    pub ticker_red_share: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_expected_goals: 1.5,
            reputation_divisor: 100.0,
            home_advantage: 0.3,
            min_expected_goals: 0.5,
            max_goals: 10,

            ticker_slots: 15,
            ticker_card_probability: 0.12,
            ticker_red_share: 0.08,
        }
    }
}
