//! Match event generation parameters

use serde::{Deserialize, Serialize};

/// Per-minute probability bands used by the event simulator.
///
/// One uniform draw per minute is classified against the bands in
/// declaration order (goal, chance, yellow, corner, foul); at most one
/// event fires per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Goal band (default: 0.025)
    pub goal_probability: f64,
    /// Shot/chance band (default: 0.055)
    pub chance_probability: f64,
    /// Yellow card band (default: 0.015)
    pub yellow_card_probability: f64,
    /// Corner band (default: 0.025)
    pub corner_probability: f64,
    /// Foul band (default: 0.03)
    pub foul_probability: f64,

    /// Share of chances that become keeper saves (default: 0.4)
    pub save_share: f64,
    /// Share of fouls that become straight reds (default: 0.05)
    pub red_card_share: f64,

    /// Reputation points added to the home side's weight (default: 5)
    pub home_advantage: f64,

    /// Forced substitutions per match, inclusive range (default: 3..=5)
    pub min_substitutions: u8,
    pub max_substitutions: u8,
    /// Earliest substitution minute (default: 55)
    pub earliest_substitution: u8,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            goal_probability: 0.025,
            chance_probability: 0.055,
            yellow_card_probability: 0.015,
            corner_probability: 0.025,
            foul_probability: 0.03,

            save_share: 0.4,
            red_card_share: 0.05,

            home_advantage: 5.0,

            min_substitutions: 3,
            max_substitutions: 5,
            earliest_substitution: 55,
        }
    }
}

impl EventConfig {
    pub fn band_total(&self) -> f64 {
        self.goal_probability
            + self.chance_probability
            + self.yellow_card_probability
            + self.corner_probability
            + self.foul_probability
    }

    pub(crate) fn bands(&self) -> [f64; 5] {
        [
            self.goal_probability,
            self.chance_probability,
            self.yellow_card_probability,
            self.corner_probability,
            self.foul_probability,
        ]
    }
}
