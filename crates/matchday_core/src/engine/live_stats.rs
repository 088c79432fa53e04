//! Rolling match statistics, recomputed from the visible events on every
//! tick. Nothing here is accumulated across ticks.

use serde::{Deserialize, Serialize};

use crate::models::{EventType, MatchEvent, TeamSide};

/// Per-side counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideStats {
    pub goals: u8,
    pub shots: u16,
    pub shots_on_target: u16,
    pub corners: u16,
    pub fouls: u16,
    pub yellow_cards: u8,
    pub red_cards: u8,
    /// Percentage, 30..=70. Both sides sum to 100.
    pub possession: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    pub home: SideStats,
    pub away: SideStats,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self::from_events(&[])
    }
}

impl LiveStats {
    pub fn from_events(events: &[MatchEvent]) -> Self {
        let mut home = SideStats::default();
        let mut away = SideStats::default();

        for event in events {
            let side = match event.team {
                TeamSide::Home => &mut home,
                TeamSide::Away => &mut away,
            };
            match event.event_type {
                EventType::Goal => {
                    side.goals = side.goals.saturating_add(1);
                    side.shots += 1;
                    side.shots_on_target += 1;
                }
                EventType::Save => {
                    side.shots += 1;
                    side.shots_on_target += 1;
                }
                EventType::Chance => side.shots += 1,
                EventType::Corner => side.corners += 1,
                EventType::Foul => side.fouls += 1,
                EventType::YellowCard => side.yellow_cards = side.yellow_cards.saturating_add(1),
                EventType::RedCard => {
                    side.red_cards = side.red_cards.saturating_add(1);
                    side.fouls += 1;
                }
                EventType::Substitution => {}
            }
        }

        let (home_pos, away_pos) = possession(&home, &away);
        home.possession = home_pos;
        away.possession = away_pos;
        Self { home, away }
    }

    pub fn side(&self, side: TeamSide) -> &SideStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

/// Attacking pressure (shots + corners) tilts possession away from 50/50.
fn possession(home: &SideStats, away: &SideStats) -> (u8, u8) {
    let home_pressure = (home.shots + home.corners) as f64;
    let away_pressure = (away.shots + away.corners) as f64;
    // Neutral denominator before any attacking event.
    let total = (home_pressure + away_pressure).max(1.0);
    let tilt = (home_pressure - away_pressure) / total * 15.0;
    let home_share = (50.0 + tilt).round().clamp(30.0, 70.0) as u8;
    (home_share, 100 - home_share)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(minute: u8, event_type: EventType, team: TeamSide) -> MatchEvent {
        MatchEvent::new(minute, event_type, team, None, "X")
    }

    #[test]
    fn test_empty_is_even() {
        let stats = LiveStats::from_events(&[]);
        assert_eq!(stats.home.possession, 50);
        assert_eq!(stats.away.possession, 50);
        assert_eq!(stats.home.shots, 0);
    }

    #[test]
    fn test_counts_by_side() {
        let events = vec![
            ev(3, EventType::Goal, TeamSide::Home),
            ev(9, EventType::Save, TeamSide::Home),
            ev(12, EventType::Chance, TeamSide::Away),
            ev(20, EventType::Corner, TeamSide::Home),
            ev(25, EventType::Foul, TeamSide::Away),
            ev(30, EventType::YellowCard, TeamSide::Away),
            ev(60, EventType::RedCard, TeamSide::Home),
            ev(70, EventType::Substitution, TeamSide::Away),
        ];
        let stats = LiveStats::from_events(&events);

        assert_eq!(stats.home.goals, 1);
        assert_eq!(stats.home.shots, 2);
        assert_eq!(stats.home.shots_on_target, 2);
        assert_eq!(stats.home.corners, 1);
        assert_eq!(stats.home.red_cards, 1);
        assert_eq!(stats.home.fouls, 1);
        assert_eq!(stats.away.shots, 1);
        assert_eq!(stats.away.shots_on_target, 0);
        assert_eq!(stats.away.fouls, 1);
        assert_eq!(stats.away.yellow_cards, 1);
    }

    #[test]
    fn test_possession_is_bounded_and_sums_to_100() {
        let one_sided: Vec<MatchEvent> =
            (1..=40).map(|m| ev(m, EventType::Chance, TeamSide::Home)).collect();
        let stats = LiveStats::from_events(&one_sided);
        assert_eq!(stats.home.possession, 65);
        assert_eq!(stats.home.possession + stats.away.possession, 100);

        let mixed = vec![
            ev(1, EventType::Chance, TeamSide::Home),
            ev(2, EventType::Corner, TeamSide::Home),
            ev(3, EventType::Chance, TeamSide::Away),
        ];
        let stats = LiveStats::from_events(&mixed);
        assert_eq!(stats.home.possession, 55);
        assert_eq!(stats.away.possession, 45);
    }
}
