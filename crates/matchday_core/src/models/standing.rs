use serde::{Deserialize, Serialize};

use super::club::Club;
use super::match_result::Outcome;

/// One row of the league table. Always derived from results, never stored
/// as a source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    /// 1-based table position, assigned after sorting.
    pub position: usize,
    pub club: Club,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingEntry {
    pub fn new(club: Club) -> Self {
        Self {
            position: 0,
            club,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    pub fn record(&mut self, scored: u8, conceded: u8, outcome: Outcome) {
        self.played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;
        self.points += outcome.points();
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Draw => self.drawn += 1,
            Outcome::Loss => self.lost += 1,
        }
    }
}
