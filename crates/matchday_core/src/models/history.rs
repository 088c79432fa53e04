use serde::{Deserialize, Serialize};

use super::club::ClubId;
use super::match_result::MatchResult;
use super::standing::StandingEntry;

/// Goals credited to a named player over a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerTally {
    pub player: String,
    pub goals: u32,
}

/// End-of-season summary for the focal club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub club: ClubId,
    /// `None` when the club was not part of the final table.
    pub position: Option<usize>,
    pub points: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Highest scorers first, ties by name.
    pub top_scorers: Vec<ScorerTally>,
}

/// Archived season. Built once at season end and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonHistory {
    pub season: u32,
    pub results: Vec<MatchResult>,
    pub final_standings: Vec<StandingEntry>,
    pub summary: SeasonSummary,
}

impl SeasonHistory {
    pub fn champion(&self) -> Option<&StandingEntry> {
        self.final_standings.first()
    }
}
