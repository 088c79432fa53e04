use serde::{Deserialize, Serialize};

use super::club::{Club, ClubId};
use super::fixture::{FixtureId, LeagueFixture};

/// Outcome of a match from one club's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn points(self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }
}

/// Final score of a played fixture. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// `"{season}-{fixture_id}"`
    pub id: String,
    pub fixture_id: FixtureId,
    pub season: u32,
    pub home: Club,
    pub away: Club,
    pub home_score: u8,
    pub away_score: u8,
    pub matchday: u32,
}

impl MatchResult {
    pub fn from_fixture(fixture: &LeagueFixture, season: u32, score: (u8, u8)) -> Self {
        Self {
            id: format!("{}-{}", season, fixture.id),
            fixture_id: fixture.id,
            season,
            home: fixture.home.clone(),
            away: fixture.away.clone(),
            home_score: score.0,
            away_score: score.1,
            matchday: fixture.matchday,
        }
    }

    pub fn involves(&self, club: ClubId) -> bool {
        self.home.id == club || self.away.id == club
    }

    pub fn is_home(&self, club: ClubId) -> bool {
        self.home.id == club
    }

    pub fn total_goals(&self) -> u32 {
        self.home_score as u32 + self.away_score as u32
    }

    /// `(scored, conceded)` for `club`, or `None` if it did not play.
    pub fn goals_for_against(&self, club: ClubId) -> Option<(u8, u8)> {
        if self.home.id == club {
            Some((self.home_score, self.away_score))
        } else if self.away.id == club {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }

    pub fn outcome_for(&self, club: ClubId) -> Option<Outcome> {
        self.goals_for_against(club).map(|(gf, ga)| match gf.cmp(&ga) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        })
    }

    pub fn opponent_of(&self, club: ClubId) -> Option<&Club> {
        if self.home.id == club {
            Some(&self.away)
        } else if self.away.id == club {
            Some(&self.home)
        } else {
            None
        }
    }
}
