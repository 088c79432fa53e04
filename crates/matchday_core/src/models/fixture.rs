use serde::{Deserialize, Serialize};
use std::fmt;

use super::club::{Club, ClubId};

/// Fixture identifier, assigned 1..=N·(N−1) in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(pub u32);

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scheduled pairing of the league calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueFixture {
    pub id: FixtureId,
    pub home: Club,
    pub away: Club,
    pub matchday: u32,
}

impl LeagueFixture {
    pub fn involves(&self, club: ClubId) -> bool {
        self.home.id == club || self.away.id == club
    }

    /// Project onto `club`. Returns `None` when the club does not play.
    pub fn for_club(&self, club: ClubId) -> Option<Fixture> {
        if !self.involves(club) {
            return None;
        }
        Some(Fixture { league: self.clone(), is_home: self.home.id == club })
    }
}

/// A league fixture seen from one club's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(flatten)]
    pub league: LeagueFixture,
    pub is_home: bool,
}

impl Fixture {
    pub fn id(&self) -> FixtureId {
        self.league.id
    }

    pub fn matchday(&self) -> u32 {
        self.league.matchday
    }

    pub fn opponent(&self) -> &Club {
        if self.is_home {
            &self.league.away
        } else {
            &self.league.home
        }
    }
}
