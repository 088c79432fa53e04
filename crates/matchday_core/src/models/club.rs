use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable club identifier supplied by the club registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubId(pub u32);

impl fmt::Display for ClubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Club({})", self.0)
    }
}

/// A league member. Immutable for the duration of a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub short_name: String,
    /// Strength proxy, roughly 40-98.
    pub reputation: u8,
    /// Carried for the registry; not read by the simulation.
    #[serde(default)]
    pub balance: i64,
}

impl Club {
    pub fn new(id: u32, name: impl Into<String>, reputation: u8) -> Self {
        let name = name.into();
        let short_name = name.chars().filter(|c| !c.is_whitespace()).take(3).collect::<String>();
        Self {
            id: ClubId(id),
            short_name: short_name.to_uppercase(),
            name,
            reputation,
            balance: 0,
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }
}

/// Player names used only to label events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squad {
    pub club_id: ClubId,
    pub players: Vec<String>,
}

/// Source of squad lists. Implemented by whatever owns player data.
pub trait SquadProvider {
    fn squad(&self, club: ClubId) -> Option<&[String]>;
}

/// Provider for leagues without player data; events omit the player field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSquads;

impl SquadProvider for NoSquads {
    fn squad(&self, _club: ClubId) -> Option<&[String]> {
        None
    }
}

impl SquadProvider for HashMap<ClubId, Vec<String>> {
    fn squad(&self, club: ClubId) -> Option<&[String]> {
        self.get(&club).map(Vec::as_slice).filter(|players| !players.is_empty())
    }
}

impl SquadProvider for [Squad] {
    fn squad(&self, club: ClubId) -> Option<&[String]> {
        self.iter()
            .find(|s| s.club_id == club)
            .map(|s| s.players.as_slice())
            .filter(|players| !players.is_empty())
    }
}

impl SquadProvider for Vec<Squad> {
    fn squad(&self, club: ClubId) -> Option<&[String]> {
        self.as_slice().squad(club)
    }
}
