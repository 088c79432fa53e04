use thiserror::Error;

use crate::models::ClubId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid playback speed: {0} (expected 1, 2 or 4)")]
    InvalidSpeed(u8),

    #[error("Unknown club: {0}")]
    UnknownClub(ClubId),

    #[error("Season not complete: matchday {matchday} of {total}")]
    SeasonNotComplete { matchday: u32, total: u32 },

    #[error("No focal fixture on matchday {matchday}")]
    NoFocalFixture { matchday: u32 },

    #[error("Season {season} is complete")]
    SeasonComplete { season: u32 },

    #[error("Matchday {matchday} still playing (minute {minute})")]
    PlaybackNotFinished { matchday: u32, minute: u8 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Whether the caller can retry after fixing input (as opposed to a
    /// lifecycle call made at the wrong time).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CoreError::Config(_)
                | CoreError::InvalidSpeed(_)
                | CoreError::UnknownClub(_)
                | CoreError::Serialization(_)
                | CoreError::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
