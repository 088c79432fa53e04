pub mod club;
pub mod events;
pub mod fixture;
pub mod history;
pub mod match_result;
pub mod standing;
pub mod timeline;

pub use club::{Club, ClubId, NoSquads, Squad, SquadProvider};
pub use events::{
    events_until, score_at, EventType, MatchEvent, TeamSide, TickerEvent, TimedEvent,
};
pub use fixture::{Fixture, FixtureId, LeagueFixture};
pub use history::{ScorerTally, SeasonHistory, SeasonSummary};
pub use match_result::{MatchResult, Outcome};
pub use standing::StandingEntry;
pub use timeline::{MatchTimeline, TickerTimeline};

/// Regulation length of a match in minutes.
pub const MATCH_MINUTES: u8 = 90;
