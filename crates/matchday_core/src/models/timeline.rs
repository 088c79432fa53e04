//! Pre-generated match timelines.
//!
//! A timeline is produced once, before playback, and never mutated
//! afterwards. Scores are always counted from its goal events.

use serde::{Deserialize, Serialize};

use super::club::Club;
use super::events::{events_until, score_at, MatchEvent, TickerEvent};

/// Minute-ordered event list of one fully simulated match.
///
/// Deserialising goes through [`MatchTimeline::new`], so loaded timelines
/// are ordered too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMatchTimeline")]
pub struct MatchTimeline {
    home: Club,
    away: Club,
    events: Vec<MatchEvent>,
}

impl MatchTimeline {
    /// Events are stably sorted by minute; same-minute order is kept.
    pub fn new(home: Club, away: Club, mut events: Vec<MatchEvent>) -> Self {
        events.sort_by_key(|e| e.minute);
        Self { home, away, events }
    }

    pub fn home(&self) -> &Club {
        &self.home
    }

    pub fn away(&self) -> &Club {
        &self.away
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn events_until(&self, minute: u8) -> &[MatchEvent] {
        events_until(&self.events, minute)
    }

    pub fn score_at(&self, minute: u8) -> (u8, u8) {
        score_at(&self.events, minute)
    }

    pub fn final_score(&self) -> (u8, u8) {
        score_at(&self.events, u8::MAX)
    }

    pub fn into_events(self) -> Vec<MatchEvent> {
        self.events
    }
}

#[derive(Deserialize)]
struct RawMatchTimeline {
    home: Club,
    away: Club,
    events: Vec<MatchEvent>,
}

impl From<RawMatchTimeline> for MatchTimeline {
    fn from(raw: RawMatchTimeline) -> Self {
        Self::new(raw.home, raw.away, raw.events)
    }
}

/// Goal/card timeline of a resolved (not fully simulated) match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTickerTimeline")]
pub struct TickerTimeline {
    events: Vec<TickerEvent>,
}

impl TickerTimeline {
    pub fn new(mut events: Vec<TickerEvent>) -> Self {
        events.sort_by_key(|e| e.minute);
        Self { events }
    }

    pub fn events(&self) -> &[TickerEvent] {
        &self.events
    }

    pub fn events_until(&self, minute: u8) -> &[TickerEvent] {
        events_until(&self.events, minute)
    }

    pub fn score_at(&self, minute: u8) -> (u8, u8) {
        score_at(&self.events, minute)
    }

    pub fn final_score(&self) -> (u8, u8) {
        score_at(&self.events, u8::MAX)
    }
}

#[derive(Deserialize)]
struct RawTickerTimeline {
    events: Vec<TickerEvent>,
}

impl From<RawTickerTimeline> for TickerTimeline {
    fn from(raw: RawTickerTimeline) -> Self {
        Self::new(raw.events)
    }
}
