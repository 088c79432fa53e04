//! Match Clock / Playback Controller
//!
//! ```text
//! Idle ──start──► Running ──minute 90 / skip──► Finished
//!                  ▲    │
//!            resume│    │pause
//!                  │    ▼
//!                  Paused ──skip──► Finished
//! ```
//!
//! The clock never owns a timer. It is driven by [`MatchClock::advance`]
//! with elapsed time (virtual in tests, measured by the
//! [`playback`](super::playback) driver in real time) and fires one tick per
//! elapsed interval. Every published [`LiveSnapshot`] is recomputed from the
//! immutable timeline at the current minute.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::live_stats::LiveStats;
use crate::config::PlaybackConfig;
use crate::error::CoreError;
use crate::models::{MatchEvent, MatchTimeline, MATCH_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackSpeed {
    #[default]
    X1,
    X2,
    X4,
}

impl PlaybackSpeed {
    pub fn multiplier(self) -> u32 {
        match self {
            PlaybackSpeed::X1 => 1,
            PlaybackSpeed::X2 => 2,
            PlaybackSpeed::X4 => 4,
        }
    }

    /// Tick interval: `base / speed`.
    pub fn interval(self, base: Duration) -> Duration {
        base / self.multiplier()
    }
}

impl TryFrom<u8> for PlaybackSpeed {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlaybackSpeed::X1),
            2 => Ok(PlaybackSpeed::X2),
            4 => Ok(PlaybackSpeed::X4),
            other => {
                warn!(speed = other, "rejected playback speed");
                Err(CoreError::InvalidSpeed(other))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    NotStarted,
    FirstHalf,
    SecondHalf,
    FullTime,
}

impl Period {
    pub fn at(minute: u8) -> Self {
        match minute {
            0 => Period::NotStarted,
            1..=45 => Period::FirstHalf,
            m if m < MATCH_MINUTES => Period::SecondHalf,
            _ => Period::FullTime,
        }
    }
}

/// Publicly observable state at one instant of playback.
#[derive(Debug, Clone)]
pub struct LiveSnapshot {
    timeline: Arc<MatchTimeline>,
    pub minute: u8,
    pub state: ClockState,
    pub speed: PlaybackSpeed,
    pub period: Period,
    pub score: (u8, u8),
    pub stats: LiveStats,
}

impl LiveSnapshot {
    fn capture(timeline: &Arc<MatchTimeline>, minute: u8, state: ClockState, speed: PlaybackSpeed) -> Self {
        let visible = timeline.events_until(minute);
        Self {
            timeline: Arc::clone(timeline),
            minute,
            state,
            speed,
            period: Period::at(minute),
            score: timeline.score_at(minute),
            stats: LiveStats::from_events(visible),
        }
    }

    /// Events with `minute <= self.minute`.
    pub fn events(&self) -> &[MatchEvent] {
        self.timeline.events_until(self.minute)
    }

    pub fn timeline(&self) -> &Arc<MatchTimeline> {
        &self.timeline
    }

    pub fn is_finished(&self) -> bool {
        self.state == ClockState::Finished
    }
}

#[derive(Debug)]
pub struct MatchClock {
    timeline: Option<Arc<MatchTimeline>>,
    state: ClockState,
    minute: u8,
    speed: PlaybackSpeed,
    base_tick: Duration,
    /// Time left until the in-flight tick fires.
    until_tick: Duration,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl MatchClock {
    pub fn new(config: &PlaybackConfig) -> Self {
        let speed = PlaybackSpeed::try_from(config.default_speed).unwrap_or_default();
        Self::with_base_tick(config.base_tick(), speed)
    }

    pub fn with_base_tick(base_tick: Duration, speed: PlaybackSpeed) -> Self {
        Self {
            timeline: None,
            state: ClockState::Idle,
            minute: 0,
            speed,
            base_tick,
            until_tick: speed.interval(base_tick),
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn is_finished(&self) -> bool {
        self.state == ClockState::Finished
    }

    pub fn timeline(&self) -> Option<&Arc<MatchTimeline>> {
        self.timeline.as_ref()
    }

    fn interval(&self) -> Duration {
        self.speed.interval(self.base_tick)
    }

    /// Begin playback of `timeline` from minute 0.
    ///
    /// Starting the timeline that is already loaded is ignored and returns
    /// `false`. A different timeline replaces the current one.
    pub fn start(&mut self, timeline: Arc<MatchTimeline>) -> bool {
        if let Some(current) = &self.timeline {
            if Arc::ptr_eq(current, &timeline) {
                warn!(state = ?self.state, "playback already started for this timeline");
                return false;
            }
        }
        debug!(home = %timeline.home().name, away = %timeline.away().name, "playback started");
        self.timeline = Some(timeline);
        self.minute = 0;
        self.state = ClockState::Running;
        self.until_tick = self.interval();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.state = ClockState::Paused;
        debug!(minute = self.minute, "playback paused");
        true
    }

    /// Resume from the paused minute; the next tick is a full interval away.
    pub fn resume(&mut self) -> bool {
        if self.state != ClockState::Paused {
            return false;
        }
        self.state = ClockState::Running;
        self.until_tick = self.interval();
        debug!(minute = self.minute, "playback resumed");
        true
    }

    /// Applies from the tick after the one in flight.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        if speed != self.speed {
            debug!(from = ?self.speed, to = ?speed, "playback speed changed");
        }
        self.speed = speed;
    }

    /// Jump straight to full time. Only the final state is published.
    pub fn skip_to_end(&mut self) -> Option<LiveSnapshot> {
        if !matches!(self.state, ClockState::Running | ClockState::Paused) {
            return None;
        }
        self.minute = MATCH_MINUTES;
        self.state = ClockState::Finished;
        debug!("playback skipped to full time");
        self.snapshot()
    }

    /// Advance one match minute. No-op unless running.
    pub fn tick(&mut self) -> Option<LiveSnapshot> {
        if self.state != ClockState::Running {
            return None;
        }
        self.minute = (self.minute + 1).min(MATCH_MINUTES);
        if self.minute >= MATCH_MINUTES {
            self.state = ClockState::Finished;
            debug!("playback reached full time");
        }
        trace!(minute = self.minute, "tick");
        self.snapshot()
    }

    /// Feed elapsed time; returns one snapshot per tick that fired.
    pub fn advance(&mut self, mut elapsed: Duration) -> Vec<LiveSnapshot> {
        let mut published = Vec::new();
        while self.state == ClockState::Running {
            if elapsed < self.until_tick {
                self.until_tick -= elapsed;
                break;
            }
            elapsed -= self.until_tick;
            if let Some(snapshot) = self.tick() {
                published.push(snapshot);
            }
            self.until_tick = self.interval();
        }
        published
    }

    /// Time until the next tick, or `None` when nothing is scheduled.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        (self.state == ClockState::Running).then_some(self.until_tick)
    }

    pub fn snapshot(&self) -> Option<LiveSnapshot> {
        self.timeline
            .as_ref()
            .map(|timeline| LiveSnapshot::capture(timeline, self.minute, self.state, self.speed))
    }

    /// Cancel the pending tick and release the timeline.
    pub fn stop(&mut self) {
        if self.timeline.is_some() {
            debug!(minute = self.minute, "playback stopped");
        }
        self.timeline = None;
        self.state = ClockState::Idle;
        self.minute = 0;
        self.until_tick = self.interval();
    }
}
