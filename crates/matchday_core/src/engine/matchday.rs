//! Matchday live board.
//!
//! Every timeline of a matchday is built up front. The focal match carries
//! a full event timeline; the rest carry tickers that are revealed at the
//! focal clock's minute. One clock, no extra timers.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::clock::{ClockState, LiveSnapshot, MatchClock, PlaybackSpeed};
use crate::config::PlaybackConfig;
use crate::error::{CoreError, Result};
use crate::models::{Fixture, FixtureId, LeagueFixture, MatchTimeline, TickerTimeline};

/// The match the user watches.
#[derive(Debug, Clone)]
pub struct FocalMatch {
    pub fixture: Fixture,
    pub timeline: Arc<MatchTimeline>,
}

/// An AI-resolved match revealed through its ticker.
#[derive(Debug, Clone)]
pub struct TickerMatch {
    pub fixture: LeagueFixture,
    pub ticker: TickerTimeline,
}

impl TickerMatch {
    pub fn score_at(&self, minute: u8) -> (u8, u8) {
        self.ticker.score_at(minute)
    }

    pub fn final_score(&self) -> (u8, u8) {
        self.ticker.final_score()
    }
}

/// One row of the "other scores" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardLine {
    pub fixture_id: FixtureId,
    pub home: String,
    pub away: String,
    pub home_score: u8,
    pub away_score: u8,
    pub focal: bool,
}

/// All timelines of one matchday, ready for playback and commit.
#[derive(Debug, Clone)]
pub struct MatchdayBoard {
    pub season: u32,
    pub matchday: u32,
    /// `None` when the focal club has a bye.
    pub focal: Option<FocalMatch>,
    pub others: Vec<TickerMatch>,
}

impl MatchdayBoard {
    pub fn fixture_count(&self) -> usize {
        self.others.len() + usize::from(self.focal.is_some())
    }

    pub fn focal_timeline(&self) -> Option<&Arc<MatchTimeline>> {
        self.focal.as_ref().map(|f| &f.timeline)
    }

    /// Scores of every match at `minute`, focal match first.
    pub fn scores_at(&self, minute: u8) -> Vec<BoardLine> {
        let focal = self.focal.iter().map(|f| {
            let (home_score, away_score) = f.timeline.score_at(minute);
            BoardLine {
                fixture_id: f.fixture.id(),
                home: f.fixture.league.home.short_name.clone(),
                away: f.fixture.league.away.short_name.clone(),
                home_score,
                away_score,
                focal: true,
            }
        });
        let others = self.others.iter().map(|m| {
            let (home_score, away_score) = m.score_at(minute);
            BoardLine {
                fixture_id: m.fixture.id,
                home: m.fixture.home.short_name.clone(),
                away: m.fixture.away.short_name.clone(),
                home_score,
                away_score,
                focal: false,
            }
        });
        focal.chain(others).collect()
    }
}

/// Focal snapshot plus every other score at the same minute.
#[derive(Debug, Clone)]
pub struct MatchdayFrame {
    pub focal: LiveSnapshot,
    pub scores: Vec<BoardLine>,
}

/// A matchday being watched: the board and the clock that reveals it.
///
/// The clock plays the focal timeline; the tickers follow its minute. The
/// season only accepts the board once the clock has reached full time.
#[derive(Debug)]
pub struct LiveMatchday {
    board: MatchdayBoard,
    clock: MatchClock,
}

impl LiveMatchday {
    /// Kick off the focal match. Fails on a bye, where there is nothing to
    /// watch.
    pub fn start(board: MatchdayBoard, config: &PlaybackConfig) -> Result<Self> {
        let Some(timeline) = board.focal_timeline().cloned() else {
            return Err(CoreError::NoFocalFixture { matchday: board.matchday });
        };
        let mut clock = MatchClock::new(config);
        clock.start(timeline);
        debug!(season = board.season, matchday = board.matchday, "matchday kicked off");
        Ok(Self { board, clock })
    }

    pub fn board(&self) -> &MatchdayBoard {
        &self.board
    }

    pub fn minute(&self) -> u8 {
        self.clock.minute()
    }

    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.clock.speed()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn pause(&mut self) -> bool {
        self.clock.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.clock.resume()
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.clock.set_speed(speed);
    }

    pub fn skip_to_end(&mut self) -> Option<MatchdayFrame> {
        let snapshot = self.clock.skip_to_end()?;
        Some(self.frame(snapshot))
    }

    pub fn tick(&mut self) -> Option<MatchdayFrame> {
        let snapshot = self.clock.tick()?;
        Some(self.frame(snapshot))
    }

    /// Feed elapsed time; one frame per tick that fired.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MatchdayFrame> {
        self.clock
            .advance(elapsed)
            .into_iter()
            .map(|snapshot| self.frame(snapshot))
            .collect()
    }

    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.clock.time_until_next_tick()
    }

    pub fn snapshot(&self) -> Option<MatchdayFrame> {
        self.clock.snapshot().map(|snapshot| self.frame(snapshot))
    }

    /// Every score at the clock's current minute.
    pub fn scores(&self) -> Vec<BoardLine> {
        self.board.scores_at(self.clock.minute())
    }

    fn frame(&self, focal: LiveSnapshot) -> MatchdayFrame {
        let scores = self.board.scores_at(focal.minute);
        MatchdayFrame { focal, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::event_sim::simulate;
    use crate::engine::resolver::resolve_ticker;
    use crate::models::{Club, ClubId, NoSquads};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board() -> MatchdayBoard {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let a = Club::new(1, "Albion", 80);
        let b = Club::new(2, "Borough", 70);
        let c = Club::new(3, "City", 75);
        let d = Club::new(4, "Dynamo", 60);

        let focal_fixture = LeagueFixture { id: FixtureId(1), home: a.clone(), away: b.clone(), matchday: 1 };
        let other_fixture = LeagueFixture { id: FixtureId(2), home: c.clone(), away: d.clone(), matchday: 1 };
        let timeline = Arc::new(simulate(&a, &b, &NoSquads, &mut rng));
        let ticker = resolve_ticker(&c, &d, &mut rng);

        MatchdayBoard {
            season: 1,
            matchday: 1,
            focal: Some(FocalMatch {
                fixture: focal_fixture.for_club(ClubId(1)).unwrap(),
                timeline,
            }),
            others: vec![TickerMatch { fixture: other_fixture, ticker }],
        }
    }

    #[test]
    fn test_board_reveals_in_lockstep() {
        let board = board();
        assert_eq!(board.fixture_count(), 2);

        let kickoff = board.scores_at(0);
        assert!(kickoff.iter().all(|l| l.home_score == 0 && l.away_score == 0));
        assert!(kickoff[0].focal);
        assert_eq!(kickoff[1].home, "CIT");

        let full_time = board.scores_at(90);
        let focal = board.focal_timeline().unwrap().final_score();
        assert_eq!((full_time[0].home_score, full_time[0].away_score), focal);
        assert_eq!((full_time[1].home_score, full_time[1].away_score), board.others[0].final_score());

        // Scores never go down as the minute advances.
        let mut previous = (0, 0);
        for minute in 0..=90 {
            let line = &board.scores_at(minute)[1];
            assert!(line.home_score >= previous.0 && line.away_score >= previous.1);
            previous = (line.home_score, line.away_score);
        }
    }

    #[test]
    fn test_live_matchday_reveals_with_the_clock() {
        let board = board();
        let mut live = LiveMatchday::start(board.clone(), &PlaybackConfig::default()).unwrap();
        assert_eq!(live.state(), ClockState::Running);
        assert_eq!(live.scores(), board.scores_at(0));

        let frames = live.advance(Duration::from_millis(30 * 1000));
        assert_eq!(frames.len(), 30);
        for frame in &frames {
            assert_eq!(frame.scores, board.scores_at(frame.focal.minute));
            assert_eq!(
                (frame.scores[0].home_score, frame.scores[0].away_score),
                frame.focal.score
            );
        }
        assert_eq!(live.minute(), 30);
        assert!(!live.is_finished());

        assert!(live.pause());
        assert!(live.advance(Duration::from_secs(600)).is_empty());
        assert!(live.resume());

        let last = live.skip_to_end().unwrap();
        assert!(live.is_finished());
        assert_eq!(last.scores, board.scores_at(90));
        assert!(live.tick().is_none());
    }

    #[test]
    fn test_bye_has_nothing_to_watch() {
        let mut board = board();
        board.focal = None;
        let err = LiveMatchday::start(board, &PlaybackConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::NoFocalFixture { matchday: 1 }));
    }
}
