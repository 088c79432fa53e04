//! Season Lifecycle Manager
//!
//! Single writer of the season state: the fixture calendar, the current
//! matchday and the result set. A matchday is played in three steps:
//!
//! 1. [`SeasonManager::prepare_matchday`] builds every timeline of the
//!    matchday up front (the focal club's full event timeline plus a ticker
//!    per other fixture) into a [`MatchdayBoard`].
//! 2. [`SeasonManager::start_matchday`] puts that board on a match clock as
//!    a [`LiveMatchday`]; the caller drives the clock.
//! 3. [`SeasonManager::complete_matchday`] commits one result per fixture
//!    in a single batch once the clock reaches full time, then advances.
//!
//! [`SeasonManager::advance_matchday`] does all three at once, skipping the
//! playback. It is also how a focal bye is played.
//!
//! Every fixture draws from its own derived seed, so outcomes do not depend
//! on how much randomness other fixtures consumed.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use super::club_stats::ClubSeasonReport;
use super::schedule::{fixtures_for_club, fixtures_on_matchday, generate_fixtures, total_matchdays};
use super::standings::{compute_standings, position_of};
use crate::config::SimConfig;
use crate::engine::event_sim::simulate_with_config;
use crate::engine::matchday::{FocalMatch, LiveMatchday, MatchdayBoard, TickerMatch};
use crate::engine::resolver::resolve_ticker_with_config;
use crate::error::{CoreError, Result};
use crate::models::{
    Club, ClubId, EventType, Fixture, LeagueFixture, MatchResult, MatchTimeline, ScorerTally,
    SeasonHistory, SeasonSummary, Squad, StandingEntry, TeamSide,
};
use crate::rng::{derive_seed, seeded, SimRng};

pub struct SeasonManager<R: Rng = SimRng> {
    clubs: Vec<Club>,
    focal: ClubId,
    config: SimConfig,
    squads: HashMap<ClubId, Vec<String>>,
    rng: R,

    current_season: u32,
    current_matchday: u32,
    fixtures: Vec<LeagueFixture>,
    results: Vec<MatchResult>,
    /// Focal timelines of the season so far, for the scorer tally.
    focal_timelines: Vec<Arc<MatchTimeline>>,
    prepared: Option<MatchdayBoard>,
    history: Vec<SeasonHistory>,
}

impl<R: Rng> SeasonManager<R> {
    /// Create the manager and schedule season 1.
    pub fn new(clubs: Vec<Club>, focal: ClubId, config: SimConfig, rng: R) -> Result<Self> {
        if !clubs.iter().any(|c| c.id == focal) {
            return Err(CoreError::UnknownClub(focal));
        }
        config.validate()?;

        let fixtures = generate_fixtures(&clubs);
        info!(
            season = 1,
            clubs = clubs.len(),
            fixtures = fixtures.len(),
            matchdays = total_matchdays(clubs.len()),
            "season scheduled"
        );

        Ok(Self {
            clubs,
            focal,
            config,
            squads: HashMap::new(),
            rng,
            current_season: 1,
            current_matchday: 1,
            fixtures,
            results: Vec::new(),
            focal_timelines: Vec::new(),
            prepared: None,
            history: Vec::new(),
        })
    }

    /// Player names used to label events. Clubs without a squad get
    /// anonymous events.
    pub fn with_squads(mut self, squads: impl IntoIterator<Item = Squad>) -> Self {
        self.squads = squads.into_iter().map(|s| (s.club_id, s.players)).collect();
        self
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    pub fn focal_club(&self) -> ClubId {
        self.focal
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn current_season(&self) -> u32 {
        self.current_season
    }

    pub fn current_matchday(&self) -> u32 {
        self.current_matchday
    }

    pub fn total_matchdays(&self) -> u32 {
        total_matchdays(self.clubs.len())
    }

    pub fn fixtures(&self) -> &[LeagueFixture] {
        &self.fixtures
    }

    /// Results of the current season only.
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    /// Archived seasons, oldest first.
    pub fn history(&self) -> &[SeasonHistory] {
        &self.history
    }

    pub fn is_season_complete(&self) -> bool {
        self.current_matchday > self.total_matchdays()
    }

    /// Current table, recomputed from the result set.
    pub fn standings(&self) -> Vec<StandingEntry> {
        compute_standings(&self.clubs, &self.results)
    }

    pub fn focal_report(&self) -> ClubSeasonReport {
        ClubSeasonReport::build(self.focal, &self.results)
    }

    pub fn focal_fixtures(&self) -> Vec<Fixture> {
        fixtures_for_club(&self.fixtures, self.focal)
    }

    /// The focal club's next unplayed fixture, skipping byes.
    pub fn next_fixture(&self) -> Option<Fixture> {
        self.focal_fixtures()
            .into_iter()
            .find(|f| f.matchday() >= self.current_matchday)
    }

    // ===========================================
    // Matchday lifecycle
    // ===========================================

    /// Build every timeline of the current matchday.
    ///
    /// Repeated calls for the same matchday return the same board. Returns
    /// `None` once the season is complete.
    pub fn prepare_matchday(&mut self) -> Option<MatchdayBoard> {
        if self.is_season_complete() {
            return None;
        }
        if let Some(board) = &self.prepared {
            if board.season == self.current_season && board.matchday == self.current_matchday {
                return Some(board.clone());
            }
        }

        let season = self.current_season;
        let matchday = self.current_matchday;
        let day_seed: u64 = self.rng.gen();

        let mut focal = None;
        let mut others = Vec::new();
        for fixture in fixtures_on_matchday(&self.fixtures, matchday) {
            let mut rng = seeded(derive_seed(day_seed, season, matchday, fixture.id.0));
            match fixture.for_club(self.focal) {
                Some(view) => {
                    let timeline = simulate_with_config(
                        &fixture.home,
                        &fixture.away,
                        &self.squads,
                        &self.config.events,
                        &mut rng,
                    );
                    focal = Some(FocalMatch { fixture: view, timeline: Arc::new(timeline) });
                }
                None => {
                    let ticker = resolve_ticker_with_config(
                        &fixture.home,
                        &fixture.away,
                        &self.config.resolver,
                        &mut rng,
                    );
                    others.push(TickerMatch { fixture: fixture.clone(), ticker });
                }
            }
        }

        if focal.is_none() {
            debug!(season, matchday, "focal club has a bye");
        }
        let board = MatchdayBoard { season, matchday, focal, others };
        self.prepared = Some(board.clone());
        Some(board)
    }

    /// Kick off the current matchday on a fresh clock.
    ///
    /// Fails with [`CoreError::SeasonComplete`] after the last matchday and
    /// with [`CoreError::NoFocalFixture`] on a focal bye, which is played
    /// with [`SeasonManager::advance_matchday`] instead.
    pub fn start_matchday(&mut self) -> Result<LiveMatchday> {
        let board = self
            .prepare_matchday()
            .ok_or(CoreError::SeasonComplete { season: self.current_season })?;
        LiveMatchday::start(board, &self.config.playback)
    }

    /// Commit every result of a finished live matchday and advance.
    ///
    /// Playback that has not reached full time is rejected and nothing is
    /// written. A board that is not for the current matchday (for instance
    /// one that was already committed) is ignored and yields no results.
    pub fn complete_matchday(&mut self, live: &LiveMatchday) -> Result<Vec<MatchResult>> {
        let board = live.board();
        if !live.is_finished() {
            warn!(matchday = board.matchday, minute = live.minute(), "matchday still playing");
            return Err(CoreError::PlaybackNotFinished {
                matchday: board.matchday,
                minute: live.minute(),
            });
        }
        Ok(self.commit(board))
    }

    /// Prepare and commit the current matchday, skipping playback.
    pub fn advance_matchday(&mut self) -> Vec<MatchResult> {
        match self.prepare_matchday() {
            Some(board) => self.commit(&board),
            None => Vec::new(),
        }
    }

    fn commit(&mut self, board: &MatchdayBoard) -> Vec<MatchResult> {
        if board.season != self.current_season || board.matchday != self.current_matchday {
            debug!(
                season = board.season,
                matchday = board.matchday,
                current = self.current_matchday,
                "matchday already committed, ignored"
            );
            return Vec::new();
        }

        let season = self.current_season;
        let mut batch = Vec::with_capacity(board.fixture_count());
        if let Some(focal) = &board.focal {
            batch.push(MatchResult::from_fixture(
                &focal.fixture.league,
                season,
                focal.timeline.final_score(),
            ));
            self.focal_timelines.push(Arc::clone(&focal.timeline));
        }
        batch.extend(
            board
                .others
                .iter()
                .map(|m| MatchResult::from_fixture(&m.fixture, season, m.final_score())),
        );

        self.results.extend(batch.iter().cloned());
        self.current_matchday += 1;
        self.prepared = None;
        info!(season, matchday = board.matchday, results = batch.len(), "matchday committed");
        batch
    }

    /// Archive the finished season and schedule the next one.
    pub fn start_new_season(&mut self) -> Result<&SeasonHistory> {
        if !self.is_season_complete() {
            warn!(
                matchday = self.current_matchday,
                total = self.total_matchdays(),
                "cannot start a new season before the current one is complete"
            );
            return Err(CoreError::SeasonNotComplete {
                matchday: self.current_matchday,
                total: self.total_matchdays(),
            });
        }

        let results = std::mem::take(&mut self.results);
        let final_standings = compute_standings(&self.clubs, &results);
        let summary = self.summarize(&final_standings);
        let archived = SeasonHistory { season: self.current_season, results, final_standings, summary };

        if let Some(champion) = archived.champion() {
            info!(
                season = archived.season,
                champion = %champion.club.name,
                points = champion.points,
                "season archived"
            );
        }

        self.history.push(archived);
        self.focal_timelines.clear();
        self.prepared = None;
        self.current_season += 1;
        self.current_matchday = 1;
        self.fixtures = generate_fixtures(&self.clubs);
        info!(season = self.current_season, fixtures = self.fixtures.len(), "season scheduled");

        Ok(&self.history[self.history.len() - 1])
    }

    fn summarize(&self, standings: &[StandingEntry]) -> SeasonSummary {
        let row = standings.iter().find(|e| e.club.id == self.focal);
        SeasonSummary {
            club: self.focal,
            position: position_of(standings, self.focal),
            points: row.map_or(0, |r| r.points),
            won: row.map_or(0, |r| r.won),
            drawn: row.map_or(0, |r| r.drawn),
            lost: row.map_or(0, |r| r.lost),
            goals_for: row.map_or(0, |r| r.goals_for),
            goals_against: row.map_or(0, |r| r.goals_against),
            top_scorers: self.top_scorers(),
        }
    }

    fn top_scorers(&self) -> Vec<ScorerTally> {
        let mut goals: HashMap<&str, u32> = HashMap::new();
        for timeline in &self.focal_timelines {
            let side = if timeline.home().id == self.focal { TeamSide::Home } else { TeamSide::Away };
            for event in timeline.events() {
                if event.event_type != EventType::Goal || event.team != side {
                    continue;
                }
                if let Some(player) = &event.player {
                    *goals.entry(player.as_str()).or_default() += 1;
                }
            }
        }

        let mut tally: Vec<ScorerTally> = goals
            .into_iter()
            .map(|(player, goals)| ScorerTally { player: player.to_string(), goals })
            .collect();
        tally.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.player.cmp(&b.player)));
        tally
    }
}
