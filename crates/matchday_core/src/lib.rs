//! # matchday_core - Season Scheduling and Match Simulation Core
//!
//! The algorithmic heart of a football-management game: it builds the
//! season calendar, simulates matches as minute-stamped event timelines,
//! resolves the rest of each matchday cheaply, replays the focal match on
//! a controllable clock and aggregates everything into league tables.
//!
//! ## Features
//! - Double round-robin scheduling (circle method, byes for odd leagues)
//! - Event timelines whose score is always derived from goal events
//! - Poisson-based resolution of non-focal fixtures with live tickers
//! - Match clock with pause/resume/speed/skip, virtual-time or threaded
//! - Deterministic replay: same seed = same season
//! - JSON API for easy integration
//!
//! ## Example
//! ```
//! use matchday_core::{rng, Club, ClubId, SeasonManager, SimConfig};
//!
//! let clubs: Vec<Club> = (1..=4).map(|i| Club::new(i, format!("Club {i}"), 70)).collect();
//! let mut season = SeasonManager::new(clubs, ClubId(1), SimConfig::default(), rng::seeded(7)).unwrap();
//! while !season.is_season_complete() {
//!     season.advance_matchday();
//! }
//! assert_eq!(season.results().len(), 12);
//! let history = season.start_new_season().unwrap();
//! assert_eq!(history.final_standings.len(), 4);
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod league;
pub mod models;
pub mod rng;

// Re-export main API
pub use api::{generate_fixtures_json, simulate_match_json, standings_json};
pub use config::SimConfig;
pub use engine::{
    resolve_quick, resolve_ticker, simulate, LiveMatchday, LivePlayback, LiveSnapshot, MatchClock,
    MatchdayBoard, MatchdayFrame, PlaybackSpeed,
};
pub use error::{CoreError, Result};
pub use league::{compute_standings, generate_fixtures, SeasonManager};
pub use models::*;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
