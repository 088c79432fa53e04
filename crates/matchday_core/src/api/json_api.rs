//! JSON boundary for external collaborators (UI, tooling, other runtimes).
//!
//! Every entry point takes and returns JSON strings so callers never need
//! the Rust types.

use serde::{Deserialize, Serialize};

use crate::engine::event_sim::simulate;
use crate::engine::live_stats::LiveStats;
use crate::error::{CoreError, Result};
use crate::league::{compute_standings, generate_fixtures, total_matchdays};
use crate::models::{Club, LeagueFixture, MatchEvent, MatchResult, Squad};
use crate::rng::seeded_or_entropy;

const SCHEMA_VERSION: u8 = 1;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub home: Club,
    pub away: Club,
    /// Omit for ambient randomness.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub squads: Vec<Squad>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub home: Club,
    pub away: Club,
    pub events: Vec<MatchEvent>,
    pub score_home: u8,
    pub score_away: u8,
    pub stats: LiveStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixturesResponse {
    pub total_matchdays: u32,
    pub fixtures: Vec<LeagueFixture>,
}

/// Simulate one match.
///
/// ```
/// use matchday_core::simulate_match_json;
///
/// let request = r#"{
///     "home": {"id": 1, "name": "Rovers", "short_name": "ROV", "reputation": 80},
///     "away": {"id": 2, "name": "United", "short_name": "UTD", "reputation": 70},
///     "seed": 42
/// }"#;
/// let response = simulate_match_json(request).unwrap();
/// assert!(response.contains("\"score_home\""));
/// ```
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::Config(format!(
            "Unsupported schema version: {}",
            request.schema_version
        )));
    }

    let mut rng = seeded_or_entropy(request.seed);
    let timeline = simulate(&request.home, &request.away, &request.squads, &mut rng);
    let (score_home, score_away) = timeline.final_score();
    let stats = LiveStats::from_events(timeline.events());

    let response = MatchResponse {
        schema_version: SCHEMA_VERSION,
        home: request.home,
        away: request.away,
        events: timeline.into_events(),
        score_home,
        score_away,
        stats,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Season calendar for a JSON array of clubs.
pub fn generate_fixtures_json(clubs_json: &str) -> Result<String> {
    let clubs: Vec<Club> = serde_json::from_str(clubs_json)?;
    let response = FixturesResponse {
        total_matchdays: total_matchdays(clubs.len()),
        fixtures: generate_fixtures(&clubs),
    };
    Ok(serde_json::to_string(&response)?)
}

/// Ranked table for JSON arrays of clubs and results.
pub fn standings_json(clubs_json: &str, results_json: &str) -> Result<String> {
    let clubs: Vec<Club> = serde_json::from_str(clubs_json)?;
    let results: Vec<MatchResult> = serde_json::from_str(results_json)?;
    Ok(serde_json::to_string(&compute_standings(&clubs, &results))?)
}
