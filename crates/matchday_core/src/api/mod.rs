pub mod json_api;

pub use json_api::{
    generate_fixtures_json, simulate_match_json, standings_json, FixturesResponse, MatchRequest,
    MatchResponse,
};
