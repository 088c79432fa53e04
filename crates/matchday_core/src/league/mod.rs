pub mod club_stats;
pub mod schedule;
pub mod season;
pub mod standings;

pub use club_stats::{
    club_results, current_streak, form, home_away_split, longest_streaks, season_records,
    ClubSeasonReport, LongestStreaks, SeasonRecords, Streak, StreakKind, VenueRecord, VenueSplit,
};
pub use schedule::{
    fixtures_for_club, fixtures_on_matchday, fixtures_per_matchday, generate_fixtures,
    total_matchdays,
};
pub use season::SeasonManager;
pub use standings::{compare_entries, compute_standings, position_of, rank_entries};
