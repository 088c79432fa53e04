//! League table computation.
//!
//! The table is a pure function of `(clubs, results)`; nothing caches it.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::warn;

use crate::models::{Club, ClubId, MatchResult, Outcome, StandingEntry};

/// Build the ranked table. Clubs without results appear with zeroes.
pub fn compute_standings(clubs: &[Club], results: &[MatchResult]) -> Vec<StandingEntry> {
    let mut rows: Vec<StandingEntry> = clubs.iter().cloned().map(StandingEntry::new).collect();
    let index: HashMap<ClubId, usize> =
        clubs.iter().enumerate().map(|(i, c)| (c.id, i)).collect();

    for result in results {
        let (Some(&h), Some(&a)) = (index.get(&result.home.id), index.get(&result.away.id)) else {
            warn!(result = %result.id, "result references a club outside the league, skipped");
            continue;
        };
        let (home_outcome, away_outcome) = match result.home_score.cmp(&result.away_score) {
            Ordering::Greater => (Outcome::Win, Outcome::Loss),
            Ordering::Equal => (Outcome::Draw, Outcome::Draw),
            Ordering::Less => (Outcome::Loss, Outcome::Win),
        };
        rows[h].record(result.home_score, result.away_score, home_outcome);
        rows[a].record(result.away_score, result.home_score, away_outcome);
    }

    rank_entries(&mut rows);
    rows
}

/// Table order: points, goal difference, goals for (all descending), then
/// club name ascending.
pub fn compare_entries(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.club.name.cmp(&b.club.name))
}

/// Sort and assign 1-based positions.
pub fn rank_entries(entries: &mut [StandingEntry]) {
    entries.sort_by(compare_entries);
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i + 1;
    }
}

pub fn position_of(standings: &[StandingEntry], club: ClubId) -> Option<usize> {
    standings.iter().find(|e| e.club.id == club).map(|e| e.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixtureId, LeagueFixture};

    fn club(id: u32, name: &str) -> Club {
        Club::new(id, name, 70)
    }

    fn played(home: &Club, away: &Club, score: (u8, u8), id: u32) -> MatchResult {
        let fixture = LeagueFixture {
            id: FixtureId(id),
            home: home.clone(),
            away: away.clone(),
            matchday: id,
        };
        MatchResult::from_fixture(&fixture, 1, score)
    }

    #[test]
    fn test_points_and_counters() {
        let a = club(1, "Athletic");
        let b = club(2, "Borough");
        let c = club(3, "City");
        let results = vec![
            played(&a, &b, (2, 0), 1),
            played(&b, &c, (1, 1), 2),
            played(&c, &a, (3, 1), 3),
        ];

        let table = compute_standings(&[a.clone(), b.clone(), c.clone()], &results);

        let row = |id: u32| table.iter().find(|e| e.club.id == ClubId(id)).unwrap();
        assert_eq!((row(1).won, row(1).lost, row(1).points), (1, 1, 3));
        assert_eq!((row(2).drawn, row(2).lost, row(2).points), (1, 1, 1));
        assert_eq!((row(3).won, row(3).drawn, row(3).points), (1, 1, 4));
        assert_eq!(row(3).goals_for, 4);
        assert_eq!(row(3).goals_against, 2);
        assert!(table.iter().all(|e| e.played == 2));

        assert_eq!(table[0].club.id, ClubId(3));
        assert_eq!(table[0].position, 1);
        assert_eq!(position_of(&table, ClubId(2)), Some(3));
    }

    #[test]
    fn test_goals_for_breaks_equal_difference() {
        let mut a = StandingEntry::new(club(1, "ClubA"));
        a.points = 10;
        a.goals_for = 20;
        a.goals_against = 15;
        let mut b = StandingEntry::new(club(2, "ClubB"));
        b.points = 10;
        b.goals_for = 18;
        b.goals_against = 13;

        let mut rows = vec![b, a];
        rank_entries(&mut rows);
        assert_eq!(rows[0].club.name, "ClubA");
        assert_eq!(rows[1].position, 2);
    }

    #[test]
    fn test_name_is_final_tiebreak() {
        let table = compute_standings(&[club(1, "Zeta"), club(2, "Alpha")], &[]);
        assert_eq!(table[0].club.name, "Alpha");
        assert_eq!(table[1].club.name, "Zeta");
    }

    #[test]
    fn test_ignores_foreign_results() {
        let a = club(1, "A");
        let outsider = club(9, "Outsider");
        let table = compute_standings(&[a.clone()], &[played(&a, &outsider, (1, 0), 1)]);
        assert_eq!(table[0].played, 0);
    }
}
