//! Fixture Scheduler
//!
//! Double round-robin via the circle method: one club stays fixed while the
//! others rotate one slot per round. The first half establishes each
//! pairing's home club; the second half mirrors it with venues swapped.

use tracing::debug;

use crate::models::{Club, ClubId, Fixture, FixtureId, LeagueFixture};

/// Number of matchdays a league of `club_count` clubs plays per season.
///
/// Odd leagues are padded with a bye, so every club sits out once per half
/// and the season needs `2·N` rounds instead of `2·(N−1)`.
pub fn total_matchdays(club_count: usize) -> u32 {
    match club_count {
        0 | 1 => 0,
        n if n % 2 == 0 => 2 * (n as u32 - 1),
        n => 2 * n as u32,
    }
}

/// Fixtures per matchday, `⌊N/2⌋`.
pub fn fixtures_per_matchday(club_count: usize) -> usize {
    if club_count < 2 {
        0
    } else {
        club_count / 2
    }
}

/// Generate the full season calendar.
///
/// Pure and deterministic: the same club order always yields the same
/// schedule. Fewer than two clubs yields an empty list.
pub fn generate_fixtures(clubs: &[Club]) -> Vec<LeagueFixture> {
    if clubs.len() < 2 {
        debug!(clubs = clubs.len(), "league too small to schedule");
        return Vec::new();
    }

    // None marks the bye slot of an odd league.
    let mut slots: Vec<Option<&Club>> = clubs.iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let padded = slots.len();
    let rounds = padded - 1;

    let mut first_half: Vec<(&Club, &Club, u32)> = Vec::with_capacity(rounds * padded / 2);
    for round in 0..rounds {
        for i in 0..padded / 2 {
            let (a, b) = match (slots[i], slots[padded - 1 - i]) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            // The fixed club alternates venue every round; the rest
            // alternate by slot and round parity.
            let a_home = if i == 0 { round % 2 == 0 } else { (i + round) % 2 == 1 };
            let (home, away) = if a_home { (a, b) } else { (b, a) };
            first_half.push((home, away, round as u32 + 1));
        }
        slots[1..].rotate_right(1);
    }

    let offset = rounds as u32;
    let mut fixtures = Vec::with_capacity(first_half.len() * 2);
    let mut next_id = 1u32;
    let mut push = |home: &Club, away: &Club, matchday: u32| {
        fixtures.push(LeagueFixture {
            id: FixtureId(next_id),
            home: home.clone(),
            away: away.clone(),
            matchday,
        });
        next_id += 1;
    };

    for &(home, away, matchday) in &first_half {
        push(home, away, matchday);
    }
    for &(home, away, matchday) in &first_half {
        push(away, home, matchday + offset);
    }

    debug!(
        clubs = clubs.len(),
        fixtures = fixtures.len(),
        matchdays = total_matchdays(clubs.len()),
        "generated season fixtures"
    );
    fixtures
}

/// One club's calendar, ordered by matchday.
pub fn fixtures_for_club(fixtures: &[LeagueFixture], club: ClubId) -> Vec<Fixture> {
    let mut own: Vec<Fixture> = fixtures.iter().filter_map(|f| f.for_club(club)).collect();
    own.sort_by_key(|f| f.matchday());
    own
}

pub fn fixtures_on_matchday(fixtures: &[LeagueFixture], matchday: u32) -> Vec<&LeagueFixture> {
    fixtures.iter().filter(|f| f.matchday == matchday).collect()
}
