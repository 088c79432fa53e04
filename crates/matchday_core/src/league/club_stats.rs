//! Per-club statistics derived from the result set: form, streaks,
//! home/away splits and season records.

use serde::{Deserialize, Serialize};

use crate::models::{ClubId, MatchResult, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakKind {
    Winning,
    Losing,
    Unbeaten,
    Winless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub kind: StreakKind,
    pub length: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongestStreaks {
    pub winning: u32,
    pub unbeaten: u32,
    pub losing: u32,
    pub winless: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl VenueRecord {
    fn add(&mut self, scored: u8, conceded: u8, outcome: Outcome) {
        self.played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;
        self.points += outcome.points();
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Draw => self.drawn += 1,
            Outcome::Loss => self.lost += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSplit {
    pub home: VenueRecord,
    pub away: VenueRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecords {
    pub biggest_win: Option<MatchResult>,
    pub biggest_loss: Option<MatchResult>,
    pub highest_scoring: Option<MatchResult>,
}

/// Everything the statistics screen shows for one club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSeasonReport {
    pub club: ClubId,
    pub form: String,
    pub current_streak: Option<Streak>,
    pub longest: LongestStreaks,
    pub split: VenueSplit,
    pub records: SeasonRecords,
}

impl ClubSeasonReport {
    pub fn build(club: ClubId, results: &[MatchResult]) -> Self {
        Self {
            club,
            form: form(results, club, 5),
            current_streak: current_streak(results, club),
            longest: longest_streaks(results, club),
            split: home_away_split(results, club),
            records: season_records(results, club),
        }
    }
}

/// The club's results in playing order.
pub fn club_results(results: &[MatchResult], club: ClubId) -> Vec<&MatchResult> {
    let mut own: Vec<&MatchResult> = results.iter().filter(|r| r.involves(club)).collect();
    own.sort_by_key(|r| (r.season, r.matchday));
    own
}

fn outcomes(results: &[MatchResult], club: ClubId) -> Vec<Outcome> {
    club_results(results, club).into_iter().filter_map(|r| r.outcome_for(club)).collect()
}

/// Last `n` outcomes, oldest first, as `W`/`D`/`L` letters.
pub fn form(results: &[MatchResult], club: ClubId, n: usize) -> String {
    let all = outcomes(results, club);
    let start = all.len().saturating_sub(n);
    all[start..].iter().map(|o| o.letter()).collect()
}

/// Run ending at the most recent match. A win or loss reports the pure
/// run; a draw reports whichever of unbeaten/winless is longer.
pub fn current_streak(results: &[MatchResult], club: ClubId) -> Option<Streak> {
    let all = outcomes(results, club);
    let last = *all.last()?;
    let run = |pred: fn(Outcome) -> bool| all.iter().rev().take_while(|o| pred(**o)).count() as u32;

    let streak = match last {
        Outcome::Win => Streak { kind: StreakKind::Winning, length: run(|o| o == Outcome::Win) },
        Outcome::Loss => Streak { kind: StreakKind::Losing, length: run(|o| o == Outcome::Loss) },
        Outcome::Draw => {
            let unbeaten = run(|o| o != Outcome::Loss);
            let winless = run(|o| o != Outcome::Win);
            if unbeaten >= winless {
                Streak { kind: StreakKind::Unbeaten, length: unbeaten }
            } else {
                Streak { kind: StreakKind::Winless, length: winless }
            }
        }
    };
    Some(streak)
}

pub fn longest_streaks(results: &[MatchResult], club: ClubId) -> LongestStreaks {
    fn longest(all: &[Outcome], pred: impl Fn(Outcome) -> bool) -> u32 {
        let mut best = 0;
        let mut current = 0;
        for &o in all {
            if pred(o) {
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }
        best
    }

    let all = outcomes(results, club);
    LongestStreaks {
        winning: longest(&all, |o| o == Outcome::Win),
        unbeaten: longest(&all, |o| o != Outcome::Loss),
        losing: longest(&all, |o| o == Outcome::Loss),
        winless: longest(&all, |o| o != Outcome::Win),
    }
}

pub fn home_away_split(results: &[MatchResult], club: ClubId) -> VenueSplit {
    let mut split = VenueSplit::default();
    for r in results.iter().filter(|r| r.involves(club)) {
        let (Some((gf, ga)), Some(outcome)) = (r.goals_for_against(club), r.outcome_for(club))
        else {
            continue;
        };
        if r.is_home(club) {
            split.home.add(gf, ga, outcome);
        } else {
            split.away.add(gf, ga, outcome);
        }
    }
    split
}

/// Biggest win/loss by margin and highest aggregate score. Ties go to the
/// earliest match.
pub fn season_records(results: &[MatchResult], club: ClubId) -> SeasonRecords {
    let mut records = SeasonRecords::default();
    let mut best_win = 0i32;
    let mut worst_loss = 0i32;
    let mut most_goals = 0u32;

    for r in club_results(results, club) {
        let Some((gf, ga)) = r.goals_for_against(club) else {
            continue;
        };
        let margin = gf as i32 - ga as i32;
        if margin > best_win {
            best_win = margin;
            records.biggest_win = Some(r.clone());
        }
        if -margin > worst_loss {
            worst_loss = -margin;
            records.biggest_loss = Some(r.clone());
        }
        if r.total_goals() > most_goals {
            most_goals = r.total_goals();
            records.highest_scoring = Some(r.clone());
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Club, FixtureId, LeagueFixture};

    const US: ClubId = ClubId(1);

    /// Results for club 1 in order; positive score = home game.
    fn season(scores: &[(bool, u8, u8)]) -> Vec<MatchResult> {
        let us = Club::new(1, "Us", 70);
        scores
            .iter()
            .enumerate()
            .map(|(i, &(at_home, ours, theirs))| {
                let them = Club::new(100 + i as u32, format!("Them {i}"), 70);
                let (home, away, score) = if at_home {
                    (us.clone(), them, (ours, theirs))
                } else {
                    (them, us.clone(), (theirs, ours))
                };
                let fixture = LeagueFixture {
                    id: FixtureId(i as u32 + 1),
                    home,
                    away,
                    matchday: i as u32 + 1,
                };
                MatchResult::from_fixture(&fixture, 1, score)
            })
            .collect()
    }

    #[test]
    fn test_form_is_last_five_oldest_first() {
        let results = season(&[
            (true, 1, 0),
            (false, 0, 2),
            (true, 2, 2),
            (true, 3, 0),
            (false, 1, 0),
            (true, 0, 1),
        ]);
        assert_eq!(form(&results, US, 5), "LDWWL");
        assert_eq!(form(&results, US, 10), "WLDWWL");
        assert_eq!(form(&[], US, 5), "");
    }

    #[test]
    fn test_current_streak_kinds() {
        let winning = season(&[(true, 0, 1), (true, 2, 0), (false, 1, 0)]);
        assert_eq!(
            current_streak(&winning, US),
            Some(Streak { kind: StreakKind::Winning, length: 2 })
        );

        let unbeaten = season(&[(true, 0, 1), (true, 2, 0), (false, 1, 1)]);
        assert_eq!(
            current_streak(&unbeaten, US),
            Some(Streak { kind: StreakKind::Unbeaten, length: 2 })
        );

        let winless = season(&[(true, 2, 0), (true, 0, 1), (false, 0, 3), (true, 1, 1)]);
        assert_eq!(
            current_streak(&winless, US),
            Some(Streak { kind: StreakKind::Winless, length: 3 })
        );

        assert_eq!(current_streak(&[], US), None);
    }

    #[test]
    fn test_longest_streaks() {
        let results = season(&[
            (true, 1, 0),
            (true, 1, 0),
            (true, 1, 1),
            (false, 2, 0),
            (false, 0, 1),
            (false, 0, 1),
            (true, 0, 0),
        ]);
        let longest = longest_streaks(&results, US);
        assert_eq!(longest.winning, 2);
        assert_eq!(longest.unbeaten, 4);
        assert_eq!(longest.losing, 2);
        assert_eq!(longest.winless, 3);
    }

    #[test]
    fn test_home_away_split() {
        let results = season(&[(true, 3, 1), (false, 0, 2), (false, 1, 1)]);
        let split = home_away_split(&results, US);
        assert_eq!(split.home.won, 1);
        assert_eq!(split.home.goals_for, 3);
        assert_eq!(split.away.played, 2);
        assert_eq!(split.away.points, 1);
        assert_eq!(split.away.goals_against, 3);
    }

    #[test]
    fn test_records_prefer_earliest_on_ties() {
        let results = season(&[(true, 3, 0), (false, 4, 1), (true, 0, 2), (true, 3, 3)]);
        let records = season_records(&results, US);
        assert_eq!(records.biggest_win.unwrap().matchday, 1);
        assert_eq!(records.biggest_loss.unwrap().matchday, 3);
        assert_eq!(records.highest_scoring.unwrap().matchday, 4);
    }

    #[test]
    fn test_report_bundles_everything() {
        let results = season(&[(true, 2, 0), (false, 1, 0)]);
        let report = ClubSeasonReport::build(US, &results);
        assert_eq!(report.form, "WW");
        assert_eq!(report.longest.winning, 2);
        assert_eq!(report.split.home.played + report.split.away.played, 2);
        assert!(report.records.biggest_loss.is_none());
    }
}
