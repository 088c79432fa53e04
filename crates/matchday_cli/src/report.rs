//! Plain-text rendering of fixtures, tables, timelines and season reports.

use std::fmt::Write;

use matchday_core::engine::{LiveSnapshot, Period};
use matchday_core::league::{ClubSeasonReport, StreakKind};
use matchday_core::{LeagueFixture, MatchEvent, MatchTimeline, SeasonHistory, StandingEntry};

pub fn fixtures(fixtures: &[LeagueFixture]) -> String {
    let mut out = String::new();
    let mut matchday = 0;
    for fixture in fixtures {
        if fixture.matchday != matchday {
            matchday = fixture.matchday;
            let _ = writeln!(out, "Matchday {matchday}");
        }
        let _ = writeln!(out, "  {:>4}  {} v {}", fixture.id, fixture.home.name, fixture.away.name);
    }
    out
}

pub fn event_line(event: &MatchEvent) -> String {
    format!("{:>3}'  {}", event.minute, event.description)
}

pub fn timeline(timeline: &MatchTimeline) -> String {
    let mut out = String::new();
    for event in timeline.events() {
        let _ = writeln!(out, "{}", event_line(event));
    }
    let (home, away) = timeline.final_score();
    let _ = writeln!(out, "FT  {} {home}-{away} {}", timeline.home().name, timeline.away().name);
    out
}

/// Lines for a live snapshot: the events of its minute, plus period markers.
pub fn snapshot(snapshot: &LiveSnapshot) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .events()
        .iter()
        .filter(|e| e.minute == snapshot.minute)
        .map(event_line)
        .collect();

    let (home, away) = snapshot.score;
    let timeline = snapshot.timeline();
    let marker = match (snapshot.minute, snapshot.period) {
        (45, _) => Some("HT"),
        (_, Period::FullTime) => Some("FT"),
        _ => None,
    };
    if let Some(marker) = marker {
        lines.push(format!(
            "{marker}  {} {home}-{away} {}  (possession {}%-{}%)",
            timeline.home().short_name,
            timeline.away().short_name,
            snapshot.stats.home.possession,
            snapshot.stats.away.possession,
        ));
    }
    lines
}

pub fn table(standings: &[StandingEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "Pos", "Club", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for e in standings {
        let _ = writeln!(
            out,
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}",
            e.position,
            e.club.name,
            e.played,
            e.won,
            e.drawn,
            e.lost,
            e.goals_for,
            e.goals_against,
            e.goal_difference(),
            e.points
        );
    }
    out
}

fn streak_label(kind: StreakKind) -> &'static str {
    match kind {
        StreakKind::Winning => "won",
        StreakKind::Losing => "lost",
        StreakKind::Unbeaten => "unbeaten in",
        StreakKind::Winless => "without a win in",
    }
}

pub fn club_report(name: &str, report: &ClubSeasonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{name}");
    let _ = writeln!(out, "  Form: {}", if report.form.is_empty() { "-" } else { &report.form });
    if let Some(streak) = report.current_streak {
        let _ = writeln!(out, "  Current run: {} {}", streak_label(streak.kind), streak.length);
    }
    let longest = &report.longest;
    let _ = writeln!(
        out,
        "  Longest runs: won {}, unbeaten {}, lost {}, winless {}",
        longest.winning, longest.unbeaten, longest.losing, longest.winless
    );
    for (venue, rec) in [("Home", &report.split.home), ("Away", &report.split.away)] {
        let _ = writeln!(
            out,
            "  {venue}: P{} W{} D{} L{} {}-{} ({} pts)",
            rec.played, rec.won, rec.drawn, rec.lost, rec.goals_for, rec.goals_against, rec.points
        );
    }
    let records = &report.records;
    for (label, result) in [
        ("Biggest win", &records.biggest_win),
        ("Biggest loss", &records.biggest_loss),
        ("Highest scoring", &records.highest_scoring),
    ] {
        if let Some(r) = result {
            let _ = writeln!(
                out,
                "  {label}: {} {}-{} {} (matchday {})",
                r.home.name, r.home_score, r.away_score, r.away.name, r.matchday
            );
        }
    }
    out
}

pub fn history(history: &[SeasonHistory]) -> String {
    let mut out = String::new();
    for season in history {
        let champion = season.champion().map_or("-", |c| c.club.name.as_str());
        let summary = &season.summary;
        let position = summary.position.map_or_else(|| "-".to_string(), |p| p.to_string());
        let _ = write!(
            out,
            "Season {}: champion {champion}; focal club {position} with {} pts",
            season.season, summary.points
        );
        if let Some(top) = summary.top_scorers.first() {
            let _ = write!(out, ", top scorer {} ({})", top.player, top.goals);
        }
        let _ = writeln!(out);
    }
    out
}
