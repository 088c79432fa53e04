//! AI Match Resolver
//!
//! Cheap scorelines for the fixtures of a matchday that are not being
//! watched. Goals per side are Poisson draws around a reputation-driven
//! expected-goals figure; the ticker variant spreads those goals (plus a
//! few cards) over the 90 minutes so other scores can be revealed in step
//! with the focal match.

use rand::Rng;
use tracing::trace;

use crate::config::{unit_interval, ResolverConfig};
use crate::models::{Club, EventType, TeamSide, TickerEvent, TickerTimeline, MATCH_MINUTES};

/// `(home_xg, away_xg)`. The home advantage is added to the home side only;
/// both sides are floored at `min_expected_goals`.
pub fn expected_goals(home: &Club, away: &Club, config: &ResolverConfig) -> (f64, f64) {
    let delta = (home.reputation as f64 - away.reputation as f64) / config.reputation_divisor;
    let home_xg = (config.base_expected_goals + delta + config.home_advantage)
        .max(config.min_expected_goals);
    let away_xg = (config.base_expected_goals - delta).max(config.min_expected_goals);
    (home_xg, away_xg)
}

/// Poisson sample by multiplying uniforms until the product drops below
/// `e^-λ`. Capped at `cap`.
pub fn sample_poisson<R: Rng + ?Sized>(lambda: f64, cap: u8, rng: &mut R) -> u8 {
    if lambda <= 0.0 {
        return 0;
    }
    let limit = (-lambda).exp();
    let mut k = 0u8;
    let mut product: f64 = rng.gen();
    while product > limit && k < cap {
        k += 1;
        product *= rng.gen::<f64>();
    }
    k
}

pub fn resolve_quick<R: Rng + ?Sized>(home: &Club, away: &Club, rng: &mut R) -> (u8, u8) {
    resolve_quick_with_config(home, away, &ResolverConfig::default(), rng)
}

pub fn resolve_quick_with_config<R: Rng + ?Sized>(
    home: &Club,
    away: &Club,
    config: &ResolverConfig,
    rng: &mut R,
) -> (u8, u8) {
    let (home_xg, away_xg) = expected_goals(home, away, config);
    let score = (
        sample_poisson(home_xg, config.max_goals, rng),
        sample_poisson(away_xg, config.max_goals, rng),
    );
    trace!(home = %home.name, away = %away.name, home_xg, away_xg, ?score, "resolved");
    score
}

pub fn resolve_ticker<R: Rng + ?Sized>(home: &Club, away: &Club, rng: &mut R) -> TickerTimeline {
    resolve_ticker_with_config(home, away, &ResolverConfig::default(), rng)
}

/// Goal and card timeline whose goal count equals a quick resolution.
pub fn resolve_ticker_with_config<R: Rng + ?Sized>(
    home: &Club,
    away: &Club,
    config: &ResolverConfig,
    rng: &mut R,
) -> TickerTimeline {
    let (home_goals, away_goals) = resolve_quick_with_config(home, away, config, rng);
    let mut events = Vec::with_capacity(home_goals as usize + away_goals as usize + 4);

    for (side, goals) in [(TeamSide::Home, home_goals), (TeamSide::Away, away_goals)] {
        for _ in 0..goals {
            let minute = rng.gen_range(1..=MATCH_MINUTES);
            events.push(TickerEvent { minute, event_type: EventType::Goal, team: side });
        }
    }

    let slots = config.ticker_slots.clamp(1, MATCH_MINUTES);
    let width = MATCH_MINUTES / slots;
    for slot in 0..slots {
        if !rng.gen_bool(unit_interval(config.ticker_card_probability)) {
            continue;
        }
        let first = slot * width + 1;
        let last = if slot + 1 == slots { MATCH_MINUTES } else { (slot + 1) * width };
        let minute = rng.gen_range(first..=last);
        let team = if rng.gen_bool(0.5) { TeamSide::Home } else { TeamSide::Away };
        let event_type = if rng.gen_bool(unit_interval(config.ticker_red_share)) {
            EventType::RedCard
        } else {
            EventType::YellowCard
        };
        events.push(TickerEvent { minute, event_type, team });
    }

    TickerTimeline::new(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_stronger_home_side_expects_more() {
        let cfg = ResolverConfig::default();
        let strong = Club::new(1, "Strong", 95);
        let weak = Club::new(2, "Weak", 60);
        let (home, away) = expected_goals(&strong, &weak, &cfg);
        assert!(home > away);
        assert!((home - 2.15).abs() < 1e-9);
        assert!((away - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_expected_goals_floor() {
        let cfg = ResolverConfig::default();
        let (home, away) = expected_goals(&Club::new(1, "A", 0), &Club::new(2, "B", 255), &cfg);
        assert_eq!(home, 0.5);
        assert!(away > 3.0);
    }

    #[test]
    fn test_poisson_mean_is_close_to_lambda() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for lambda in [0.5, 1.5, 2.5] {
            let n = 20_000;
            let total: u32 = (0..n).map(|_| sample_poisson(lambda, 20, &mut rng) as u32).sum();
            let mean = total as f64 / n as f64;
            assert!((mean - lambda).abs() < 0.05, "lambda {lambda}, mean {mean}");
        }
        assert_eq!(sample_poisson(0.0, 10, &mut rng), 0);
    }

    #[test]
    fn test_poisson_respects_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!((0..500).all(|_| sample_poisson(30.0, 4, &mut rng) <= 4));
    }

    #[test]
    fn test_ticker_goals_match_quick_resolution() {
        let home = Club::new(1, "A", 85);
        let away = Club::new(2, "B", 65);
        for seed in 0..50 {
            let quick = resolve_quick(&home, &away, &mut ChaCha8Rng::seed_from_u64(seed));
            let ticker = resolve_ticker(&home, &away, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(ticker.final_score(), quick, "seed {seed}");
            assert!(ticker.events().iter().all(|e| e.event_type.is_ticker_worthy()));
            assert!(ticker.events().iter().all(|e| (1..=90).contains(&e.minute)));
            assert!(ticker.events().windows(2).all(|w| w[0].minute <= w[1].minute));
        }
    }

    #[test]
    fn test_home_side_wins_more_often_when_stronger() {
        let home = Club::new(1, "A", 95);
        let away = Club::new(2, "B", 60);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let (mut home_total, mut away_total) = (0u32, 0u32);
        for _ in 0..2000 {
            let (h, a) = resolve_quick(&home, &away, &mut rng);
            home_total += h as u32;
            away_total += a as u32;
        }
        assert!(home_total > away_total);
    }
}
