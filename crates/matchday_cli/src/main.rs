//! Matchday CLI
//!
//! Headless driver for the season core: print a schedule, play a single
//! match (optionally in real time) or run whole seasons.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matchday_cli::loader::{find_club, load_clubs, load_config, load_squads};
use matchday_cli::report;
use matchday_core::engine::{simulate_with_config, LiveStats, LivePlayback, PlaybackSpeed};
use matchday_core::{generate_fixtures, rng, ClubId, SeasonManager, Squad};

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Schedule and simulate football league seasons", long_about = None)]
struct Cli {
    /// Simulation config (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for deterministic replay
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the season schedule
    Fixtures {
        /// Clubs file (.csv or .json)
        #[arg(long)]
        clubs: PathBuf,
    },

    /// Simulate a single match
    Match {
        /// Clubs file (.csv or .json)
        #[arg(long)]
        clubs: PathBuf,

        /// Home club id
        #[arg(long)]
        home: u32,

        /// Away club id
        #[arg(long)]
        away: u32,

        /// Stream the match in real time
        #[arg(long, default_value = "false")]
        live: bool,

        /// Playback speed: 1, 2 or 4
        #[arg(long)]
        speed: Option<u8>,

        /// Squads file (.json)
        #[arg(long)]
        squads: Option<PathBuf>,
    },

    /// Play whole seasons headlessly
    Season {
        /// Clubs file (.csv or .json)
        #[arg(long)]
        clubs: PathBuf,

        /// The user's club id
        #[arg(long)]
        focal: u32,

        /// Number of seasons to play
        #[arg(long, default_value = "1")]
        seasons: u32,

        /// Squads file (.json)
        #[arg(long)]
        squads: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("matchday=info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fixtures { clubs } => {
            let clubs = load_clubs(&clubs)?;
            let fixtures = generate_fixtures(&clubs);
            print!("{}", report::fixtures(&fixtures));
            info!(fixtures = fixtures.len(), "schedule printed");
        }

        Commands::Match { clubs, home, away, live, speed, squads } => {
            if home == away {
                bail!("A club cannot play itself (id {home})");
            }
            let clubs = load_clubs(&clubs)?;
            let home = find_club(&clubs, home)?;
            let away = find_club(&clubs, away)?;
            let squads = optional_squads(squads)?;

            let mut rng = rng::seeded_or_entropy(cli.seed);
            let timeline = simulate_with_config(home, away, &squads, &config.events, &mut rng);

            if live {
                let speed = PlaybackSpeed::try_from(speed.unwrap_or(config.playback.default_speed))?;
                let (tx, rx) = mpsc::channel();
                let handle = LivePlayback::spawn(Arc::new(timeline), &config.playback, speed, tx);
                for snapshot in rx {
                    for line in report::snapshot(&snapshot) {
                        println!("{line}");
                    }
                }
                handle.join();
            } else {
                print!("{}", report::timeline(&timeline));
                let stats = LiveStats::from_events(timeline.events());
                println!(
                    "Shots {}-{}  On target {}-{}  Corners {}-{}  Possession {}%-{}%",
                    stats.home.shots,
                    stats.away.shots,
                    stats.home.shots_on_target,
                    stats.away.shots_on_target,
                    stats.home.corners,
                    stats.away.corners,
                    stats.home.possession,
                    stats.away.possession
                );
            }
        }

        Commands::Season { clubs, focal, seasons, squads } => {
            let clubs = load_clubs(&clubs)?;
            let focal_name = find_club(&clubs, focal)?.name.clone();
            let squads = optional_squads(squads)?;

            let mut manager =
                SeasonManager::new(clubs, ClubId(focal), config, rng::seeded_or_entropy(cli.seed))
                    .context("Failed to set up the season")?
                    .with_squads(squads);

            for _ in 0..seasons {
                while !manager.is_season_complete() {
                    manager.advance_matchday();
                }
                println!("Season {}", manager.current_season());
                print!("{}", report::table(&manager.standings()));
                println!();
                print!("{}", report::club_report(&focal_name, &manager.focal_report()));
                println!();
                manager.start_new_season()?;
            }
            print!("{}", report::history(manager.history()));
        }
    }

    Ok(())
}

fn optional_squads(path: Option<PathBuf>) -> Result<Vec<Squad>> {
    match path {
        Some(path) => load_squads(&path),
        None => Ok(Vec::new()),
    }
}
