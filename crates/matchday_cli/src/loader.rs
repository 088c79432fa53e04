//! Club registry, squad and config loading.
//!
//! Clubs come from CSV (`id,name,short_name,reputation,balance`) or a JSON
//! array, picked by file extension. `short_name` and `balance` may be left
//! empty.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use matchday_core::{Club, ClubId, SimConfig, Squad};

#[derive(Debug, Deserialize)]
struct ClubRecord {
    id: u32,
    name: String,
    #[serde(default)]
    short_name: Option<String>,
    reputation: u8,
    #[serde(default)]
    balance: Option<i64>,
}

impl From<ClubRecord> for Club {
    fn from(record: ClubRecord) -> Self {
        let club = Club::new(record.id, record.name, record.reputation);
        let club = match record.short_name.filter(|s| !s.trim().is_empty()) {
            Some(short) => club.with_short_name(short.trim()),
            None => club,
        };
        Club { balance: record.balance.unwrap_or(0), ..club }
    }
}

pub fn load_clubs(path: &Path) -> Result<Vec<Club>> {
    let records: Vec<ClubRecord> = match extension(path).as_deref() {
        Some("csv") => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_path(path)
                .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
            reader
                .deserialize()
                .collect::<std::result::Result<_, _>>()
                .with_context(|| format!("Invalid club row in {}", path.display()))?
        }
        Some("json") => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read clubs file: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid clubs JSON: {}", path.display()))?
        }
        _ => bail!("Unsupported clubs file (expected .csv or .json): {}", path.display()),
    };

    let clubs: Vec<Club> = records.into_iter().map(Club::from).collect();
    if clubs.is_empty() {
        bail!("No clubs in {}", path.display());
    }
    let mut seen = HashSet::new();
    if let Some(dup) = clubs.iter().find(|c| !seen.insert(c.id)) {
        bail!("Duplicate club id {} in {}", dup.id.0, path.display());
    }

    debug!(count = clubs.len(), path = %path.display(), "clubs loaded");
    Ok(clubs)
}

/// JSON array of `{club_id, players}`.
pub fn load_squads(path: &Path) -> Result<Vec<Squad>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read squads file: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid squads JSON: {}", path.display()))
}

/// YAML config when given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

pub fn find_club(clubs: &[Club], id: u32) -> Result<&Club> {
    clubs
        .iter()
        .find(|c| c.id == ClubId(id))
        .with_context(|| format!("Unknown club id {id}"))
}

fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase)
}
