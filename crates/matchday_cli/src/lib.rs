//! Matchday CLI Library
//!
//! Input loading (clubs, squads, config) and plain-text rendering for the
//! `matchday` binary.

pub mod loader;
pub mod report;

pub use loader::{load_clubs, load_config, load_squads};
