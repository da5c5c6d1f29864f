//! Loaders for the static JSON lookup tables.
//!
//! Everything here is read once at startup. Failures carry the offending
//! path and are fatal to the process.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub mod models;
pub use models::*;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} file {}", what, path.display()))
}

/// Load `merged_teams_data.json`: `{ abbr: { avg_rating, map_win_rate, ... } }`
pub fn load_team_table(path: &Path) -> Result<TeamTable> {
    let table: TeamTable = read_json(path, "team data")?;
    for (abbr, stats) in &table {
        if let Some((map, rate)) = stats
            .map_win_rate
            .iter()
            .find(|(_, r)| !(0.0..=1.0).contains(*r))
        {
            anyhow::bail!(
                "team {} has win rate {} on {} outside [0, 1] in {}",
                abbr,
                rate,
                map,
                path.display()
            );
        }
    }
    info!("Loaded stats for {} teams from {}", table.len(), path.display());
    Ok(table)
}

/// Load `teams.json` (`{ abbr: [display names] }`) and invert it.
///
/// Parsed through `Value` so the file's key order decides which abbreviation
/// wins a contested display name.
pub fn load_team_mapping(path: &Path) -> Result<TeamNameMapping> {
    let raw: Value = read_json(path, "team mapping")?;
    let obj = raw
        .as_object()
        .with_context(|| format!("team mapping {} is not a JSON object", path.display()))?;

    let mut entries = Vec::with_capacity(obj.len());
    for (abbr, names) in obj {
        let names = names
            .as_array()
            .with_context(|| format!("team mapping entry {} is not a list", abbr))?
            .iter()
            .filter_map(|n| n.as_str().map(str::to_string))
            .collect::<Vec<_>>();
        entries.push((abbr.clone(), names));
    }

    let mapping = TeamNameMapping::from_entries(entries);
    info!("Loaded {} team name aliases from {}", mapping.len(), path.display());
    Ok(mapping)
}

/// Load a region/map catalog, or fall back to the built-in VCT one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(p) => read_json(p, "regions")?,
        None => Catalog::builtin(),
    };
    if catalog.regions.is_empty() || catalog.maps.is_empty() {
        anyhow::bail!("catalog must list at least one region and one map");
    }
    if let Some(r) = catalog.regions.iter().find(|r| r.teams.is_empty()) {
        anyhow::bail!("region {} has no teams", r.name);
    }
    Ok(catalog)
}
