//! One-time load of every static artifact the predictor needs.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::data::{self, Catalog, TeamNameMapping, TeamTable};
use crate::model::{Classifier, LogisticModel, StandardScaler};
use crate::predict::{predict_match, PredictionOutcome};

/// Model, scaler and lookup tables. Built once, then only read.
pub struct Artifacts {
    pub model: LogisticModel,
    pub scaler: StandardScaler,
    pub teams: TeamTable,
    pub names: TeamNameMapping,
    pub catalog: Catalog,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub teams: usize,
    pub aliases: usize,
    pub regions: usize,
    pub maps: usize,
    pub model_features: usize,
    pub scaler_features: usize,
    pub loaded_at: DateTime<Utc>,
}

impl Artifacts {
    pub fn load(config: &Config) -> Result<Self> {
        let model = LogisticModel::from_file(&config.model_path)?;
        let scaler = StandardScaler::from_file(&config.scaler_path)?;
        info!(
            "Loaded model ({} features) and scaler from {} / {}",
            model.n_features(),
            config.model_path,
            config.scaler_path
        );

        let teams = data::load_team_table(Path::new(&config.teams_data_path))?;
        let names = data::load_team_mapping(Path::new(&config.team_mapping_path))?;
        let catalog = data::load_catalog(config.regions_path.as_deref().map(Path::new))?;

        Ok(Artifacts {
            model,
            scaler,
            teams,
            names,
            catalog,
            loaded_at: Utc::now(),
        })
    }

    /// Resolve display names to abbreviations, then score.
    pub fn predict(&self, team1: &str, team2: &str, map: &str) -> PredictionOutcome {
        predict_match(
            self.names.resolve(team1),
            self.names.resolve(team2),
            map,
            &self.model,
            &self.scaler,
            &self.teams,
        )
    }

    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            teams: self.teams.len(),
            aliases: self.names.len(),
            regions: self.catalog.regions.len(),
            maps: self.catalog.maps.len(),
            model_features: self.model.n_features(),
            scaler_features: self.scaler.n_features(),
            loaded_at: self.loaded_at,
        }
    }
}
