use clap::Parser;
use std::path::Path;

/// VCT match win-probability predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "vct-predictor", version, about)]
pub struct Config {
    /// Web page listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8501")]
    pub dashboard_addr: String,

    /// Serialized logistic classifier (JSON export)
    #[arg(long, env = "MODEL_PATH", default_value = "artifacts/model.json")]
    pub model_path: String,

    /// Serialized standard scaler (JSON export)
    #[arg(long, env = "SCALER_PATH", default_value = "artifacts/scaler.json")]
    pub scaler_path: String,

    /// Per-team aggregate statistics
    #[arg(
        long,
        env = "TEAMS_DATA_PATH",
        default_value = "artifacts/merged_teams_data.json"
    )]
    pub teams_data_path: String,

    /// Abbreviation → display-name lists, inverted at load time
    #[arg(long, env = "TEAM_MAPPING_PATH", default_value = "artifacts/teams.json")]
    pub team_mapping_path: String,

    /// Optional region/map catalog; the built-in VCT catalog is used when unset
    #[arg(long, env = "REGIONS_PATH")]
    pub regions_path: Option<String>,

    /// Optional directory served under /static (team logos etc.)
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let required = [
            ("model", &self.model_path),
            ("scaler", &self.scaler_path),
            ("team data", &self.teams_data_path),
            ("team mapping", &self.team_mapping_path),
        ];
        for (what, path) in required {
            if !Path::new(path).is_file() {
                anyhow::bail!("{} file not found: {}", what, path);
            }
        }
        if let Some(path) = &self.regions_path {
            if !Path::new(path).is_file() {
                anyhow::bail!("regions file not found: {}", path);
            }
        }
        if let Some(dir) = &self.static_dir {
            if !Path::new(dir).is_dir() {
                anyhow::bail!("static_dir is not a directory: {}", dir);
            }
        }
        self.dashboard_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| anyhow::anyhow!("invalid dashboard_addr {}: {}", self.dashboard_addr, e))?;
        Ok(())
    }
}
