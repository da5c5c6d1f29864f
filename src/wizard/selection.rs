use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Screen;
use crate::data::Catalog;

pub const NO_TEAM_B_WARNING: &str = "no selectable team for side B; change team A or the region";
pub const INCOMPLETE_WARNING: &str = "select two different teams and a map";

/// Side B candidates for `b_region`: the region's teams minus team A when both
/// sides are picking from the same region.
pub fn available_b_teams<'a>(
    catalog: &'a Catalog,
    a_region: &str,
    a_team: &str,
    b_region: &str,
) -> Vec<&'a str> {
    let Some(region) = catalog.region(b_region) else {
        return Vec::new();
    };
    region
        .teams
        .iter()
        .map(String::as_str)
        .filter(|t| b_region != a_region || *t != a_team)
        .collect()
}

/// A complete, normalised set of choices from the selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub a_region: String,
    pub a_team: String,
    pub b_region: String,
    pub b_team: Option<String>,
    pub map: String,
}

/// Raw, possibly partial choices as the page sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionInput {
    #[serde(default)]
    pub a_region: Option<String>,
    #[serde(default)]
    pub a_team: Option<String>,
    #[serde(default)]
    pub b_region: Option<String>,
    #[serde(default)]
    pub b_team: Option<String>,
    #[serde(default)]
    pub map: Option<String>,
}

/// The match-up handed from the selection screen to scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub team1: String,
    pub team2: String,
    pub map: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub screen: Screen,
    pub selection: Selection,
    pub a_teams: Vec<String>,
    pub b_teams: Vec<String>,
    pub warnings: Vec<String>,
}

/// Applies the selection screen's defaulting and filtering rules.
///
/// Unknown regions, teams or maps fall back to the first valid entry rather
/// than erroring; the fallbacks are reported in [`SelectionState::warnings`]
/// only when side B has nothing left to pick.
pub struct SelectionBuilder<'a> {
    catalog: &'a Catalog,
    input: SelectionInput,
}

impl<'a> SelectionBuilder<'a> {
    /// Defaults: first region on both sides, first team for A, second team of
    /// B's region for B, first map.
    pub fn new(catalog: &'a Catalog) -> Self {
        SelectionBuilder {
            catalog,
            input: SelectionInput::default(),
        }
    }

    pub fn from_input(catalog: &'a Catalog, input: SelectionInput) -> Self {
        SelectionBuilder { catalog, input }
    }

    #[cfg(test)]
    pub fn a_region(mut self, region: impl Into<String>) -> Self {
        self.input.a_region = Some(region.into());
        self
    }

    #[cfg(test)]
    pub fn a_team(mut self, team: impl Into<String>) -> Self {
        self.input.a_team = Some(team.into());
        self
    }

    #[cfg(test)]
    pub fn b_region(mut self, region: impl Into<String>) -> Self {
        self.input.b_region = Some(region.into());
        self
    }

    #[cfg(test)]
    pub fn b_team(mut self, team: impl Into<String>) -> Self {
        self.input.b_team = Some(team.into());
        self
    }

    #[cfg(test)]
    pub fn map(mut self, map: impl Into<String>) -> Self {
        self.input.map = Some(map.into());
        self
    }

    fn pick_region(&self, wanted: Option<&str>) -> String {
        let first = &self.catalog.regions[0].name;
        wanted
            .and_then(|w| self.catalog.region(w))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| first.clone())
    }

    pub fn build(self) -> SelectionState {
        let catalog = self.catalog;
        let mut warnings = Vec::new();

        let a_region = self.pick_region(self.input.a_region.as_deref());
        let a_teams: Vec<String> = catalog
            .region(&a_region)
            .map(|r| r.teams.clone())
            .unwrap_or_default();
        let a_team = match self.input.a_team.as_deref() {
            Some(t) if a_teams.iter().any(|x| x == t) => t.to_string(),
            _ => a_teams[0].clone(),
        };

        let b_region = self.pick_region(self.input.b_region.as_deref());
        let b_teams: Vec<String> = available_b_teams(catalog, &a_region, &a_team, &b_region)
            .into_iter()
            .map(str::to_string)
            .collect();
        let b_default = if self.input.b_team.is_none() {
            // the initial screen pre-selects the region's second team
            catalog
                .region(&b_region)
                .and_then(|r| r.teams.get(1))
                .filter(|t| b_teams.contains(*t))
                .cloned()
        } else {
            None
        };
        let b_team = match self.input.b_team.as_deref() {
            Some(t) if b_teams.iter().any(|x| x == t) => Some(t.to_string()),
            _ => b_default.or_else(|| b_teams.first().cloned()),
        };
        if b_team.is_none() {
            warn!("No selectable team B in {} with team A {}", b_region, a_team);
            warnings.push(NO_TEAM_B_WARNING.to_string());
        }

        let map = match self.input.map.as_deref() {
            Some(m) if catalog.maps.iter().any(|x| x == m) => m.to_string(),
            _ => catalog.maps[0].clone(),
        };

        SelectionState {
            screen: Screen::Selection,
            selection: Selection {
                a_region,
                a_team,
                b_region,
                b_team,
                map,
            },
            a_teams,
            b_teams,
            warnings,
        }
    }
}

impl Selection {
    /// The selection → result transition. Needs both teams and a map.
    pub fn to_request(&self) -> Result<PredictionRequest, &'static str> {
        match &self.b_team {
            Some(b) if !self.a_team.is_empty() && !self.map.is_empty() && *b != self.a_team => {
                Ok(PredictionRequest {
                    team1: self.a_team.clone(),
                    team2: b.clone(),
                    map: self.map.clone(),
                })
            }
            _ => Err(INCOMPLETE_WARNING),
        }
    }
}
