use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Aggregate statistics for one team, keyed by abbreviation in [`TeamTable`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamStats {
    /// Mean player rating across the team's recorded matches
    #[serde(default)]
    pub avg_rating: Option<f64>,
    /// map name → historical win rate (0.0–1.0)
    #[serde(default)]
    pub map_win_rate: BTreeMap<String, f64>,
}

/// abbreviation → stats, as loaded from `merged_teams_data.json`
pub type TeamTable = BTreeMap<String, TeamStats>;

/// Display name → abbreviation lookup.
///
/// The on-disk file maps each abbreviation to its list of display names; the
/// inversion happens once at load time.
#[derive(Debug, Clone, Default)]
pub struct TeamNameMapping {
    by_name: HashMap<String, String>,
}

impl TeamNameMapping {
    /// Invert `abbr → [names]`. Entries are visited in file order, so a name
    /// claimed by two abbreviations resolves to the later one. Every
    /// abbreviation resolves to itself, even if it also appears as some other
    /// team's display name.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, N)>,
        N: IntoIterator<Item = String>,
    {
        let entries: Vec<(String, Vec<String>)> = entries
            .into_iter()
            .map(|(abbr, names)| (abbr, names.into_iter().collect()))
            .collect();

        let mut by_name: HashMap<String, String> = entries
            .iter()
            .map(|(abbr, _)| (abbr.clone(), abbr.clone()))
            .collect();
        for (abbr, names) in entries {
            for name in names {
                // abbreviations are already pinned to themselves
                if by_name.get(&name) == Some(&name) {
                    continue;
                }
                by_name.insert(name, abbr.clone());
            }
        }
        TeamNameMapping { by_name }
    }

    /// Resolve a display name or an abbreviation to the canonical abbreviation.
    pub fn resolve<'a>(&'a self, name_or_abbr: &'a str) -> &'a str {
        self.by_name
            .get(name_or_abbr)
            .map(String::as_str)
            .unwrap_or(name_or_abbr)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }
}

/// A competitive region and its team abbreviations, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub name: String,
    pub teams: Vec<String>,
}

/// Regions and maps offered on the selection screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub regions: Vec<Region>,
    pub maps: Vec<String>,
}

impl Catalog {
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// The 2025 VCT franchise regions and the competitive map pool.
    pub fn builtin() -> Self {
        fn region(name: &str, teams: &[&str]) -> Region {
            Region {
                name: name.to_string(),
                teams: teams.iter().map(|t| t.to_string()).collect(),
            }
        }
        Catalog {
            regions: vec![
                region(
                    "VCT CN",
                    &["AG", "BLG", "EDG", "FPX", "JDG", "NOVA", "TE", "TEC", "TYL", "WOL", "DRG", "XLG"],
                ),
                region(
                    "VCT EMEA",
                    &["BBL", "FNC", "FUT", "GX", "KC", "KOI", "NAVI", "TH", "TL", "VIT", "M8", "APK"],
                ),
                region(
                    "VCT PACIFIC",
                    &["DFM", "DRX", "GEN", "GE", "PRX", "RRQ", "T1", "TLN", "TS", "ZETA", "NS", "BME"],
                ),
                region(
                    "VCT AMERICA",
                    &["100T", "C9", "EG", "FUR", "KRU", "LEV", "LOUD", "MIBR", "NRG", "SEN", "G2", "2G"],
                ),
            ],
            maps: [
                "Ascent", "Bind", "Breeze", "Fracture", "Haven", "Icebox", "Lotus", "Pearl", "Split",
                "Sunset",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        }
    }
}
