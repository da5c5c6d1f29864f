use serde::Serialize;

use super::selection::PredictionRequest;
use super::Screen;
use crate::predict::PredictionOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamCard {
    pub team: String,
    pub win_prob: f64,
    /// e.g. "66.8%"
    pub win_pct: String,
}

/// Everything the result screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultView {
    Ok {
        screen: Screen,
        map: String,
        team1: TeamCard,
        team2: TeamCard,
        confidence: String,
    },
    Error {
        screen: Screen,
        error: String,
    },
}

fn pct(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Build the result screen for one predict action.
///
/// Team 2's share is the complement of team 1's, never scored separately.
pub fn render_result(request: &PredictionRequest, outcome: &PredictionOutcome) -> ResultView {
    match outcome {
        PredictionOutcome::Success(r) => {
            let p2 = 1.0 - r.win_prob;
            ResultView::Ok {
                screen: Screen::Result,
                map: request.map.clone(),
                team1: TeamCard {
                    team: request.team1.clone(),
                    win_prob: r.win_prob,
                    win_pct: pct(r.win_prob),
                },
                team2: TeamCard {
                    team: request.team2.clone(),
                    win_prob: p2,
                    win_pct: pct(p2),
                },
                confidence: r.confidence.label().to_string(),
            }
        }
        PredictionOutcome::Failure { error } => ResultView::Error {
            screen: Screen::Result,
            error: error.clone(),
        },
    }
}
