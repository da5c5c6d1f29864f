//! The two-screen prediction flow.
//!
//! State is never held server-side: the page sends an explicit selection,
//! [`SelectionBuilder`] normalises it and [`render_result`] turns one scoring
//! call into the result screen.

pub mod render;
pub mod selection;

pub use render::{render_result, ResultView};
pub use selection::{SelectionBuilder, SelectionInput, SelectionState};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Selection,
    Result,
}
