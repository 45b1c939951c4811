use serde::{Deserialize, Serialize};

use crate::launch::LaunchPlan;
use crate::model::MatchSpan;
use crate::query_state::Command;
use crate::style::StyleAttribute;

/// One ranked row as the rendering layer sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultView {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub comment: String,
    pub score: i64,
    pub name_match: Option<MatchSpan>,
    pub comment_match: Option<MatchSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub query: String,
    pub cursor: usize,
    pub selected: usize,
    pub results: Vec<ResultView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleEntry {
    pub attribute: StyleAttribute,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum SessionRequest {
    Command(Command),
    SetQuery(String),
    Snapshot,
    Style,
    SetStyle(StyleEntry),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum SessionResponse {
    Snapshot(SessionSnapshot),
    Launch(LaunchPlan),
    Style(Vec<StyleEntry>),
    Exit,
}
