use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type SchoolId = u32;

pub type SchoolNames = BTreeMap<SchoolId, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub game_id: u64,
    pub month: u32,
    pub day: u32,
    pub year: i32,
    pub is_win: bool,
    pub team_score: u32,
    pub oppt_score: u32,
    pub oppt_id: SchoolId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRecord {
    pub player_id: u64,
    pub first: String,
    pub last: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SchoolInfo {
    pub games: Vec<GameRecord>,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub main_stat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub per_what: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculationRequest {
    pub school_id: SchoolId,
    pub games: Vec<String>,
    pub on_court: Vec<String>,
    pub off_court: Vec<String>,
    pub making_actions: Vec<String>,
    pub not_making_actions: Vec<String>,
    pub stats: Vec<StatSpec>,
}

/// One calculation result; the backend sends formatted strings ("12.50",
/// "Inf.") but plain numbers are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Answer {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Number(value) => write!(f, "{value:.2}"),
            Answer::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerRow {
    pub stat: String,
    pub answer: Answer,
}

/// Committed labels of one category at the moment a question was asked.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionSnapshot {
    pub category: crate::selection::Category,
    pub title: &'static str,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerCard {
    pub school: String,
    pub request: CalculationRequest,
    pub selections: Vec<SelectionSnapshot>,
    pub rows: Vec<AnswerRow>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolMatch {
    pub id: SchoolId,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SchoolQuery {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct ChooseSchoolRequest {
    pub school_id: SchoolId,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomStatRequest {
    pub main_stat: String,
    pub per_what: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub is_all: bool,
    pub pending: bool,
    pub committed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: crate::selection::Category,
    pub title: &'static str,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchoolView {
    pub id: SchoolId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub school: Option<SchoolView>,
    pub open_popup: Option<crate::selection::Category>,
    pub categories: Vec<CategoryView>,
    pub answers: Vec<AnswerCard>,
}
