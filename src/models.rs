use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ActivityRecord {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityRecord {
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }
}

/// Activity name to record, as returned by `GET /activities`.
pub type Roster = BTreeMap<String, ActivityRecord>;

/// Body of a signup or unregister response, success or failure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BackendReply {
    pub message: Option<String>,
    pub detail: Option<serde_json::Value>,
}

impl BackendReply {
    /// Server-supplied explanation, preferring `detail` over `message`.
    pub fn detail_text(&self) -> Option<String> {
        if let Some(serde_json::Value::String(detail)) = &self.detail {
            if !detail.is_empty() {
                return Some(detail.clone());
            }
        }
        self.message.clone().filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemovalForm {
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub spots_left: u32,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub visible: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub listing: Listing,
    pub activities: Vec<ActivityCard>,
    pub options: Vec<String>,
    pub status: Option<StatusMessage>,
    pub draft: SignupForm,
    pub fetched_at: Option<String>,
}
