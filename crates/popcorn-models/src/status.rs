use serde::{Deserialize, Serialize};

/// Lifecycle of a session's current fetch. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl SessionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}
