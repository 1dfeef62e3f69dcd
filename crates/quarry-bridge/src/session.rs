//! The chat-session seam: the only surface through which the bridge mutates
//! conversation state.
//!
//! The host assistant implements [`ChatSession`]; the bridge appends hidden
//! context messages and visible reference entries through it and never
//! reorders or removes what it appended. Messages sharing an identity string
//! are the same logical context to the session, so re-appending under an
//! unchanged identity replaces rather than duplicates.

use serde::{Deserialize, Serialize};

/// Identity of a conversation buffer in the host assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferId(pub u64);

impl std::fmt::Display for BufferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One conversation entry as the bridge hands it to the session. Ownership
/// passes to the session on append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new_user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn new_system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Append options: visibility in the transcript and an optional
/// deduplication identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendOpts {
    pub visible: bool,
    pub id: Option<String>,
}

impl AppendOpts {
    /// Hidden entry with no identity; the shape used for per-document
    /// context messages.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            id: None,
        }
    }

    pub fn hidden_with_id(id: impl Into<String>) -> Self {
        Self {
            visible: false,
            id: Some(id.into()),
        }
    }
}

/// A visible entry in the session's reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub source: String,
    pub name: String,
    pub id: String,
}

/// Host-side conversation surface consumed by the bridge. Appends may be
/// issued from spawned completion tasks, so implementations must tolerate
/// calls from multiple tasks; ordering across concurrent invocations is the
/// session's concern.
pub trait ChatSession: Send + Sync {
    fn buffer(&self) -> BufferId;
    fn append_message(&self, msg: ChatMessage, opts: AppendOpts);
    fn add_reference(&self, reference: Reference);
}
