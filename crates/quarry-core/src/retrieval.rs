use serde::{Deserialize, Serialize};

/// One document as returned by the retrieval backend. Identity is the path;
/// content is opaque text. The backend may return duplicates and this crate
/// does not deduplicate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub path: String,
    pub content: String,
}

impl RetrievedDocument {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Ordered sequence of retrieved documents. Backend order reflects relevance
/// ranking and must be preserved through capping.
pub type RetrievalResult = Vec<RetrievedDocument>;

/// A pre-rendered context block from the cache backend, plus the file count
/// used to derive a human-readable deduplication identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptComponent {
    pub count: usize,
    pub content: String,
}

impl PromptComponent {
    /// Identity string shared by the appended message and its reference
    /// entry. The chat session treats entries with the same identity as the
    /// same logical context, so re-invocation replaces rather than
    /// duplicates.
    pub fn dedup_identity(&self) -> String {
        format!("{} file(s) from codebase", self.count)
    }
}
