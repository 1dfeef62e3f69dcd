use serde::{Deserialize, Serialize};

/// Query payload as emitted by the model: either a bare keyword string or a
/// sequence of keywords. Normalize with [`QueryInput::into_keywords`] before
/// doing anything else with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryInput {
    Single(String),
    Multiple(Vec<String>),
}

impl QueryInput {
    /// Normalize to an ordered keyword sequence. A single string becomes a
    /// one-element sequence; a sequence passes through unchanged.
    pub fn into_keywords(self) -> Vec<String> {
        match self {
            QueryInput::Single(kw) => vec![kw],
            QueryInput::Multiple(kws) => kws,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            QueryInput::Single(kw) => kw.is_empty(),
            QueryInput::Multiple(kws) => kws.is_empty(),
        }
    }
}

impl From<&str> for QueryInput {
    fn from(kw: &str) -> Self {
        QueryInput::Single(kw.to_string())
    }
}

impl From<Vec<String>> for QueryInput {
    fn from(kws: Vec<String>) -> Self {
        QueryInput::Multiple(kws)
    }
}
