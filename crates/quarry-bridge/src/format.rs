//! Result capping and rendering into hidden context messages.
//!
//! Capping keeps the first `cap` documents in backend order when `cap > 0`
//! and everything otherwise. Rendering embeds path and content verbatim in a
//! fixed template; nothing is truncated, escaped, or validated here, so these
//! functions never fail.

use itertools::Itertools;
use quarry_core::{RetrievalResult, RetrievedDocument};

use crate::session::{AppendOpts, ChatMessage};

/// One retained document rendered for injection; always appended hidden with
/// user role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMessage {
    pub path: String,
    pub text: String,
}

impl ContextMessage {
    fn render(doc: RetrievedDocument) -> Self {
        let text = format!(
            "Here is a file from the user's codebase:\n<path>{}</path>\n<content>\n{}\n</content>",
            doc.path, doc.content
        );
        Self {
            path: doc.path,
            text,
        }
    }

    pub fn into_chat_message(self) -> (ChatMessage, AppendOpts) {
        (ChatMessage::new_user(self.text), AppendOpts::hidden())
    }
}

/// Keep the first `cap` documents when `cap > 0`, all of them otherwise.
/// Order is preserved; excess positions are dropped without error.
pub fn cap_results(result: RetrievalResult, cap: i64) -> RetrievalResult {
    if cap <= 0 {
        return result;
    }
    result.into_iter().take(cap as usize).collect()
}

/// Cap and render, one message per retained document, in backend order.
pub fn format_messages(result: RetrievalResult, cap: i64) -> Vec<ContextMessage> {
    cap_results(result, cap)
        .into_iter()
        .map(ContextMessage::render)
        .collect_vec()
}
