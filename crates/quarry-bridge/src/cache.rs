//! Cache-backed context command: turn a per-buffer cache entry into one
//! ready-made context block.
//!
//! The cache backend is injected as `Option<Arc<dyn CacheBackend>>`; absence
//! is a normal typed state, not a caught failure. An absent backend or an
//! unregistered buffer contributes nothing, silently. A produced block is
//! appended hidden and tagged with a count-derived identity that the session
//! uses to replace rather than duplicate on re-invocation.

use std::sync::Arc;

use quarry_core::{PromptComponent, RetrievedDocument};
use tracing::debug;

use crate::session::{AppendOpts, BufferId, ChatMessage, ChatSession, Reference};
use crate::TOOL_NAME;

/// Per-document post-processing hook the cache backend applies while
/// composing its prompt component.
pub type RenderFn = dyn Fn(&RetrievedDocument) -> String + Send + Sync;

/// External cache of precomputed prompt components, keyed by buffer.
pub trait CacheBackend: Send + Sync {
    fn is_registered(&self, buffer: BufferId) -> bool;
    fn build_prompt_component(
        &self,
        buffer: BufferId,
        render: Option<&RenderFn>,
    ) -> Option<PromptComponent>;
}

/// Fixed preamble prepended to the cached content.
pub const CONTEXT_PREAMBLE: &str =
    "The following are relevant files from the user's codebase. Use them as context when answering.\n\n";

/// A composed context block plus its deduplication identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    pub content: String,
    pub id: String,
}

pub struct ContextCommand {
    cache: Option<Arc<dyn CacheBackend>>,
    render: Option<Arc<RenderFn>>,
}

impl ContextCommand {
    pub fn new(cache: Option<Arc<dyn CacheBackend>>) -> Self {
        Self {
            cache,
            render: None,
        }
    }

    pub fn with_render(mut self, render: Arc<RenderFn>) -> Self {
        self.render = Some(render);
        self
    }

    /// Compose the context block for a buffer, or nothing when there is
    /// nothing to contribute.
    pub fn build_context(&self, buffer: BufferId) -> Option<ContextBlock> {
        let cache = match &self.cache {
            Some(cache) => cache,
            None => {
                debug!(%buffer, "no cache backend configured; contributing nothing");
                return None;
            }
        };
        if !cache.is_registered(buffer) {
            debug!(%buffer, "buffer not registered with cache; contributing nothing");
            return None;
        }
        let component = cache.build_prompt_component(buffer, self.render.as_deref())?;
        let id = component.dedup_identity();
        Some(ContextBlock {
            content: format!("{}{}", CONTEXT_PREAMBLE, component.content),
            id,
        })
    }

    /// Append the block for the session's buffer as one hidden user message
    /// and register a visible reference entry, both tagged with the same
    /// identity. Silent no-op when there is nothing to contribute.
    pub fn execute(&self, session: &dyn ChatSession) {
        let Some(block) = self.build_context(session.buffer()) else {
            return;
        };
        debug!(id = %block.id, "appending cache-backed context block");
        session.append_message(
            ChatMessage::new_user(block.content),
            AppendOpts::hidden_with_id(block.id.clone()),
        );
        session.add_reference(Reference {
            source: TOOL_NAME.to_string(),
            name: TOOL_NAME.to_string(),
            id: block.id,
        });
    }
}
