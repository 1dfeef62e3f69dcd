//! Asynchronous retrieval-augmentation bridge.
//!
//! This crate connects a chat-based coding assistant to an external
//! code-retrieval backend. It provides:
//! - A runner client that submits keyword queries to the backend as an
//!   actor-owned job and answers each submission exactly once over a
//!   oneshot channel (`runner`).
//! - A capper/formatter that shapes ranked results into hidden context
//!   messages, preserving backend order (`format`).
//! - An action-schema composer that renders the canonical example actions
//!   into the instruction prompt the model imitates (`schema`).
//! - A tool adapter gluing the above into one callable tool whose
//!   invocation completes at dispatch; retrieval lands later as side
//!   effects on the chat session (`tool`).
//! - A cache-backed context command that appends a precomputed prompt
//!   component under a count-derived deduplication identity (`cache`).
//!
//! Notable characteristics:
//! - Backend failures are data delivered through the completion channel,
//!   never panics across the async boundary.
//! - Missing collaborators (no cache backend, unregistered buffer) are
//!   typed absent states and silent no-ops, not errors.
//! - The chat session is the only shared mutable resource and is touched
//!   exclusively through its own append/reference operations.

pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod runner;
pub mod schema;
pub mod session;
pub mod tool;
pub mod tracing_setup;

#[cfg(feature = "test_harness")]
pub mod test_harness;

pub use cache::{CacheBackend, ContextBlock, ContextCommand};
pub use config::ToolOptions;
pub use error::{BridgeError, RunnerError};
pub use format::{format_messages, ContextMessage};
pub use runner::{start, RetrievalBackend, RunnerHandle};
pub use schema::{system_prompt, ActionEnvelope, ActionSerializer, JsonActionSerializer};
pub use session::{AppendOpts, BufferId, ChatMessage, ChatSession, Reference, Role};
pub use tool::{QueryAction, QueryTool, ToolDescriptor, ToolStatus};

/// Name the host registers the retrieval tool under. Doubles as the
/// source/name on reference entries added by the context command.
pub const TOOL_NAME: &str = "quarry";
