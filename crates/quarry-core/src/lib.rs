//! Core data types shared across the quarry workspace.
//!
//! These are the plain, serde-derived types that cross crate boundaries:
//! retrieved documents as the backend returns them, the string-or-sequence
//! query payload as the model emits it, and the cache-sourced prompt
//! component used by the context command.

mod query;
mod retrieval;

pub use query::QueryInput;
pub use retrieval::{PromptComponent, RetrievalResult, RetrievedDocument};
