#![allow(missing_docs)]
//! Error types for quarry-bridge.
//!
//! [`RunnerError`] covers the retrieval path: backend-reported failures and
//! actor-channel breakage. [`BridgeError`] is the crate-wide type surfaced
//! from the tool adapter; runner errors convert into it via `#[from]`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Channel error: {0}")]
    Channel(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Malformed action: {0}")]
    MalformedAction(String),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
