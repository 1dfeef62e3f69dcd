//! Mock collaborators for exercising the bridge in tests.
//!
//! Gated behind the `test_harness` feature (on by default) so integration
//! tests and downstream consumers can share the same mocks.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use itertools::Itertools;
use quarry_core::{PromptComponent, RetrievalResult, RetrievedDocument};

use crate::cache::{CacheBackend, RenderFn};
use crate::runner::RetrievalBackend;
use crate::session::{AppendOpts, BufferId, ChatMessage, ChatSession, Reference};

/// Backend that answers every query with a fixed result and records the arg
/// vectors it was handed.
pub struct StaticBackend {
    pub docs: RetrievalResult,
    pub seen_args: Mutex<Vec<Vec<String>>>,
}

impl StaticBackend {
    pub fn new(docs: RetrievalResult) -> Self {
        Self {
            docs,
            seen_args: Mutex::new(Vec::new()),
        }
    }
}

impl RetrievalBackend for StaticBackend {
    async fn retrieve(&self, args: &[String]) -> Result<RetrievalResult, String> {
        self.seen_args.lock().unwrap().push(args.to_vec());
        Ok(self.docs.clone())
    }
}

/// Backend that fails every query with fixed diagnostic text.
pub struct FailingBackend {
    error: String,
}

impl FailingBackend {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl RetrievalBackend for FailingBackend {
    async fn retrieve(&self, _args: &[String]) -> Result<RetrievalResult, String> {
        Err(self.error.clone())
    }
}

/// Chat session that records every append and reference.
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub buffer: BufferId,
    pub messages: Mutex<Vec<(ChatMessage, AppendOpts)>>,
    pub references: Mutex<Vec<Reference>>,
}

impl RecordingSession {
    pub fn new(buffer: BufferId) -> Arc<Self> {
        Arc::new(Self {
            buffer,
            ..Self::default()
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Poll until at least `n` messages have landed (bounded wait), then
    /// return a snapshot of the transcript.
    pub async fn wait_for_messages(&self, n: usize) -> Vec<(ChatMessage, AppendOpts)> {
        for _ in 0..200 {
            if self.message_count() >= n {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.messages.lock().unwrap().clone()
    }
}

impl ChatSession for RecordingSession {
    fn buffer(&self) -> BufferId {
        self.buffer
    }

    fn append_message(&self, msg: ChatMessage, opts: AppendOpts) {
        self.messages.lock().unwrap().push((msg, opts));
    }

    fn add_reference(&self, reference: Reference) {
        self.references.lock().unwrap().push(reference);
    }
}

/// Cache backend over a fixed document set: registered buffers get a
/// component whose content is each document run through the render callback
/// (or a plain `path:\ncontent` rendering) joined by blank lines.
pub struct StaticCache {
    registered: Vec<BufferId>,
    docs: Vec<RetrievedDocument>,
}

impl StaticCache {
    pub fn new(registered: Vec<BufferId>, docs: Vec<RetrievedDocument>) -> Self {
        Self { registered, docs }
    }
}

impl CacheBackend for StaticCache {
    fn is_registered(&self, buffer: BufferId) -> bool {
        self.registered.contains(&buffer)
    }

    fn build_prompt_component(
        &self,
        buffer: BufferId,
        render: Option<&RenderFn>,
    ) -> Option<PromptComponent> {
        if !self.is_registered(buffer) {
            return None;
        }
        let content = self
            .docs
            .iter()
            .map(|doc| match render {
                Some(render) => render(doc),
                None => format!("{}:\n{}", doc.path, doc.content),
            })
            .join("\n\n");
        Some(PromptComponent {
            count: self.docs.len(),
            content,
        })
    }
}
