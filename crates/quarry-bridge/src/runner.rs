//! Runner client: the async seam to the retrieval backend.
//!
//! [`start`] spawns an actor that owns the injected [`RetrievalBackend`] and
//! serves [`RunnerHandle`] submissions over an mpsc command channel. Each
//! submission is answered exactly once on its own oneshot channel; the
//! submitter never blocks on backend work. No retry, timeout, or
//! cancellation lives at this layer, and overlapping submissions are
//! independent.

use std::future::Future;

use quarry_core::RetrievalResult;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

use crate::error::RunnerError;

/// Leading action token of the wire format.
pub const QUERY_ACTION: &str = "query";
/// Count flag of the wire format.
pub const COUNT_FLAG: &str = "-n";

const RUNNER_CHANNEL_CAPACITY: usize = 32;

/// Resolves exactly once with the retrieval outcome. A `RecvError` means the
/// actor went away before answering, which callers treat as a channel error.
pub type RunnerReceiver = oneshot::Receiver<Result<RetrievalResult, RunnerError>>;

/// The opaque retrieval backend. Requests are the flat token sequence built
/// by [`query_args`]; failures are diagnostic text, not panics.
pub trait RetrievalBackend: Send + Sync + 'static {
    fn retrieve(
        &self,
        args: &[String],
    ) -> impl Future<Output = Result<RetrievalResult, String>> + Send;
}

impl<B: RetrievalBackend> RetrievalBackend for std::sync::Arc<B> {
    fn retrieve(
        &self,
        args: &[String],
    ) -> impl Future<Output = Result<RetrievalResult, String>> + Send {
        self.as_ref().retrieve(args)
    }
}

/// Build the wire-format arg vector: `["query", "-n", "<count>", kw1, ...]`.
pub fn query_args(keywords: &[String], count: i64) -> Vec<String> {
    let mut args = Vec::with_capacity(keywords.len() + 3);
    args.push(QUERY_ACTION.to_string());
    args.push(COUNT_FLAG.to_string());
    args.push(count.to_string());
    args.extend(keywords.iter().cloned());
    args
}

enum RunnerCmd {
    Submit {
        args: Vec<String>,
        priority: i32,
        resp: oneshot::Sender<Result<RetrievalResult, RunnerError>>,
    },
}

/// Cloneable handle to the runner actor.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    tx: mpsc::Sender<RunnerCmd>,
}

/// Start the runner actor around a backend and return a handle to it. The
/// actor exits once every handle is dropped.
pub fn start<B: RetrievalBackend>(backend: B) -> RunnerHandle {
    let (tx, mut rx) = mpsc::channel::<RunnerCmd>(RUNNER_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                RunnerCmd::Submit {
                    args,
                    priority,
                    resp,
                } => {
                    debug!(priority, tokens = args.len(), "dispatching query to backend");
                    let outcome = backend.retrieve(&args).await.map_err(RunnerError::Backend);
                    if resp.send(outcome).is_err() {
                        warn!("retrieval completed but the submitter dropped its receiver");
                    }
                }
            }
        }
        debug!("runner actor shutting down: all handles dropped");
    });
    RunnerHandle { tx }
}

impl RunnerHandle {
    /// Submit a query to the backend. Returns as soon as the command is
    /// queued; the receiver resolves later with the outcome. The suggested
    /// priority is recorded for the backend but commands are served in
    /// submission order.
    #[instrument(skip(self, args), fields(tokens = args.len()))]
    pub async fn submit(
        &self,
        args: Vec<String>,
        priority: i32,
    ) -> Result<RunnerReceiver, RunnerError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(RunnerCmd::Submit {
                args,
                priority,
                resp: resp_tx,
            })
            .await
            .map_err(|e| RunnerError::Channel(format!("failed to send query command: {}", e)))?;
        Ok(resp_rx)
    }
}
