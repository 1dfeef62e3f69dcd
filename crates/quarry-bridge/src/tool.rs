//! The query tool: parse an action, dispatch it to the runner, and append
//! the formatted results to the chat session once the completion fires.
//!
//! An invocation completes at dispatch; the synchronous outcome is always
//! [`ToolStatus::Pending`]. Retrieval success or failure is observed only
//! through side effects on the session. Absent results append nothing, and
//! backend error text reaches the transcript only when `include_stderr` is
//! set.

use std::sync::Arc;

use quarry_core::QueryInput;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    config::ToolOptions,
    error::BridgeError,
    format::format_messages,
    runner::{query_args, RunnerHandle},
    schema::{system_prompt, ActionSerializer, QUERY_TOOL_PARAMETERS},
    session::{AppendOpts, ChatMessage, ChatSession},
    TOOL_NAME,
};

/// Incoming action as emitted by the model: keywords (string or sequence)
/// plus a requested count. A non-positive count means "no explicit limit
/// requested" at the schema level; the surfacing cap is `ToolOptions::max_num`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryAction {
    pub query: QueryInput,
    pub count: i64,
}

/// Synchronous return of an invocation. Dispatch succeeded; the retrieval
/// outcome lands later on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Pending,
}

/// Output hook invoked off the completion path with a short status line.
pub type OutputHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Descriptor the host uses to register the tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub parameters: Value,
}

pub struct QueryTool {
    options: ToolOptions,
    runner: RunnerHandle,
    session: Arc<dyn ChatSession>,
    on_success: Option<OutputHook>,
    on_error: Option<OutputHook>,
}

impl QueryTool {
    pub fn new(options: ToolOptions, runner: RunnerHandle, session: Arc<dyn ChatSession>) -> Self {
        Self {
            options,
            runner,
            session,
            on_success: None,
            on_error: None,
        }
    }

    pub fn on_success(mut self, hook: OutputHook) -> Self {
        self.on_success = Some(hook);
        self
    }

    pub fn on_error(mut self, hook: OutputHook) -> Self {
        self.on_error = Some(hook);
        self
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: TOOL_NAME,
            parameters: QUERY_TOOL_PARAMETERS.clone(),
        }
    }

    /// Instruction prompt for this tool, rendered through the host's
    /// serializer.
    pub fn prompt(&self, serializer: &dyn ActionSerializer) -> String {
        system_prompt(&self.options, serializer)
    }

    /// Parse and dispatch one action. Fails fast on undecodable input or an
    /// empty query; otherwise returns [`ToolStatus::Pending`] as soon as the
    /// runner accepts the submission.
    #[instrument(skip(self, action))]
    pub async fn execute(&self, action: Value) -> Result<ToolStatus, BridgeError> {
        let action: QueryAction = serde_json::from_value(action)
            .map_err(|e| BridgeError::MalformedAction(e.to_string()))?;
        if action.query.is_empty() {
            return Err(BridgeError::MalformedAction(
                "query must contain at least one keyword".to_string(),
            ));
        }
        let request_id = Uuid::new_v4();
        let keywords = action.query.into_keywords();
        let args = query_args(&keywords, action.count);
        debug!(%request_id, keywords = keywords.len(), count = action.count, "submitting query");
        let rx = self.runner.submit(args, 0).await?;

        let session = Arc::clone(&self.session);
        let options = self.options;
        let on_success = self.on_success.clone();
        let on_error = self.on_error.clone();
        tokio::spawn(async move {
            let outcome = match rx.await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(%request_id, "runner went away before completing the query");
                    return;
                }
            };
            match outcome {
                Ok(result) => {
                    let messages = format_messages(result, options.max_num);
                    debug!(%request_id, appended = messages.len(), "appending retrieved context");
                    if let Some(hook) = on_success.as_deref() {
                        hook(&format!("retrieved {} document(s)", messages.len()));
                    }
                    for message in messages {
                        let (msg, opts) = message.into_chat_message();
                        session.append_message(msg, opts);
                    }
                }
                Err(err) => {
                    debug!(%request_id, error = %err, "retrieval failed; appending nothing");
                    if let Some(hook) = on_error.as_deref() {
                        hook(&err.to_string());
                    }
                    if options.include_stderr {
                        session.append_message(
                            ChatMessage::new_system(err.to_string()),
                            AppendOpts {
                                visible: true,
                                id: None,
                            },
                        );
                    }
                }
            }
        });
        Ok(ToolStatus::Pending)
    }
}
