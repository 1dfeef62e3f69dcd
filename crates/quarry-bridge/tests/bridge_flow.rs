//! End-to-end flows through the bridge: dispatch, completion, capping,
//! error paths, and the cache-backed context command.

use std::sync::Arc;

use quarry_bridge::test_harness::{FailingBackend, RecordingSession, StaticBackend, StaticCache};
use quarry_bridge::tracing_setup::init_test_tracing;
use quarry_bridge::{
    start, BufferId, ContextCommand, JsonActionSerializer, QueryTool, Role, ToolOptions,
    ToolStatus, TOOL_NAME,
};
use quarry_core::RetrievedDocument;
use serde_json::json;

fn seven_docs() -> Vec<RetrievedDocument> {
    (1..=7)
        .map(|i| RetrievedDocument::new(format!("src/mod{}.rs", i), format!("// module {}", i)))
        .collect()
}

#[tokio::test]
async fn uncapped_query_appends_every_document_in_order() {
    init_test_tracing();
    let runner = start(StaticBackend::new(seven_docs()));
    let session = RecordingSession::new(BufferId(1));
    let tool = QueryTool::new(
        ToolOptions {
            max_num: -1,
            ..ToolOptions::default()
        },
        runner,
        session.clone(),
    );

    let status = tool
        .execute(json!({ "query": ["module"], "count": 7 }))
        .await
        .expect("dispatch");
    assert_eq!(status, ToolStatus::Pending);

    let messages = session.wait_for_messages(7).await;
    assert_eq!(messages.len(), 7);
    for (i, (msg, opts)) in messages.iter().enumerate() {
        assert_eq!(msg.role, Role::User);
        assert!(!opts.visible);
        assert!(msg.content.contains(&format!("<path>src/mod{}.rs</path>", i + 1)));
    }
}

#[tokio::test]
async fn capped_query_appends_only_the_first_documents() {
    init_test_tracing();
    let runner = start(StaticBackend::new(seven_docs()));
    let session = RecordingSession::new(BufferId(1));
    let tool = QueryTool::new(
        ToolOptions {
            max_num: 3,
            ..ToolOptions::default()
        },
        runner,
        session.clone(),
    );

    tool.execute(json!({ "query": ["module"], "count": 7 }))
        .await
        .expect("dispatch");

    let messages = session.wait_for_messages(3).await;
    assert_eq!(messages.len(), 3);
    assert!(messages[0].0.content.contains("src/mod1.rs"));
    assert!(messages[2].0.content.contains("src/mod3.rs"));
    assert!(!messages.iter().any(|(m, _)| m.content.contains("src/mod4.rs")));
}

#[tokio::test]
async fn backend_failure_is_silent_without_include_stderr() {
    init_test_tracing();
    let runner = start(FailingBackend::new("timeout"));
    let session = RecordingSession::new(BufferId(1));
    let tool = QueryTool::new(
        ToolOptions {
            include_stderr: false,
            ..ToolOptions::default()
        },
        runner,
        session.clone(),
    );

    tool.execute(json!({ "query": ["module"], "count": 2 }))
        .await
        .expect("dispatch");

    // Give the completion task a chance to run, then confirm silence.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(session.message_count(), 0);
}

#[tokio::test]
async fn backend_failure_surfaces_diagnostics_when_asked() {
    init_test_tracing();
    let runner = start(FailingBackend::new("index unavailable"));
    let session = RecordingSession::new(BufferId(1));
    let tool = QueryTool::new(
        ToolOptions {
            include_stderr: true,
            ..ToolOptions::default()
        },
        runner,
        session.clone(),
    );

    tool.execute(json!({ "query": ["module"], "count": 2 }))
        .await
        .expect("dispatch");

    let messages = session.wait_for_messages(1).await;
    assert_eq!(messages.len(), 1);
    let (msg, opts) = &messages[0];
    assert_eq!(msg.role, Role::System);
    assert!(opts.visible);
    assert!(msg.content.contains("index unavailable"));
}

#[tokio::test]
async fn empty_result_appends_nothing() {
    init_test_tracing();
    let runner = start(StaticBackend::new(vec![]));
    let session = RecordingSession::new(BufferId(1));
    let tool = QueryTool::new(ToolOptions::default(), runner, session.clone());

    tool.execute(json!({ "query": "anything", "count": 10 }))
        .await
        .expect("dispatch");

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(session.message_count(), 0);
}

#[tokio::test]
async fn overlapping_invocations_all_land() {
    init_test_tracing();
    let runner = start(StaticBackend::new(vec![RetrievedDocument::new(
        "src/lib.rs",
        "pub fn lib() {}",
    )]));
    let session = RecordingSession::new(BufferId(1));
    let tool = QueryTool::new(ToolOptions::default(), runner, session.clone());

    tool.execute(json!({ "query": ["one"], "count": 1 }))
        .await
        .expect("dispatch");
    tool.execute(json!({ "query": ["two"], "count": 1 }))
        .await
        .expect("dispatch");

    let messages = session.wait_for_messages(2).await;
    assert_eq!(messages.len(), 2);
}

#[test]
fn prompt_generation_matches_options() {
    let serializer = JsonActionSerializer;
    let runner_free_options = ToolOptions {
        max_num: -1,
        default_num: 10,
        include_stderr: false,
    };
    let prompt = quarry_bridge::system_prompt(&runner_free_options, &serializer);
    assert!(prompt.contains("request 10"));
    assert!(!prompt.contains("At most"));
    assert!(prompt.contains(r#""tool": "quarry""#));
}

#[test]
fn context_command_full_flow() {
    let docs = vec![
        RetrievedDocument::new("src/a.rs", "fn a() {}"),
        RetrievedDocument::new("src/b.rs", "fn b() {}"),
        RetrievedDocument::new("src/c.rs", "fn c() {}"),
    ];
    let cache = Arc::new(StaticCache::new(vec![BufferId(9)], docs));
    let command = ContextCommand::new(Some(cache));

    let registered = RecordingSession::new(BufferId(9));
    command.execute(registered.as_ref());
    let messages = registered.messages.lock().unwrap().clone();
    let references = registered.references.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert_eq!(references.len(), 1);
    assert_eq!(
        messages[0].1.id.as_deref(),
        Some("3 file(s) from codebase")
    );
    assert_eq!(references[0].id, "3 file(s) from codebase");
    assert_eq!(references[0].name, TOOL_NAME);

    // Unregistered buffer: nothing contributed, no reference.
    let unregistered = RecordingSession::new(BufferId(10));
    command.execute(unregistered.as_ref());
    assert_eq!(unregistered.message_count(), 0);
    assert!(unregistered.references.lock().unwrap().is_empty());
}
