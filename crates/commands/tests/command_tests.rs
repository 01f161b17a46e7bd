use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tabclust_commands::{CommandResponse, handle_line, serve};
use tabclust_core::{ApiKey, Embedding, Settings, Tab};
use tabclust_embeddings::{EmbeddingError, EmbeddingProvider};
use tabclust_llm::GroupNamer;
use tabclust_service::{AppContext, StaticTabSource, TabGrouper};
use tabclust_storage::Storage;
use tempfile::TempDir;
use tokio::io::BufReader;

/// Pets point one way, finance the other.
struct TopicEmbedder;

#[async_trait]
impl EmbeddingProvider for TopicEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        match text {
            "Cats" | "Dogs" => Ok(vec![1.0, 0.0]),
            "Stocks" | "Bonds" => Ok(vec![0.0, 1.0]),
            _ => Err(EmbeddingError::MalformedResponse("unknown topic".to_owned())),
        }
    }
}

struct FirstTitleNamer;

#[async_trait]
impl GroupNamer for FirstTitleNamer {
    async fn suggest_name(&self, tabs: &[Tab]) -> String {
        format!("{} and friends", tabs[0].title)
    }
}

fn context() -> (AppContext, TempDir) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&dir.path().join("groups.db")).unwrap();
    let grouper = TabGrouper::new(Arc::new(TopicEmbedder), Arc::new(FirstTitleNamer));
    let open_tabs = StaticTabSource::new(vec![
        Tab::new("Stocks", "https://stocks"),
        Tab::new("Cats", "https://cats"),
        Tab::new("Bonds", "https://bonds"),
    ]);
    let ctx = AppContext::new(Settings::default(), ApiKey::new(None), Arc::new(storage), grouper)
        .with_open_tabs(Arc::new(open_tabs));
    (ctx, dir)
}

async fn call(ctx: &AppContext, request: Value) -> CommandResponse {
    handle_line(ctx, &request.to_string()).await.unwrap()
}

async fn result(ctx: &AppContext, request: Value) -> Value {
    match call(ctx, request).await {
        CommandResponse::Result { result } => result,
        CommandResponse::Error { error } => panic!("unexpected error: {error}"),
    }
}

async fn error(ctx: &AppContext, request: Value) -> String {
    match call(ctx, request).await {
        CommandResponse::Error { error } => error,
        CommandResponse::Result { result } => panic!("unexpected result: {result}"),
    }
}

#[tokio::test]
async fn test_group_lifecycle() {
    let (ctx, _dir) = context();

    result(&ctx, json!({"action": "createTabGroup", "data": "Pets"})).await;
    let group = result(
        &ctx,
        json!({"action": "writeTabsToGroup", "data": {
            "groupName": "Pets",
            "tabObjects": [{"title": "Cats", "url": "https://cats"}, {"title": "Dogs", "url": "https://dogs"}]
        }}),
    )
    .await;
    assert_eq!(group["tabs"].as_array().unwrap().len(), 2);

    let tabs = result(&ctx, json!({"action": "readTabsFromGroup", "data": "Pets"})).await;
    assert_eq!(tabs[0]["title"], "Cats");
    assert_eq!(tabs[0]["group"], "Pets");

    let renamed =
        result(&ctx, json!({"action": "renameGroup", "data": {"oldName": "Pets", "newName": "Animals"}}))
            .await;
    assert_eq!(renamed["tabsMoved"], 2);

    let removed = result(
        &ctx,
        json!({"action": "removeTabFromGroup", "data": {
            "groupName": "Animals", "tabObject": {"title": "Dogs", "url": "https://dogs"}
        }}),
    )
    .await;
    assert_eq!(removed["removed"], 1);

    let groups = result(&ctx, json!({"action": "getAllGroups", "data": {}})).await;
    assert_eq!(groups, json!([{"groupName": "Animals", "tabs": [{"title": "Cats", "url": "https://cats"}]}]));

    let removed = result(&ctx, json!({"action": "removeGroup", "data": "Animals"})).await;
    assert_eq!(removed["removed"], true);
    assert_eq!(result(&ctx, json!({"action": "getAllGroupNames"})).await, json!([]));
}

#[tokio::test]
async fn test_errors_are_reported_not_thrown() {
    let (ctx, _dir) = context();

    result(&ctx, json!({"action": "createTabGroup", "data": {"name": "Pets"}})).await;
    let dup = error(&ctx, json!({"action": "createTabGroup", "data": {"name": "Pets"}})).await;
    assert!(dup.contains("already exists"), "{dup}");

    let missing =
        error(&ctx, json!({"action": "renameGroup", "data": {"oldName": "Ghost", "newName": "X"}})).await;
    assert!(missing.contains("not found"), "{missing}");

    let unknown = error(&ctx, json!({"action": "formatDisk"})).await;
    assert!(unknown.contains("unknown action"));

    let response = handle_line(&ctx, "{not json").await.unwrap();
    assert!(response.is_error());
}

#[tokio::test]
async fn test_suggestions_from_store_and_open_tabs() {
    let (ctx, _dir) = context();
    result(
        &ctx,
        json!({"action": "writeTabsToGroup", "data": {"groupName": "Inbox", "tabObjects": [
            {"title": "Cats", "url": "https://cats"},
            {"title": "Stocks", "url": "https://stocks"},
            {"title": "Dogs", "url": "https://dogs"}
        ]}}),
    )
    .await;

    let stored = result(&ctx, json!({"action": "getSuggestedTabGroups", "data": {}})).await;
    assert_eq!(
        stored,
        json!([{"groupName": "Cats and friends", "tabs": [
            {"title": "Cats", "url": "https://cats"},
            {"title": "Dogs", "url": "https://dogs"}
        ]}])
    );

    let open = result(&ctx, json!({"action": "getSuggestedOpenTabs", "data": {}})).await;
    assert_eq!(open[0]["groupName"], "Stocks and friends");
    assert_eq!(open.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_suggestions_over_empty_store() {
    let (ctx, _dir) = context();
    assert_eq!(result(&ctx, json!({"action": "getSuggestedTabGroups"})).await, json!([]));
}

#[tokio::test]
async fn test_api_key_commands() {
    let (ctx, _dir) = context();
    assert_eq!(result(&ctx, json!({"action": "getApiKey"})).await, Value::Null);
    result(&ctx, json!({"action": "setApiKey", "data": {"key": "sk-123"}})).await;
    assert_eq!(result(&ctx, json!({"action": "getApiKey"})).await, json!("sk-123"));
}

#[tokio::test]
async fn test_serve_answers_each_line_in_order() {
    let (ctx, _dir) = context();
    let input = concat!(
        r#"{"action": "createTabGroup", "data": "Work"}"#,
        "\n\n",
        r#"{"action": "createTabGroup", "data": "Work"}"#,
        "\n",
        r#"{"action": "getAllGroupNames"}"#,
        "\n",
    );
    let mut output = Vec::new();

    serve(&ctx, BufReader::new(input.as_bytes()), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["result"]["name"], "Work");
    assert!(lines[1].get("error").is_some());
    assert_eq!(lines[2], json!({"result": ["Work"]}));
}
