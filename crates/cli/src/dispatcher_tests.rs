use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::config::RoutesFile;

fn dispatcher() -> FixtureDispatcher {
    let file = RoutesFile::parse(
        r#"
        [[routes]]
        endpoint = "/commute/durations"
        method = "POST"
        reply = { status = "success", payload = { addressDurations = [] } }

        [[routes]]
        endpoint = "/commute/durations"
        reply = { from = "get" }

        [[routes]]
        endpoint = "/commute/silent"
        "#,
    )
    .unwrap();
    FixtureDispatcher::new(file.routes)
}

#[tokio::test]
async fn matching_route_returns_its_reply() {
    let reply = dispatcher()
        .handle(json!({
            "type": "API_REQUEST",
            "endpoint": "/commute/durations",
            "method": "POST",
            "body": { "origin": "A" }
        }))
        .await;

    assert_eq!(
        reply,
        Some(json!({ "status": "success", "payload": { "addressDurations": [] } }))
    );
}

#[tokio::test]
async fn routes_are_matched_by_method() {
    let reply = dispatcher()
        .handle(json!({ "type": "API_REQUEST", "endpoint": "/commute/durations", "method": "GET" }))
        .await;

    assert_eq!(reply, Some(json!({ "from": "get" })));
}

#[tokio::test]
async fn route_without_reply_stays_silent() {
    let reply = dispatcher()
        .handle(json!({ "type": "API_REQUEST", "endpoint": "/commute/silent", "method": "GET" }))
        .await;

    assert_eq!(reply, None);
}

#[tokio::test]
async fn unmatched_request_gets_failure_envelope() {
    let reply = dispatcher()
        .handle(json!({ "type": "API_REQUEST", "endpoint": "/nowhere", "method": "DELETE" }))
        .await;

    assert_eq!(
        reply,
        Some(json!({ "data": null, "error": "No route for DELETE /nowhere" }))
    );
}

#[tokio::test]
async fn non_api_messages_are_ignored() {
    let reply = dispatcher().handle(json!({ "type": "PING" })).await;

    assert_eq!(reply, None);
}
