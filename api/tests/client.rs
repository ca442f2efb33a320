// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Client integration tests with wiremock.

use serde_json::json;
use tempo_api::{
    ApiClient, ApiConfig, ApiError, CreateTimeblock, EventPatch, ListEventsQuery, TaskStatus,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: server.uri(),
        token: Some("test-token".to_string()),
        ..Default::default()
    })
    .expect("failed to create client")
}

fn utc(s: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&chrono::Utc)
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "statusCode": 200, "message": "OK", "data": data })
}

fn event_json(id: &str, start: &str, end: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Deep work",
        "startAt": start,
        "endAt": end,
        "allDay": false,
    })
}

#[tokio::test]
async fn list_events_sends_range_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("from", "2024-01-01T00:00:00.000Z"))
        .and(query_param("to", "2024-01-08T00:00:00.000Z"))
        .and(query_param("includeTask", "true"))
        .and(query_param("includeReminders", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            event_json("e1", "2024-01-01T09:00:00.000Z", "2024-01-01T10:00:00.000Z"),
        ]))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let events = client
        .list_events(&ListEventsQuery {
            from: utc("2024-01-01T00:00:00Z"),
            to: utc("2024-01-08T00:00:00Z"),
            include_task: true,
            include_reminders: true,
        })
        .await
        .expect("failed to list events");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, "e1");
    assert_eq!(events[0].start_at, utc("2024-01-01T09:00:00Z"));
}

#[tokio::test]
async fn create_timeblock_posts_exact_wire_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events/timeblocks"))
        .and(body_json(json!({
            "taskId": "t1",
            "startAt": "2024-01-01T09:00:00.000Z",
            "endAt": "2024-01-01T10:00:00.000Z",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(event_json(
            "e9",
            "2024-01-01T09:00:00.000Z",
            "2024-01-01T10:00:00.000Z",
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let event = client
        .create_timeblock(&CreateTimeblock {
            task_id: "t1".to_string(),
            start_at: utc("2024-01-01T09:00:00Z"),
            end_at: Some(utc("2024-01-01T10:00:00Z")),
            duration_minutes: None,
            reminder_minutes: None,
        })
        .await
        .expect("failed to create timeblock");

    assert_eq!(event.id, "e9");
}

#[tokio::test]
async fn rejection_carries_joined_envelope_message() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/events/e1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "statusCode": 400,
            "message": ["endAt must be after startAt", "startAt is required"],
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .update_event("e1", &EventPatch::reschedule(utc("2024-01-01T10:00:00Z"), None))
        .await
        .expect_err("expected rejection");

    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "endAt must be after startAt, startAt is required");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "statusCode": 401,
            "message": "Unauthorized",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .list_tasks(&tempo_api::ListTasksQuery::with_status(TaskStatus::Todo))
        .await
        .expect_err("expected session expiry");

    assert!(err.is_session_expired());
}

#[tokio::test]
async fn mark_linked_task_done_hits_dedicated_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/events/e1/linked-task/done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "success": true,
            "event": event_json("e1", "2024-01-01T09:00:00.000Z", "2024-01-01T10:00:00.000Z"),
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let done = client
        .mark_linked_task_done("e1")
        .await
        .expect("failed to mark linked task done");

    assert!(done.success);
    assert_eq!(done.event.id, "e1");
}

#[tokio::test]
async fn delete_event_returns_acknowledgement() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/events/e1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "success": true }))),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ack = client.delete_event("e1").await.expect("failed to delete");
    assert!(ack.success);
}
