// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Planner reconciliation tests with wiremock.

use chrono::{DateTime, Utc};
use serde_json::json;
use tempo_api::{ApiConfig, ListTasksQuery, TaskStatus};
use tempo_core::{BufferedNotifier, DropOutcome, MoveOutcome, Planner, TaskDrop};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn planner_for(uri: &str) -> (Planner, BufferedNotifier) {
    let notifier = BufferedNotifier::new();
    let planner = Planner::new(
        ApiConfig {
            base_url: uri.to_string(),
            token: Some("test-token".to_string()),
            ..Default::default()
        },
        Box::new(notifier.handle()),
    )
    .expect("failed to create planner");
    (planner, notifier)
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

fn task_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Write report",
        "status": status,
        "priority": "MEDIUM",
        "pinned": false,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z",
    })
}

async fn mount_task_lists(server: &MockServer, todo: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("status", "TODO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(todo)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("status", "DOING"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn drop_persists_timeblock_and_never_renders_placeholder_twice() {
    let server = MockServer::start().await;

    mount_task_lists(&server, json!([task_json("t1", "TODO")])).await;

    // the exact wire body the drop must produce with a 60-minute hint
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

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([event_json(
            "e9",
            "2024-01-01T09:00:00.000Z",
            "2024-01-01T10:00:00.000Z",
        )]))))
        .mount(&server)
        .await;

    let (mut planner, _notifier) = planner_for(&server.uri());
    planner.set_visible_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));

    planner
        .refresh_tasks(ListTasksQuery::with_status(TaskStatus::Todo))
        .await;
    planner
        .refresh_tasks(ListTasksQuery::with_status(TaskStatus::Doing))
        .await;
    planner.sync_drag_sources().expect("failed to sync drag sources");

    let payload = planner.drag_payload("t1").expect("task not draggable").clone();
    assert_eq!(payload.duration, "01:00");

    let drop = planner.begin_drop(&payload, utc("2024-01-01T09:00:00Z"));
    assert!(planner.visible_events().iter().any(|e| e.provisional));

    let outcome = planner.receive_drop(drop).await;
    assert!(matches!(outcome, DropOutcome::Placed(_)));

    // placeholder gone before and after the authoritative refetch
    assert!(!planner.visible_events().iter().any(|e| e.provisional));
    assert!(planner.refresh_events().await);
    let rendered = planner.visible_events();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].id, "e9");
    assert!(!rendered[0].provisional);
}

#[tokio::test]
async fn malformed_drop_is_a_silent_no_op() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/events/timeblocks"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (mut planner, notifier) = planner_for(&server.uri());
    let outcome = planner
        .receive_drop(TaskDrop {
            placement: None,
            task_id: None,
            start_at: None,
            end_at: None,
        })
        .await;

    assert!(matches!(outcome, DropOutcome::Ignored));
    assert!(planner.visible_events().is_empty());
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn rejected_resize_reverts_to_pre_drag_times() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([event_json(
            "e1",
            "2024-01-01T10:00:00.000Z",
            "2024-01-01T11:00:00.000Z",
        )]))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/events/e1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "statusCode": 400,
            "message": "endAt overlaps another event",
        })))
        .mount(&server)
        .await;

    let (mut planner, notifier) = planner_for(&server.uri());
    planner.set_visible_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));
    assert!(planner.refresh_events().await);

    let outcome = planner
        .resize_event(
            "e1",
            utc("2024-01-01T10:00:00Z"),
            Some(utc("2024-01-01T11:30:00Z")),
        )
        .await;
    assert!(matches!(outcome, MoveOutcome::Reverted));

    // exact pre-drag times, straight from the untouched cache
    let rendered = planner.visible_events();
    assert_eq!(rendered.len(), 1, "cache must not be invalidated on failure");
    assert_eq!(rendered[0].start_at, utc("2024-01-01T10:00:00Z"));
    assert_eq!(rendered[0].end_at, utc("2024-01-01T11:00:00Z"));

    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn confirmed_move_invalidates_the_event_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([event_json(
            "e1",
            "2024-01-01T10:00:00.000Z",
            "2024-01-01T11:00:00.000Z",
        )]))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/events/e1"))
        .and(body_json(json!({
            "startAt": "2024-01-02T10:00:00.000Z",
            "endAt": "2024-01-02T11:00:00.000Z",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(event_json(
            "e1",
            "2024-01-02T10:00:00.000Z",
            "2024-01-02T11:00:00.000Z",
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let (mut planner, _notifier) = planner_for(&server.uri());
    planner.set_visible_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));
    assert!(planner.refresh_events().await);

    let outcome = planner
        .move_event(
            "e1",
            utc("2024-01-02T10:00:00Z"),
            Some(utc("2024-01-02T11:00:00Z")),
        )
        .await;
    assert!(matches!(outcome, MoveOutcome::Confirmed(_)));

    // invalidated: nothing rendered until the refetch lands
    assert!(planner.visible_events().is_empty());
    assert!(planner.refresh_events().await);
    assert_eq!(planner.visible_events().len(), 1);
}

#[tokio::test]
async fn marking_linked_task_done_refetches_events_and_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([event_json(
            "e1",
            "2024-01-01T10:00:00.000Z",
            "2024-01-01T11:00:00.000Z",
        )]))))
        .mount(&server)
        .await;
    mount_task_lists(&server, json!([task_json("t1", "TODO")])).await;

    Mock::given(method("PATCH"))
        .and(path("/events/e1/linked-task/done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "success": true,
            "event": event_json("e1", "2024-01-01T10:00:00.000Z", "2024-01-01T11:00:00.000Z"),
        }))))
        .mount(&server)
        .await;

    let (mut planner, _notifier) = planner_for(&server.uri());
    planner.set_visible_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));
    assert!(planner.refresh_events().await);
    let todo = ListTasksQuery::with_status(TaskStatus::Todo);
    assert!(planner.refresh_tasks(todo.clone()).await);

    let outcome = planner.mark_linked_task_done("e1").await;
    assert!(matches!(outcome, tempo_core::CompleteOutcome::Completed(_)));

    // the one cross-entity coupling: both stores must refetch
    assert!(planner.visible_events().is_empty());
    assert!(planner.tasks(&todo).is_none());
}

#[tokio::test]
async fn late_fetch_for_a_previous_week_does_not_overwrite_the_view() {
    // no server: drive the fetch protocol by hand
    let (mut planner, _notifier) = planner_for("http://backend.invalid");

    planner.set_visible_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));
    let fetch_a = planner.begin_events_fetch().unwrap();

    planner.set_visible_window(utc("2024-01-08T00:00:00Z"), utc("2024-01-15T00:00:00Z"));
    let fetch_b = planner.begin_events_fetch().unwrap();
    planner.complete_events_fetch(
        fetch_b,
        vec![serde_json::from_value(event_json(
            "week-b",
            "2024-01-08T09:00:00.000Z",
            "2024-01-08T10:00:00.000Z",
        ))
        .unwrap()],
    );

    // week A resolves late, under its own key
    planner.complete_events_fetch(
        fetch_a,
        vec![serde_json::from_value(event_json(
            "week-a",
            "2024-01-01T09:00:00.000Z",
            "2024-01-01T10:00:00.000Z",
        ))
        .unwrap()],
    );

    let rendered = planner.visible_events();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].id, "week-b");
}

#[tokio::test]
async fn unauthorized_latches_session_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (mut planner, notifier) = planner_for(&server.uri());
    planner.set_visible_window(utc("2024-01-01T00:00:00Z"), utc("2024-01-08T00:00:00Z"));
    assert!(!planner.refresh_events().await);

    assert!(planner.session_expired());
    assert_eq!(
        notifier.messages(),
        vec!["Session expired, please log in again".to_string()]
    );
}

#[tokio::test]
async fn drag_adapter_is_rebuilt_only_on_identity_change() {
    let server = MockServer::start().await;
    mount_task_lists(&server, json!([task_json("t1", "TODO")])).await;

    let (mut planner, _notifier) = planner_for(&server.uri());
    planner
        .refresh_tasks(ListTasksQuery::with_status(TaskStatus::Todo))
        .await;
    planner
        .refresh_tasks(ListTasksQuery::with_status(TaskStatus::Doing))
        .await;

    planner.sync_drag_sources().unwrap();
    assert_eq!(planner.drag_payloads().len(), 1);

    // same collection: keeping the adapter is fine, no release needed
    planner.sync_drag_sources().unwrap();
    assert_eq!(planner.drag_payloads().len(), 1);

    // task set changes identity: previous adapter is released, successor built
    server.reset().await;
    mount_task_lists(
        &server,
        json!([task_json("t1", "TODO"), task_json("t2", "TODO")]),
    )
    .await;
    planner
        .refresh_tasks(ListTasksQuery::with_status(TaskStatus::Todo))
        .await;
    planner
        .refresh_tasks(ListTasksQuery::with_status(TaskStatus::Doing))
        .await;

    planner.sync_drag_sources().unwrap();
    assert_eq!(planner.drag_payloads().len(), 2);
}

#[tokio::test]
async fn archiving_a_project_refetches_tasks() {
    let server = MockServer::start().await;

    mount_task_lists(&server, json!([task_json("t1", "TODO")])).await;
    Mock::given(method("PATCH"))
        .and(path("/projects/p1/archive"))
        .and(body_json(json!({ "archived": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "p1",
            "name": "Inbox",
            "archivedAt": "2024-01-02T00:00:00.000Z",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-02T00:00:00.000Z",
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let (mut planner, _notifier) = planner_for(&server.uri());
    let query = ListTasksQuery::with_status(TaskStatus::Todo);
    planner.refresh_tasks(query.clone()).await;
    assert!(planner.tasks(&query).is_some());

    let project = planner.set_project_archived("p1", true).await.unwrap();
    assert!(project.archived_at.is_some());

    // cached task rows carry project data, so the list must be refetched
    assert!(planner.tasks(&query).is_none());
}
