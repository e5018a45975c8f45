// dashboard-client/tests/dispatcher.rs
// Dispatch behaviour against a scripted transport

mod common;

use serde_json::json;
use std::sync::Arc;

use common::{Reply, StubTransport, live_client, mock_client, store_with_token};
use dashboard_client::storage::{AUTH_TOKEN_KEY, USER_INFO_KEY};
use dashboard_client::{
    ClientError, KeyValueStore, MemoryStore, Mode, Operation, SessionEvent, Upload,
};
use shared::client::ResetPasswordRequest;
use shared::models::ProjectQuery;

#[tokio::test]
async fn test_mock_mode_never_touches_transport() {
    let (client, transport) = mock_client();

    client.captcha().await.unwrap();
    let login = Operation::post("/auth/login")
        .json(&json!({"username": "admin", "password": "password"}))
        .unwrap();
    client.dispatch(&login).await.unwrap();
    client.projects(&ProjectQuery::default()).await.unwrap();
    client.team_members().await.unwrap();
    client.departments().await.unwrap();

    assert_eq!(transport.calls(), 0);
    assert_eq!(client.mode(), Mode::Mock);
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let transport = StubTransport::new(Reply::Json(200, json!([])));
    let store = Arc::new(MemoryStore::new());
    store.set(USER_INFO_KEY, r#"{"id":"1"}"#).unwrap();
    let client = live_client(transport.clone(), store.clone());
    let mut events = client.subscribe();

    let err = client.dispatch(&Operation::get("/projects")).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(transport.calls(), 0);
    assert_eq!(store.get(USER_INFO_KEY).unwrap(), None);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Expired {
            path: "/projects".into()
        }
    );
}

#[tokio::test]
async fn test_public_route_ignores_query_string() {
    let transport = StubTransport::new(Reply::Json(200, json!({"success": true})));
    let client = live_client(transport.clone(), Arc::new(MemoryStore::new()));

    client
        .dispatch(&Operation::get("/auth/captcha?t=123"))
        .await
        .unwrap();
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_nested_access_token_is_adopted() {
    let transport = StubTransport::new(Reply::Json(200, json!({"data": {"accessToken": "X"}})));
    let store = Arc::new(MemoryStore::new());
    let client = live_client(transport, store.clone());
    let mut events = client.subscribe();

    let envelope = client.dispatch(&Operation::post("/login")).await.unwrap();

    assert!(envelope.success);
    assert_eq!(client.session().token().await.as_deref(), Some("X"));
    assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("X"));
    assert_eq!(events.try_recv().unwrap(), SessionEvent::TokenRotated);
}

#[tokio::test]
async fn test_same_token_is_not_rotated() {
    let transport = StubTransport::new(Reply::Json(200, json!({"token": "abc", "data": []})));
    let client = live_client(transport, store_with_token("abc"));
    let mut events = client.subscribe();

    client.dispatch(&Operation::get("/projects")).await.unwrap();
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_live_request_headers() {
    let transport = StubTransport::new(Reply::Json(200, json!([])));
    let client = live_client(transport.clone(), store_with_token("t-1"));

    client
        .dispatch(
            &Operation::get("/users/page")
                .query("page", 0)
                .query("size", 10)
                .header("X-Trace", "abc"),
        )
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "http://dashboard.test/api/users/page?page=0&size=10");
    assert_eq!(request.headers["authorization"], "Bearer t-1");
    assert_eq!(request.headers["x-requested-with"], "XMLHttpRequest");
    assert_eq!(request.headers["accept"], "application/json");
    assert_eq!(request.headers["content-type"], "application/json");
    assert_eq!(request.headers["x-trace"], "abc");
}

#[tokio::test]
async fn test_default_project_query_sends_page_size() {
    let transport = StubTransport::new(Reply::Json(200, json!([])));
    let client = live_client(transport.clone(), store_with_token("t-1"));

    client.projects(&ProjectQuery::default()).await.unwrap();

    assert_eq!(
        transport.last_request().unwrap().url,
        "http://dashboard.test/api/projects?page=0&size=10"
    );
}

#[tokio::test]
async fn test_reset_password_uses_users_endpoint() {
    let transport = StubTransport::new(Reply::Json(200, json!({"success": true})));
    let client = live_client(transport.clone(), Arc::new(MemoryStore::new()));

    let req = ResetPasswordRequest {
        username: Some("admin".into()),
        new_password: "newpass1".into(),
        ..Default::default()
    };
    assert!(client.reset_password(&req).await.unwrap().success);

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "http://dashboard.test/api/users/reset-password");
    assert!(request.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_fetched_user_info_is_cached() {
    let profile = json!({
        "id": "7",
        "username": "grace",
        "name": "Grace",
        "email": "grace@example.com",
        "role": "user"
    });
    let transport = StubTransport::new(Reply::Json(200, json!({"success": true, "data": profile})));
    let store = store_with_token("t-1");
    store.set(USER_INFO_KEY, r#"{"id":"1","username":"admin","role":"admin"}"#).unwrap();
    let client = live_client(transport, store);

    let info = client.user_info().await.unwrap();

    assert_eq!(info.username, "grace");
    assert_eq!(client.session().user_info().unwrap(), Some(info));
}

#[tokio::test]
async fn test_upload_omits_json_content_type() {
    let transport = StubTransport::new(Reply::Json(200, json!({"success": true})));
    let client = live_client(transport.clone(), store_with_token("t-1"));

    client
        .upload(Upload::file("me.png", vec![1, 2, 3]).with_content_type("image/png"))
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert!(request.headers.get("content-type").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_timeout_fails_over_and_sticks() {
    let transport = StubTransport::new(Reply::Hang);
    let client = live_client(transport.clone(), store_with_token("t-1"));
    let mut events = client.subscribe();

    let first = client.projects(&ProjectQuery::default()).await.unwrap();
    assert_eq!(first.data.unwrap().len(), 5);
    assert_eq!(transport.calls(), 1);
    assert_eq!(client.mode(), Mode::Mock);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::ModeChanged { mode: Mode::Mock }
    );

    // Stays in mock mode even though the backend would now answer
    transport.set_reply(Reply::Json(200, json!([])));
    let second = client.projects(&ProjectQuery::default()).await.unwrap();
    assert_eq!(second.data.unwrap().len(), 5);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_network_error_fails_over() {
    let transport = StubTransport::new(Reply::Refused);
    let client = live_client(transport.clone(), store_with_token("t-1"));

    let members = client.team_members().await.unwrap();
    assert_eq!(members.data.unwrap().len(), 7);
    assert_eq!(client.mode(), Mode::Mock);
}

#[tokio::test]
async fn test_failover_without_mock_route_surfaces_transport_error() {
    let transport = StubTransport::new(Reply::Refused);
    let client = live_client(transport, store_with_token("t-1"));

    let err = client
        .dispatch(&Operation::get("/reports/export"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(client.mode(), Mode::Mock);

    // Already in mock mode: unknown routes yield an empty envelope
    let envelope = client
        .dispatch(&Operation::get("/reports/export"))
        .await
        .unwrap();
    assert!(envelope.success);
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn test_try_reconnect_returns_to_live() {
    let transport = StubTransport::new(Reply::Refused);
    let client = live_client(transport.clone(), store_with_token("t-1"));

    client.team_members().await.unwrap();
    assert_eq!(client.mode(), Mode::Mock);

    transport.set_reply(Reply::Json(200, json!([])));
    client.try_reconnect();
    assert_eq!(client.mode(), Mode::Live);

    let members = client.team_members().await.unwrap();
    assert_eq!(members.data.unwrap().len(), 0);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_unauthorized_response_clears_session() {
    for status in [401, 403] {
        let transport = StubTransport::new(Reply::Json(status, json!({"message": "expired"})));
        let store = store_with_token("stale");
        store.set(USER_INFO_KEY, r#"{"id":"1"}"#).unwrap();
        let client = live_client(transport, store.clone());
        let mut events = client.subscribe();

        let err = client.users().await.unwrap_err();

        assert!(matches!(err, ClientError::SessionExpired));
        assert!(client.session().token().await.is_none());
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_INFO_KEY).unwrap(), None);
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::Expired {
                path: "/users".into()
            }
        );
    }
}

#[tokio::test]
async fn test_http_error_message_extraction() {
    let transport = StubTransport::new(Reply::Json(422, json!({"error": "name taken"})));
    let client = live_client(transport.clone(), store_with_token("t-1"));

    let err = client.departments().await.unwrap_err();
    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "name taken");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    transport.set_reply(Reply::Raw(500, "upstream exploded"));
    let err = client.departments().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500: upstream exploded");
    // Errors with a response never trigger failover
    assert_eq!(client.mode(), Mode::Live);
}

#[tokio::test]
async fn test_plain_body_is_wrapped_in_envelope() {
    let transport = StubTransport::new(Reply::Json(200, json!([{"id": "1"}])));
    let client = live_client(transport, store_with_token("t-1"));

    let envelope = client.dispatch(&Operation::get("/projects")).await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.data.unwrap(), json!([{"id": "1"}]));
}

#[tokio::test]
async fn test_storage_wins_over_memory() {
    let transport = StubTransport::new(Reply::Json(200, json!([])));
    let store = store_with_token("old");
    let client = live_client(transport.clone(), store.clone());

    // Another tab signed out
    store.remove(AUTH_TOKEN_KEY).unwrap();
    let err = client.users().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    // Another tab signed in
    store.set(AUTH_TOKEN_KEY, "fresh").unwrap();
    client.users().await.unwrap();
    let request = transport.last_request().unwrap();
    assert_eq!(request.headers["authorization"], "Bearer fresh");
}

#[tokio::test]
async fn test_logout_succeeds_when_remote_fails() {
    let transport = StubTransport::new(Reply::Json(500, json!({"message": "down"})));
    let store = store_with_token("t-1");
    let client = live_client(transport, store.clone());

    client.logout().await.unwrap();
    assert!(client.session().token().await.is_none());
    assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_health_check_updates_connectivity() {
    let transport = StubTransport::new(Reply::Refused);
    let client = live_client(transport.clone(), store_with_token("t-1"));

    assert!(!client.health_check().await);
    assert_eq!(client.mode(), Mode::Mock);

    transport.set_reply(Reply::Json(200, json!({"status": "ok"})));
    assert!(client.health_check().await);
    assert_eq!(client.mode(), Mode::Live);
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://dashboard.test/api/health"
    );
}

#[tokio::test]
async fn test_operator_toggles() {
    let transport = StubTransport::new(Reply::Json(200, json!([])));
    let client = live_client(transport.clone(), store_with_token("t-1"));

    client.enable_mock();
    client.users().await.unwrap();
    assert_eq!(transport.calls(), 0);

    client.enable_live();
    client.users().await.unwrap();
    assert_eq!(transport.calls(), 1);
}
