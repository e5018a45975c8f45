//! Route table of the mock world

use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::state::MockState;
use super::{analytics, auth, departments, projects, team, uploads, users};

/// Response header marking a request no mock route matched
pub const ROUTE_HEADER: &str = "x-mock-route";

/// Build the complete mock router
pub fn build(state: Arc<MockState>) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(projects::router())
        .merge(team::router())
        .merge(users::router())
        .merge(uploads::router())
        .merge(departments::router())
        .merge(analytics::router())
        .fallback(unrouted)
        .with_state(state)
}

async fn unrouted() -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    response
        .headers_mut()
        .insert(ROUTE_HEADER, HeaderValue::from_static("none"));
    response
}

/// Whether a router response means "no such endpoint"
pub fn is_unrouted(response: &Response) -> bool {
    response.status() == StatusCode::METHOD_NOT_ALLOWED
        || response
            .headers()
            .get(ROUTE_HEADER)
            .is_some_and(|v| v == "none")
}
