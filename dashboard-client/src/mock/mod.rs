//! Mock engine
//!
//! An in-process simulation of every dashboard endpoint. Requests are routed
//! through an axum [`Router`] with tower's `oneshot`, so handlers are plain
//! typed axum handlers and the routing table is explicit.

mod analytics;
mod auth;
mod departments;
mod projects;
pub mod router;
pub mod seed;
mod state;
mod team;
mod uploads;
mod users;

use axum::Router;
use axum::body::Body;
use http::{Request, header};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use shared::error::ErrorBody;

use crate::operation::Operation;
use crate::storage::KeyValueStore;
use crate::{ClientError, ClientResult};

pub use state::MockState;

/// Answers operations from the simulated backend
#[derive(Clone)]
pub struct MockEngine {
    router: Router,
    delay: Duration,
}

impl std::fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEngine")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl MockEngine {
    pub fn new(store: Arc<dyn KeyValueStore>, delay: Duration) -> Self {
        let state = Arc::new(MockState::new(store));
        Self {
            router: router::build(state),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Simulate one operation after the artificial latency
    ///
    /// Returns the raw response body, `Ok(None)` when no route matches, and
    /// `ClientError::Api` for domain errors raised by a handler.
    pub async fn simulate(&self, op: &Operation) -> ClientResult<Option<Value>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let body = match op.mock_body()? {
            Some(bytes) => Body::from(bytes),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(op.method().clone())
            .uri(op.uri()?)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::InvalidResponse(format!("invalid mock request: {e}")))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        if router::is_unrouted(&response) {
            tracing::debug!(operation = %op, "No mock route");
            return Ok(None);
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to read mock body: {e}")))?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_slice::<ErrorBody>(&bytes) {
                tracing::debug!(operation = %op, code = %body.code, "Mock domain error");
                return Err(ClientError::Api {
                    code: body.code,
                    message: body.message,
                });
            }
            // Extractor rejections (malformed JSON and the like) are plain text
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.is_empty() {
            return Ok(Some(Value::Null));
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use shared::error::ErrorCode;

    fn engine() -> MockEngine {
        MockEngine::new(Arc::new(MemoryStore::new()), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_unrouted_is_none() {
        let engine = engine();
        let result = engine.simulate(&Operation::get("/nowhere")).await.unwrap();
        assert!(result.is_none());

        // Known path, unsupported method
        let result = engine.simulate(&Operation::put("/projects")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_domain_error_is_api() {
        let engine = engine();
        let err = engine
            .simulate(&Operation::delete("/users/1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api {
                code: ErrorCode::CannotDeleteAdmin,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_static_routes_beat_parameters() {
        let engine = engine();
        let body = engine
            .simulate(&Operation::get("/projects/statistics/comprehensive"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["totalProjects"], 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_applied() {
        let engine = MockEngine::new(Arc::new(MemoryStore::new()), Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        engine.simulate(&Operation::get("/team-members")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
