// dashboard-client/src/client/dispatcher.rs
// Request dispatch: auth guard, mode selection, failover, outcome classification

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::Value;
use std::sync::Arc;

use shared::response::ApiResponse;

use super::transport::{Transport, TransportError, TransportRequest, TransportResponse};
use crate::config::ClientConfig;
use crate::events::{EventBus, SessionEvent};
use crate::mock::MockEngine;
use crate::mode::ModeSelector;
use crate::operation::{Body, Operation};
use crate::session::Session;
use crate::{ClientError, ClientResult, token};

/// Routes callable without a bearer token (query string ignored)
pub const PUBLIC_ROUTES: &[&str] = &[
    "/login",
    "/auth/login",
    "/logout",
    "/auth/register",
    "/auth/captcha",
    "/auth/reset-password/code",
    "/auth/reset-password",
    "/users/reset-password",
];

pub fn is_public(route: &str) -> bool {
    PUBLIC_ROUTES.contains(&route)
}

/// Executes [`Operation`]s against the live API or the mock engine
pub struct Dispatcher {
    config: ClientConfig,
    session: Session,
    mode: Arc<ModeSelector>,
    events: EventBus,
    transport: Arc<dyn Transport>,
    mock: MockEngine,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.config.base_url)
            .field("mode", &self.mode.current())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        config: ClientConfig,
        session: Session,
        mode: Arc<ModeSelector>,
        events: EventBus,
        transport: Arc<dyn Transport>,
        mock: MockEngine,
    ) -> Self {
        Self {
            config,
            session,
            mode,
            events,
            transport,
            mock,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> &ModeSelector {
        &self.mode
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Dispatch one operation and normalize the outcome into an envelope
    pub async fn dispatch(&self, op: &Operation) -> ClientResult<ApiResponse<Value>> {
        let token = self.session.reconcile().await?;

        if token.is_none() && !is_public(op.route()) {
            tracing::debug!(operation = %op, "No token for protected route");
            self.expire(op).await?;
            return Err(ClientError::Unauthorized);
        }

        if self.mode.should_use_mock() {
            tracing::debug!(operation = %op, "Dispatching to mock engine");
            return match self.mock.simulate(op).await? {
                Some(body) => self.accept(body).await,
                None => Ok(ApiResponse::empty()),
            };
        }

        let request = self.build_request(op, token.as_deref())?;
        tracing::debug!(operation = %op, url = %request.url, "Dispatching to live API");

        let response = match self.send(request).await {
            Ok(response) => response,
            Err(err) => return self.fail_over(op, err).await,
        };

        self.classify(op, response).await
    }

    /// Probe `<base>/health` and record connectivity
    pub async fn health_check(&self) -> bool {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let request = TransportRequest {
            method: http::Method::GET,
            url: self.config.url_for("/health"),
            headers,
            body: None,
        };
        let online = match self.send(request).await {
            Ok(response) => response.status.is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "Health probe failed");
                false
            }
        };
        self.mode.set_online(online);
        online
    }

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        match tokio::time::timeout(self.config.timeout, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        }
    }

    fn build_request(&self, op: &Operation, token: Option<&str>) -> ClientResult<TransportRequest> {
        let mut headers = HeaderMap::new();
        if !matches!(op.body(), Some(Body::Upload(_))) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::Config(format!("invalid token header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in op.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Config(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Config(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        Ok(TransportRequest {
            method: op.method().clone(),
            url: self.config.url_for(&op.uri()?),
            headers,
            body: op.body().cloned(),
        })
    }

    /// Sticky switch to mock, then one retry against the mock engine
    async fn fail_over(
        &self,
        op: &Operation,
        err: TransportError,
    ) -> ClientResult<ApiResponse<Value>> {
        self.mode.degrade(&err.to_string());
        match self.mock.simulate(op).await? {
            Some(body) => self.accept(body).await,
            None => {
                tracing::warn!(operation = %op, error = %err, "No mock route for failed request");
                Err(err.into())
            }
        }
    }

    async fn classify(
        &self,
        op: &Operation,
        response: TransportResponse,
    ) -> ClientResult<ApiResponse<Value>> {
        let status = response.status;
        let body = parse_body(&response.body);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(operation = %op, %status, "Session rejected by server");
            self.expire(op).await?;
            return Err(ClientError::SessionExpired);
        }

        if !status.is_success() {
            // Some backends rotate tokens on error responses as well
            self.absorb_token(&body).await?;
            let message = extract_error_message(&body, status);
            tracing::debug!(operation = %op, %status, %message, "Live request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        self.accept(body).await
    }

    async fn accept(&self, body: Value) -> ClientResult<ApiResponse<Value>> {
        self.absorb_token(&body).await?;
        Ok(ApiResponse::from_body(body))
    }

    async fn absorb_token(&self, body: &Value) -> ClientResult<()> {
        let Some(found) = token::extract(body) else {
            return Ok(());
        };
        if self.session.token().await.as_deref() != Some(found) {
            self.session.set_token(found).await?;
            tracing::info!("Session token updated from response");
            self.events.emit(SessionEvent::TokenRotated);
        }
        Ok(())
    }

    async fn expire(&self, op: &Operation) -> ClientResult<()> {
        self.session.clear().await?;
        self.events.emit(SessionEvent::Expired {
            path: op.route().to_string(),
        });
        Ok(())
    }
}

/// Empty bodies read as null, non-JSON bodies as a string
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Human-readable message of an error body
pub fn extract_error_message(body: &Value, status: StatusCode) -> String {
    let found = match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(obj) => {
            if let Some(Value::String(message)) = obj.get("message") {
                Some(message.clone())
            } else if let Some(error) = obj.get("error").filter(|e| !e.is_null()) {
                Some(match error {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            } else if let Some(Value::String(msg)) = obj.get("msg") {
                Some(msg.clone())
            } else {
                None
            }
        }
        _ => None,
    };
    found.unwrap_or_else(|| {
        format!(
            "Request failed with status {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_public_routes() {
        assert!(is_public("/login"));
        assert!(is_public("/auth/captcha"));
        assert!(!is_public("/projects"));
        assert!(!is_public("/auth/info"));
    }

    #[test]
    fn test_error_message_precedence() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(extract_error_message(&json!("plain"), status), "plain");
        assert_eq!(
            extract_error_message(&json!({"message": "m", "error": "e"}), status),
            "m"
        );
        assert_eq!(extract_error_message(&json!({"error": "e", "msg": "x"}), status), "e");
        assert_eq!(
            extract_error_message(&json!({"error": {"field": "name"}}), status),
            r#"{"field":"name"}"#
        );
        assert_eq!(extract_error_message(&json!({"msg": "x"}), status), "x");
        assert_eq!(
            extract_error_message(&Value::Null, StatusCode::INTERNAL_SERVER_ERROR),
            "Request failed with status 500 Internal Server Error"
        );
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b""), Value::Null);
        assert_eq!(parse_body(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(parse_body(b"<html>"), json!("<html>"));
    }
}
