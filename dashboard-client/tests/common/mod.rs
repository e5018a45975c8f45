// dashboard-client/tests/common/mod.rs
// Shared test fixtures: a scripted transport and client constructors

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashboard_client::client::{TransportError, TransportRequest, TransportResponse};
use dashboard_client::{ClientConfig, DashboardClient, KeyValueStore, MemoryStore, Transport};
use http::StatusCode;

/// What the stub answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// Never answers; the dispatcher's timeout fires
    Hang,
    Refused,
    Json(u16, Value),
    Raw(u16, &'static str),
}

/// Transport that counts calls and records the last request
pub struct StubTransport {
    reply: Mutex<Reply>,
    calls: AtomicUsize,
    last: Mutex<Option<TransportRequest>>,
}

impl StubTransport {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Reply::Refused => Err(TransportError::Network("connection refused".into())),
            Reply::Json(status, body) => Ok(TransportResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: serde_json::to_vec(&body).unwrap(),
            }),
            Reply::Raw(status, body) => Ok(TransportResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.as_bytes().to_vec(),
            }),
        }
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::new("http://dashboard.test/api")
        .with_timeout(Duration::from_secs(2))
        .with_mock_delay(Duration::ZERO)
}

/// Live-mode client over the given transport and store
pub fn live_client(
    transport: Arc<StubTransport>,
    store: Arc<dyn KeyValueStore>,
) -> DashboardClient {
    DashboardClient::builder()
        .config(config())
        .store(store)
        .transport(transport)
        .build()
}

/// Mock-mode client whose transport must never be called
pub fn mock_client() -> (DashboardClient, Arc<StubTransport>) {
    let transport = StubTransport::new(Reply::Refused);
    let client = DashboardClient::builder()
        .config(config().with_mock(true))
        .store(Arc::new(MemoryStore::new()))
        .transport(transport.clone())
        .build();
    (client, transport)
}

/// Store holding a session token
pub fn store_with_token(token: &str) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.set("auth_token", token).unwrap();
    store
}
