//! Client module - dispatcher, transports and the typed API facade.

mod api;
mod builder;
pub mod dispatcher;
pub mod transport;

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

use shared::response::ApiResponse;

use crate::ClientResult;
use crate::config::ClientConfig;
use crate::events::SessionEvent;
use crate::mode::Mode;
use crate::operation::Operation;
use crate::session::Session;

pub use builder::DashboardClientBuilder;
pub use dispatcher::Dispatcher;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse};

/// Access layer handle
///
/// Cheap to clone; clones share the session, mode state and mock stores.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    dispatcher: Arc<Dispatcher>,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::new()
    }

    /// Client with the given configuration and the reqwest transport
    pub fn new(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    /// Effective mode for the next request
    pub fn mode(&self) -> Mode {
        self.dispatcher.mode().current()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.dispatcher.events().subscribe()
    }

    /// Dispatch a raw operation
    pub async fn dispatch(&self, op: &Operation) -> ClientResult<ApiResponse<Value>> {
        self.dispatcher.dispatch(op).await
    }

    /// Reset the sticky failover state; the next request tries the live API
    pub fn try_reconnect(&self) {
        self.dispatcher.mode().try_reconnect();
    }

    pub fn enable_mock(&self) {
        self.dispatcher.mode().enable_mock();
    }

    pub fn enable_live(&self) {
        self.dispatcher.mode().enable_live();
    }

    /// Probe the live API and update the connectivity flag
    pub async fn health_check(&self) -> bool {
        self.dispatcher.health_check().await
    }
}
