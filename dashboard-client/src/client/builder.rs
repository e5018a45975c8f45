//! Builder for [`DashboardClient`] construction.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::events::EventBus;
use crate::mock::MockEngine;
use crate::mode::ModeSelector;
use crate::session::Session;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

use super::DashboardClient;
use super::dispatcher::Dispatcher;
use super::transport::{ReqwestTransport, Transport};

/// Builder for [`DashboardClient`].
///
/// # Example
///
/// ```no_run
/// use dashboard_client::{ClientConfig, DashboardClient};
///
/// let client = DashboardClient::builder()
///     .config(ClientConfig::new("http://localhost:8080/api").with_mock(true))
///     .build();
/// ```
#[derive(Default)]
pub struct DashboardClientBuilder {
    config: Option<ClientConfig>,
    store: Option<Arc<dyn KeyValueStore>>,
    transport: Option<Arc<dyn Transport>>,
}

impl DashboardClientBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the durable store shared by the session and the mock engine.
    ///
    /// Overrides `ClientConfig::storage_path`.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the reqwest transport (tests, custom TLS setups).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> DashboardClient {
        let config = self.config.unwrap_or_default();

        let store: Arc<dyn KeyValueStore> = match (self.store, &config.storage_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Arc::new(FileStore::new(path.clone())),
            (None, None) => Arc::new(MemoryStore::new()),
        };
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()));

        let events = EventBus::new();
        let mode = Arc::new(ModeSelector::new(config.use_mock, events.clone()));
        let session = Session::new(store.clone());
        let mock = MockEngine::new(store, config.mock_delay);

        tracing::info!(
            base_url = %config.base_url,
            use_mock = config.use_mock,
            persistent = config.storage_path.is_some(),
            "Dashboard client created"
        );

        DashboardClient {
            dispatcher: Arc::new(Dispatcher::new(
                config, session, mode, events, transport, mock,
            )),
        }
    }
}
