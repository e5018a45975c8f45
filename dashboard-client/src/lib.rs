//! Dashboard Client - API access layer for the project dashboard
//!
//! Dispatches typed API operations to the live backend, falls back to an
//! in-process mock engine when the backend is unreachable, and keeps the
//! bearer-token session in durable storage.

pub mod captcha;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod mock;
pub mod mode;
pub mod operation;
pub mod session;
pub mod storage;
pub mod token;

pub use client::{DashboardClient, DashboardClientBuilder, Transport};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use events::{EventBus, SessionEvent};
pub use mode::Mode;
pub use operation::{Operation, Upload};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use shared::response::ApiResponse;
