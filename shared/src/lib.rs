//! Shared types for the project dashboard
//!
//! Wire contract used by both the live backend and the in-process mock
//! engine: response envelope, error vocabulary, auth DTOs and entity models.

pub mod client;
pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::{ApiResponse, Page};
