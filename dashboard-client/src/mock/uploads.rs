//! Avatar and file upload endpoints
//!
//! The dispatcher hands uploads to the mock router as a JSON manifest
//! (`filename`, `size`, ...) instead of multipart bytes.

use axum::{
    Json, Router,
    body::Bytes,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use shared::models::{AvatarResponse, UploadResponse};
use shared::response::ApiResponse;

use super::seed;
use super::state::MockState;

pub fn router() -> Router<Arc<MockState>> {
    Router::new()
        .route("/users/{id}/avatar", post(upload_avatar))
        .route("/users/avatar", post(upload_avatar))
        .route("/users/default-avatar", get(default_avatar))
        .route("/upload", post(upload))
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    size: u64,
}

fn manifest(body: &Bytes) -> Manifest {
    serde_json::from_slice(body).unwrap_or_default()
}

/// POST /users/{id}/avatar
async fn upload_avatar() -> Json<ApiResponse<AvatarResponse>> {
    Json(ApiResponse::ok_with_message(
        AvatarResponse {
            avatar: seed::UPLOADED_AVATAR_URL.into(),
        },
        "Avatar uploaded",
    ))
}

/// GET /users/default-avatar
async fn default_avatar() -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok(seed::DEFAULT_AVATAR_URL.to_string()))
}

/// POST /upload - echo the uploaded file's name
async fn upload(body: Bytes) -> Json<ApiResponse<UploadResponse>> {
    let manifest = manifest(&body);
    let filename = manifest
        .filename
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "avatar.jpg".to_string());
    Json(ApiResponse::ok(UploadResponse {
        url: format!("{}/{}", seed::UPLOAD_BASE_URL, filename),
        filename,
        size: manifest.size,
    }))
}
