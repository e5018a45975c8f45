//! Team roster endpoints

use axum::{Json, Router, extract::Query, routing::get};
use serde::Deserialize;
use std::sync::Arc;

use shared::models::TeamMember;
use shared::response::{ApiResponse, Page};

use super::seed;
use super::state::MockState;

pub fn router() -> Router<Arc<MockState>> {
    Router::new()
        .route("/team-members", get(list))
        .route("/users/page", get(page))
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default)]
    page: u32,
    #[serde(default = "default_size")]
    size: u32,
}

fn default_size() -> u32 {
    10
}

/// GET /team-members
async fn list() -> Json<ApiResponse<Vec<TeamMember>>> {
    Json(ApiResponse::ok(seed::team_members()))
}

/// GET /users/page?page&size - paged roster
async fn page(Query(params): Query<PageParams>) -> Json<ApiResponse<Page<TeamMember>>> {
    let members = seed::team_members();
    Json(ApiResponse::ok(Page::slice(
        &members,
        params.page,
        params.size,
    )))
}
