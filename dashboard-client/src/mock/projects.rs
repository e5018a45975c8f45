//! Project endpoints of the mock world
//!
//! The portfolio is a fixed seed. Create/update/delete answer like the real
//! backend but never change what the next list returns.

use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Project, ProjectCreate, ProjectStatistics, ProjectStatus, ProjectUpdate};
use shared::response::ApiResponse;

use super::seed;
use super::state::MockState;

pub fn router() -> Router<Arc<MockState>> {
    Router::new()
        .route("/projects", get(list).post(create))
        .route("/projects/{id}", get(get_by_id).put(update).delete(delete))
        .route("/projects/statistics/comprehensive", get(statistics))
        .route("/project-statistics", get(statistics))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    status: Option<ProjectStatus>,
    keyword: Option<String>,
}

fn find(id: &str) -> AppResult<Project> {
    seed::projects()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::ProjectNotFound, format!("Project {} not found", id))
        })
}

/// GET /projects - seeded portfolio, optionally filtered
async fn list(Query(params): Query<ListParams>) -> Json<ApiResponse<Vec<Project>>> {
    let keyword = params
        .keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty());
    let projects = seed::projects()
        .into_iter()
        .filter(|p| params.status.is_none_or(|s| p.status == s))
        .filter(|p| {
            keyword.as_ref().is_none_or(|k| {
                p.name.to_lowercase().contains(k) || p.manager.to_lowercase().contains(k)
            })
        })
        .collect();
    Json(ApiResponse::ok(projects))
}

/// GET /projects/{id} - project, or no data for an unknown id
async fn get_by_id(Path(id): Path<String>) -> Json<ApiResponse<Project>> {
    match find(&id) {
        Ok(project) => Json(ApiResponse::ok(project)),
        Err(_) => Json(ApiResponse::empty()),
    }
}

/// POST /projects - echo the new project with the next id
async fn create(Json(payload): Json<ProjectCreate>) -> AppResult<Json<ApiResponse<Project>>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Project name is required").with_detail("field", "name"));
    }
    let id = (seed::projects().len() + 1).to_string();
    let project = Project {
        id,
        name: payload.name,
        manager: payload.manager,
        progress: payload.progress.unwrap_or(0).min(100),
        status: payload.status.unwrap_or(ProjectStatus::Planned),
        deadline: payload.deadline,
        description: payload.description,
        team: payload.team,
        budget: payload.budget.unwrap_or(0),
        spent: 0,
        start_date: payload.start_date,
        avatar: Some(seed::PROJECT_AVATAR.into()),
    };
    Ok(Json(ApiResponse::ok_with_message(project, "Project created")))
}

/// PUT /projects/{id} - merged project
async fn update(
    Path(id): Path<String>,
    Json(payload): Json<ProjectUpdate>,
) -> AppResult<Json<ApiResponse<Project>>> {
    let mut project = find(&id)?;
    project.apply(payload);
    Ok(Json(ApiResponse::ok_with_message(project, "Project updated")))
}

/// DELETE /projects/{id}
async fn delete(Path(id): Path<String>) -> AppResult<Json<ApiResponse<()>>> {
    find(&id)?;
    Ok(Json(ApiResponse::message("Project deleted")))
}

/// GET /project-statistics - computed from the portfolio
async fn statistics() -> Json<ApiResponse<ProjectStatistics>> {
    Json(ApiResponse::ok(ProjectStatistics::from_projects(
        &seed::projects(),
    )))
}
