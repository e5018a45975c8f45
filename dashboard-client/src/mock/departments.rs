//! Department store endpoints
//!
//! Manager and member entries are snapshots copied at write time. Renaming
//! the referenced person later does not touch existing departments.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use std::sync::Arc;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, DepartmentCreate, DepartmentUpdate, MemberSnapshot, User};
use shared::response::ApiResponse;

use super::seed;
use super::state::MockState;

pub fn router() -> Router<Arc<MockState>> {
    Router::new()
        .route("/departments", get(list).post(create))
        .route("/departments/{id}", get(get_by_id).put(update).delete(delete))
}

fn not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::DepartmentNotFound,
        format!("Department {} not found", id),
    )
}

/// Snapshot of a manager: team roster first, then the user store
fn resolve_manager(manager_id: &str, users: &[User]) -> Option<MemberSnapshot> {
    if manager_id.is_empty() {
        return None;
    }
    seed::roster_snapshot(manager_id).or_else(|| {
        users
            .iter()
            .find(|u| u.id == manager_id)
            .map(|u| MemberSnapshot {
                id: u.id.clone(),
                name: u.name.clone(),
                position: u.role.clone(),
            })
    })
}

/// GET /departments
async fn list(
    State(state): State<Arc<MockState>>,
) -> AppResult<Json<ApiResponse<Vec<Department>>>> {
    Ok(Json(ApiResponse::ok(state.departments().await?)))
}

/// GET /departments/{id} - department, or no data for an unknown id
async fn get_by_id(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let department = state.departments().await?.into_iter().find(|d| d.id == id);
    Ok(Json(match department {
        Some(d) => ApiResponse::ok(d),
        None => ApiResponse::empty(),
    }))
}

/// POST /departments
async fn create(
    State(state): State<Arc<MockState>>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<ApiResponse<Department>>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Department name is required").with_detail("field", "name"));
    }
    let users = state.users().await?;
    let manager_id = payload.manager_id.unwrap_or_default();
    let manager = resolve_manager(&manager_id, &users);

    let department = state
        .update_departments(|departments| {
            let department = Department {
                id: uuid::Uuid::new_v4().simple().to_string(),
                name: payload.name.trim().to_string(),
                description: payload.description,
                manager_id,
                manager,
                members: Vec::new(),
            };
            departments.push(department.clone());
            Ok(department)
        })
        .await?;

    tracing::info!(department_id = %department.id, "Mock department created");
    Ok(Json(ApiResponse::ok_with_message(
        department,
        "Department created",
    )))
}

/// PUT /departments/{id} - merge; omitting managerId keeps the manager
async fn update(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<ApiResponse<Department>>> {
    let users = state.users().await?;
    let department = state
        .update_departments(|departments| {
            let department = departments
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| not_found(&id))?;
            if let Some(name) = payload.name {
                department.name = name;
            }
            if let Some(description) = payload.description {
                department.description = description;
            }
            if let Some(manager_id) = payload.manager_id {
                department.manager = resolve_manager(&manager_id, &users);
                department.manager_id = manager_id;
            }
            Ok(department.clone())
        })
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        department,
        "Department updated",
    )))
}

/// DELETE /departments/{id}
async fn delete(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .update_departments(|departments| {
            let index = departments
                .iter()
                .position(|d| d.id == id)
                .ok_or_else(|| not_found(&id))?;
            departments.remove(index);
            Ok(())
        })
        .await?;
    Ok(Json(ApiResponse::message("Department deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_manager_prefers_roster() {
        let users = seed::users();
        let manager = resolve_manager("1", &users).unwrap();
        assert_eq!(manager.name, "Zhang San");
        assert_eq!(manager.position, "Project Manager");
    }

    #[test]
    fn test_resolve_manager_falls_back_to_users() {
        let mut users = seed::users();
        users[2].id = "u-42".into();
        let manager = resolve_manager("u-42", &users).unwrap();
        assert_eq!(manager.name, "Test User 1");
        assert!(resolve_manager("missing", &users).is_none());
        assert!(resolve_manager("", &users).is_none());
    }
}
