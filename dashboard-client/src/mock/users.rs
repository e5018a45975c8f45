//! User store endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use std::sync::Arc;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{ROLE_USER, User, UserCreate, UserFilter, UserFilterResult, UserUpdate};
use shared::response::ApiResponse;

use super::state::MockState;

pub fn router() -> Router<Arc<MockState>> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/filter", post(filter))
        .route("/users/{id}", put(update).delete(delete))
}

fn not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", id))
}

/// GET /users
async fn list(State(state): State<Arc<MockState>>) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    Ok(Json(ApiResponse::ok(state.users().await?)))
}

/// POST /users/filter
async fn filter(
    State(state): State<Arc<MockState>>,
    Json(criteria): Json<UserFilter>,
) -> AppResult<Json<ApiResponse<UserFilterResult>>> {
    let items: Vec<User> = state
        .users()
        .await?
        .into_iter()
        .filter(|u| criteria.matches(u))
        .collect();
    let total = items.len();
    Ok(Json(ApiResponse::ok(UserFilterResult { items, total })))
}

/// POST /users - create; usernames are unique
async fn create(
    State(state): State<Arc<MockState>>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<ApiResponse<User>>> {
    let payload = payload.normalized();
    if payload.username.is_empty() {
        return Err(AppError::new(ErrorCode::UsernameRequired));
    }

    let user = state
        .update_users(|users| {
            if users.iter().any(|u| u.username == payload.username) {
                return Err(AppError::new(ErrorCode::UserUsernameExists)
                    .with_detail("username", payload.username.clone()));
            }
            let user = User {
                id: uuid::Uuid::new_v4().simple().to_string(),
                username: payload.username,
                name: payload.name,
                email: payload.email,
                role: payload.role.unwrap_or_else(|| ROLE_USER.to_string()),
                create_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                department_id: payload.department_id,
                department: payload.department,
                phone: payload.phone,
                is_active: Some(true),
                avatar: None,
            };
            users.push(user.clone());
            Ok(user)
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Mock user created");
    Ok(Json(ApiResponse::ok_with_message(user, "User created")))
}

/// PUT /users/{id} - merge; usernames stay unique and the administrator
/// keeps its role and username
async fn update(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<ApiResponse<User>>> {
    let payload = payload.normalized();
    let user = state
        .update_users(|users| {
            if let Some(username) = payload.username.as_deref().filter(|u| !u.is_empty())
                && users.iter().any(|u| u.id != id && u.username == username)
            {
                return Err(AppError::new(ErrorCode::UserUsernameExists)
                    .with_detail("username", username));
            }
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| not_found(&id))?;
            user.apply(payload);
            Ok(user.clone())
        })
        .await?;

    // Keep the signed-in profile in step with its own record
    if let Some(mut info) = state.cached_user_info()?
        && info.id == user.id
    {
        info.name = user.name.clone();
        info.email = user.email.clone();
        info.role = user.role.clone();
        state.cache_user_info(&info)?;
    }

    Ok(Json(ApiResponse::ok_with_message(user, "User updated")))
}

/// DELETE /users/{id} - the administrator cannot be deleted
async fn delete(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .update_users(|users| {
            let index = users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| not_found(&id))?;
            if users[index].is_admin() {
                return Err(AppError::new(ErrorCode::CannotDeleteAdmin));
            }
            users.remove(index);
            Ok(())
        })
        .await?;
    Ok(Json(ApiResponse::message("User deleted")))
}
