//! Authentication endpoints of the mock world

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use regex::Regex;
use std::sync::{Arc, LazyLock};

use shared::client::{
    CaptchaChallenge, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ResetPasswordCodeRequest, ResetPasswordRequest, UserInfo,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::User;
use shared::response::ApiResponse;

use super::seed;
use super::state::MockState;
use crate::captcha::{self, CaptchaAnswer};

static USERNAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid username pattern"));
static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid password pattern"));
static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub fn router() -> Router<Arc<MockState>> {
    Router::new()
        .route("/login", post(login))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/captcha", get(captcha_challenge))
        .route("/auth/info", get(info))
        .route("/logout", post(logout))
        .route("/auth/reset-password/code", post(reset_password_code))
        .route("/auth/reset-password", post(reset_password))
        .route("/users/reset-password", post(reset_password))
}

/// Verify captcha fields when present. A code without a token is rejected.
fn check_optional_captcha(
    state: &MockState,
    token: Option<&str>,
    code: Option<&str>,
) -> AppResult<()> {
    match CaptchaAnswer::from_fields(token, code) {
        CaptchaAnswer::Absent => Ok(()),
        CaptchaAnswer::Incomplete => Err(AppError::new(ErrorCode::CaptchaIncomplete)),
        CaptchaAnswer::Provided { token, code } => captcha::verify(state.store(), token, code),
    }
}

/// Verify captcha fields, which must be present
fn check_required_captcha(
    state: &MockState,
    token: Option<&str>,
    code: Option<&str>,
) -> AppResult<()> {
    match CaptchaAnswer::from_fields(token, code) {
        CaptchaAnswer::Absent => Err(AppError::new(ErrorCode::CaptchaRequired)),
        CaptchaAnswer::Incomplete => Err(AppError::new(ErrorCode::CaptchaIncomplete)),
        CaptchaAnswer::Provided { token, code } => captcha::verify(state.store(), token, code),
    }
}

/// POST /login - sign in with a built-in account
async fn login(
    State(state): State<Arc<MockState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    check_optional_captcha(
        &state,
        req.captcha_token.as_deref(),
        req.captcha_code.as_deref(),
    )?;

    let user = seed::login_profile(&req.username)
        .filter(|_| req.password == seed::MOCK_PASSWORD)
        .ok_or_else(AppError::invalid_credentials)?;

    let token = format!("mock-jwt-token-{}", uuid::Uuid::new_v4().simple());
    state.cache_user_info(&user)?;
    tracing::info!(username = %user.username, "Mock login succeeded");

    Ok(Json(
        ApiResponse::ok_with_message(
            LoginResponse {
                token: token.clone(),
                user,
            },
            "Login successful",
        )
        .with_token(token),
    ))
}

/// Validate a registration, first violated rule wins. The captcha is
/// checked last.
pub(crate) fn validate_registration(req: &RegisterRequest, users: &[User]) -> AppResult<()> {
    if req.username.is_empty() {
        return Err(AppError::new(ErrorCode::UsernameRequired));
    }
    if req.password.is_empty() {
        return Err(AppError::new(ErrorCode::PasswordRequired));
    }
    if req.email.is_empty() {
        return Err(AppError::new(ErrorCode::EmailRequired));
    }

    let username_len = req.username.chars().count();
    if !(4..=20).contains(&username_len) {
        return Err(AppError::new(ErrorCode::UsernameLength));
    }
    if !USERNAME_CHARSET.is_match(&req.username) {
        return Err(AppError::new(ErrorCode::UsernameCharset));
    }
    if users.iter().any(|u| u.username == req.username) {
        return Err(AppError::new(ErrorCode::UsernameTaken));
    }

    let password_len = req.password.chars().count();
    if !(6..=20).contains(&password_len) {
        return Err(AppError::new(ErrorCode::PasswordLength));
    }
    let has_letter = req.password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = req.password.chars().any(|c| c.is_ascii_digit());
    if !PASSWORD_CHARSET.is_match(&req.password) || !has_letter || !has_digit {
        return Err(AppError::new(ErrorCode::PasswordComplexity));
    }

    if !EMAIL_FORMAT.is_match(&req.email) {
        return Err(AppError::new(ErrorCode::EmailFormat));
    }
    Ok(())
}

/// POST /auth/register - validate and accept a registration (not persisted)
async fn register(
    State(state): State<Arc<MockState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<RegisterResponse>>> {
    let users = state.users().await?;
    validate_registration(&req, &users)?;
    check_required_captcha(
        &state,
        req.captcha_token.as_deref(),
        req.captcha_code.as_deref(),
    )?;

    let created = RegisterResponse {
        user_id: format!("user_{}", uuid::Uuid::new_v4().simple()),
        username: req.username,
        email: req.email,
        create_time: chrono::Utc::now().to_rfc3339(),
    };
    tracing::info!(username = %created.username, "Mock registration accepted");
    Ok(Json(ApiResponse::ok_with_message(
        created,
        "Registration successful, please sign in",
    )))
}

/// GET /auth/captcha - issue a captcha challenge
async fn captcha_challenge(
    State(state): State<Arc<MockState>>,
) -> AppResult<Json<ApiResponse<CaptchaChallenge>>> {
    let challenge = captcha::issue(state.store())?;
    Ok(Json(ApiResponse::ok(challenge)))
}

/// GET /auth/info - cached profile, or the default administrator
async fn info(State(state): State<Arc<MockState>>) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let info = state
        .cached_user_info()?
        .unwrap_or_else(seed::default_profile);
    Ok(Json(ApiResponse::ok(info)))
}

/// POST /logout
async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Signed out"))
}

/// POST /auth/reset-password/code - pretend to mail a reset code
async fn reset_password_code(
    Json(req): Json<ResetPasswordCodeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if req.email.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmailRequired));
    }
    if !EMAIL_FORMAT.is_match(req.email.trim()) {
        return Err(AppError::new(ErrorCode::EmailFormat));
    }
    Ok(Json(ApiResponse::message(
        "Verification code sent to your email",
    )))
}

/// POST /users/reset-password - captcha-verified password reset
async fn reset_password(
    State(state): State<Arc<MockState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if req.new_password.is_empty() {
        return Err(AppError::new(ErrorCode::PasswordRequired));
    }
    if !(6..=20).contains(&req.new_password.chars().count()) {
        return Err(AppError::new(ErrorCode::PasswordLength));
    }
    check_required_captcha(
        &state,
        req.captcha_token.as_deref(),
        req.captcha_code.as_deref(),
    )?;

    let users = state.users().await?;
    let known = match (req.username.as_deref(), req.email.as_deref()) {
        (Some(username), _) if !username.is_empty() => {
            users.iter().any(|u| u.username == username)
        }
        (_, Some(email)) if !email.is_empty() => users.iter().any(|u| u.email == email),
        _ => true,
    };
    if !known {
        return Err(AppError::new(ErrorCode::UserNotFound));
    }

    Ok(Json(ApiResponse::message("Password reset successful")))
}
