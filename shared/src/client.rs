//! Client-related types shared between the backend contract and the client
//!
//! Request/response records for the authentication endpoints.

use serde::{Deserialize, Serialize};

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            captcha_code: None,
            captcha_token: None,
        }
    }

    /// Attach a captcha answer
    pub fn with_captcha(mut self, token: impl Into<String>, code: impl Into<String>) -> Self {
        self.captcha_token = Some(token.into());
        self.captcha_code = Some(code.into());
        self
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Signed-in user profile (cached under the `user_info` storage key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
}

/// Registration result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub create_time: String,
}

/// Captcha challenge
///
/// `captcha_code` is only populated by the client-side generator and exists
/// for development convenience.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaChallenge {
    /// `data:image/svg+xml;base64,...`
    pub captcha_image: String,
    /// Correlation token used at verification time
    pub captcha_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_code: Option<String>,
}

/// Request a password-reset code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordCodeRequest {
    pub email: String,
}

/// Confirm a password reset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub new_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_format() {
        let req = LoginRequest::new("admin", "password").with_captcha("captcha-1", "aB3d");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["captchaToken"], "captcha-1");
        assert_eq!(json["captchaCode"], "aB3d");

        let bare = serde_json::to_value(LoginRequest::new("admin", "password")).unwrap();
        assert!(bare.get("captchaCode").is_none());
    }

    #[test]
    fn test_register_request_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.username, "alice");
        assert!(req.password.is_empty());
        assert!(req.email.is_empty());
        assert!(req.captcha_token.is_none());
    }
}
