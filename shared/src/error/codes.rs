//! Unified error codes for the dashboard API
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Captcha errors
//! - 4xxx: Registration validation errors
//! - 5xxx: Project errors
//! - 6xxx: User errors
//! - 7xxx: Department errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that the live backend,
/// the mock engine and the front-end agree on one numeric vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Cannot delete admin user
    CannotDeleteAdmin = 2005,

    // ==================== 3xxx: Captcha ====================
    /// Captcha was not supplied
    CaptchaRequired = 3001,
    /// Captcha code supplied without its token
    CaptchaIncomplete = 3002,
    /// Captcha code does not match
    InvalidCaptcha = 3003,
    /// Captcha token unknown or already consumed
    CaptchaExpired = 3004,

    // ==================== 4xxx: Registration ====================
    /// Username is missing
    UsernameRequired = 4001,
    /// Password is missing
    PasswordRequired = 4002,
    /// Email is missing
    EmailRequired = 4003,
    /// Username length out of bounds
    UsernameLength = 4004,
    /// Username contains illegal characters
    UsernameCharset = 4005,
    /// Username is already taken
    UsernameTaken = 4006,
    /// Password length out of bounds
    PasswordLength = 4007,
    /// Password does not mix letters and digits
    PasswordComplexity = 4008,
    /// Email format invalid
    EmailFormat = 4009,

    // ==================== 5xxx: Project ====================
    /// Project not found
    ProjectNotFound = 5001,

    // ==================== 6xxx: User ====================
    /// User not found
    UserNotFound = 6001,
    /// Username already exists
    UserUsernameExists = 6002,

    // ==================== 7xxx: Department ====================
    /// Department not found
    DepartmentNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Check if this code belongs to the registration validation family
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed
                | Self::UsernameRequired
                | Self::PasswordRequired
                | Self::EmailRequired
                | Self::UsernameLength
                | Self::UsernameCharset
                | Self::UsernameTaken
                | Self::PasswordLength
                | Self::PasswordComplexity
                | Self::EmailFormat
                | Self::CaptchaRequired
                | Self::CaptchaIncomplete
                | Self::InvalidCaptcha
                | Self::CaptchaExpired
        )
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",

            // Auth
            Self::NotAuthenticated => "Not authenticated, please sign in",
            Self::InvalidCredentials => "Invalid username or password",
            Self::SessionExpired => "Session expired, please sign in again",

            // Permission
            Self::CannotDeleteAdmin => "Administrator account cannot be deleted",

            // Captcha
            Self::CaptchaRequired => "Please enter the captcha",
            Self::CaptchaIncomplete => "Captcha is incomplete",
            Self::InvalidCaptcha => "Captcha is incorrect, please try again",
            Self::CaptchaExpired => "Captcha has expired, please request a new one",

            // Registration
            Self::UsernameRequired => "Username is required",
            Self::PasswordRequired => "Password is required",
            Self::EmailRequired => "Email is required",
            Self::UsernameLength => "Username must be between 4 and 20 characters",
            Self::UsernameCharset => "Username may only contain letters, digits and underscores",
            Self::UsernameTaken => "Username already exists, please choose another",
            Self::PasswordLength => "Password must be between 6 and 20 characters",
            Self::PasswordComplexity => "Password must contain both letters and digits",
            Self::EmailFormat => "Please enter a valid email address",

            // Project
            Self::ProjectNotFound => "Project not found",

            // User
            Self::UserNotFound => "User not found",
            Self::UserUsernameExists => "Username already exists",

            // Department
            Self::DepartmentNotFound => "Department not found",

            // System
            Self::InternalError => "Internal server error",
            Self::StorageError => "Storage error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2005 => Ok(ErrorCode::CannotDeleteAdmin),

            // Captcha
            3001 => Ok(ErrorCode::CaptchaRequired),
            3002 => Ok(ErrorCode::CaptchaIncomplete),
            3003 => Ok(ErrorCode::InvalidCaptcha),
            3004 => Ok(ErrorCode::CaptchaExpired),

            // Registration
            4001 => Ok(ErrorCode::UsernameRequired),
            4002 => Ok(ErrorCode::PasswordRequired),
            4003 => Ok(ErrorCode::EmailRequired),
            4004 => Ok(ErrorCode::UsernameLength),
            4005 => Ok(ErrorCode::UsernameCharset),
            4006 => Ok(ErrorCode::UsernameTaken),
            4007 => Ok(ErrorCode::PasswordLength),
            4008 => Ok(ErrorCode::PasswordComplexity),
            4009 => Ok(ErrorCode::EmailFormat),

            // Project
            5001 => Ok(ErrorCode::ProjectNotFound),

            // User
            6001 => Ok(ErrorCode::UserNotFound),
            6002 => Ok(ErrorCode::UserUsernameExists),

            // Department
            7001 => Ok(ErrorCode::DepartmentNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
