//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Captcha errors
/// - 4xxx: Registration errors
/// - 5xxx: Project errors
/// - 6xxx: User errors
/// - 7xxx: Department errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Captcha errors (3xxx)
    Captcha,
    /// Registration validation errors (4xxx)
    Registration,
    /// Project errors (5xxx)
    Project,
    /// User errors (6xxx)
    User,
    /// Department errors (7xxx)
    Department,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Captcha,
            4000..5000 => Self::Registration,
            5000..6000 => Self::Project,
            6000..7000 => Self::User,
            7000..8000 => Self::Department,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Captcha => "captcha",
            Self::Registration => "registration",
            Self::Project => "project",
            Self::User => "user",
            Self::Department => "department",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
