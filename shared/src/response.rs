//! API Response types
//!
//! Standardized response envelope shared by the live backend and the mock engine

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unified API response envelope
///
/// All API responses follow this format (every field but `success` optional):
/// ```json
/// {
///     "success": true,
///     "message": "Success",
///     "data": { ... },
///     "token": "..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    /// Whether the operation succeeded
    #[serde(default = "default_success")]
    pub success: bool,
    /// Response data (optional)
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Server-issued token (login or rotation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            token: None,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            token: None,
        }
    }

    /// Create a successful response without data
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            token: None,
        }
    }

    /// Create a successful response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            token: None,
        }
    }

    /// Attach a token to the envelope
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl ApiResponse<Value> {
    /// Normalize an arbitrary response body into an envelope
    ///
    /// Bodies that already carry a boolean `success` field are decoded as-is;
    /// anything else (bare arrays, plain objects, strings, null) becomes the
    /// `data` of a successful envelope.
    pub fn from_body(body: Value) -> Self {
        let is_envelope = body
            .as_object()
            .and_then(|obj| obj.get("success"))
            .is_some_and(Value::is_boolean);

        if is_envelope
            && let Ok(envelope) = serde_json::from_value::<ApiResponse<Value>>(body.clone())
        {
            return envelope;
        }

        let data = if body.is_null() { None } else { Some(body) };
        Self {
            success: true,
            data,
            message: None,
            token: None,
        }
    }

    /// Decode the payload into a typed envelope
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, serde_json::Error> {
        let data = match self.data {
            Some(Value::Null) | None => None,
            Some(v) => Some(serde_json::from_value(v)?),
        };
        Ok(ApiResponse {
            success: self.success,
            data,
            message: self.message,
            token: self.token,
        })
    }
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Page of results, in the shape the dashboard backend returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Current page number (0-based)
    pub page: u32,
    /// Items per page
    pub size: u32,
    /// Total number of items
    pub total_elements: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether this is the last page
    pub last: bool,
}

impl<T: Clone> Page<T> {
    /// Slice a full listing into the requested page
    pub fn slice(all: &[T], page: u32, size: u32) -> Self {
        let total = all.len();
        let start = (page as usize).saturating_mul(size as usize);
        let end = start.saturating_add(size as usize);
        let content = all
            .get(start.min(total)..end.min(total))
            .map(<[T]>::to_vec)
            .unwrap_or_default();
        let total_pages = if size == 0 {
            0
        } else {
            total.div_ceil(size as usize) as u32
        };

        Self {
            content,
            page,
            size,
            total_elements: total as u64,
            total_pages,
            last: end >= total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_envelope() {
        let env = ApiResponse::from_body(json!({
            "success": false,
            "message": "Captcha is incorrect"
        }));
        assert!(!env.success);
        assert_eq!(env.message.as_deref(), Some("Captcha is incorrect"));
        assert!(env.data.is_none());
    }

    #[test]
    fn test_from_body_bare_array() {
        let env = ApiResponse::from_body(json!([1, 2, 3]));
        assert!(env.success);
        assert_eq!(env.data, Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_from_body_null() {
        let env = ApiResponse::from_body(Value::Null);
        assert!(env.success);
        assert!(env.data.is_none());
    }

    #[test]
    fn test_from_body_success_not_boolean() {
        // A payload that happens to have a non-boolean "success" is data, not an envelope
        let env = ApiResponse::from_body(json!({"success": "yes"}));
        assert_eq!(env.data, Some(json!({"success": "yes"})));
    }

    #[test]
    fn test_into_typed() {
        let env = ApiResponse::from_body(json!({"success": true, "data": [4, 5]}));
        let typed: ApiResponse<Vec<u32>> = env.into_typed().unwrap();
        assert_eq!(typed.data, Some(vec![4, 5]));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_string(&ApiResponse::<()>::message("done")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"done"}"#);
    }

    #[test]
    fn test_page_slice() {
        let all: Vec<u32> = (1..=7).collect();

        let first = Page::slice(&all, 0, 3);
        assert_eq!(first.content, vec![1, 2, 3]);
        assert_eq!(first.total_pages, 3);
        assert!(!first.last);

        let last = Page::slice(&all, 2, 3);
        assert_eq!(last.content, vec![7]);
        assert!(last.last);

        let beyond = Page::slice(&all, 9, 3);
        assert!(beyond.content.is_empty());
        assert!(beyond.last);
    }
}
