//! Token extraction from response bodies
//!
//! Backends return tokens in several shapes. The rules below are applied in
//! order and the first non-empty string wins.

use serde_json::Value;

/// Where a token may appear in a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRule {
    /// Enclosing object key, `None` for the top level
    pub parent: Option<&'static str>,
    pub field: &'static str,
}

/// Extraction rules, highest priority first
pub const TOKEN_RULES: [TokenRule; 6] = [
    TokenRule { parent: None, field: "token" },
    TokenRule { parent: None, field: "access_token" },
    TokenRule { parent: None, field: "accessToken" },
    TokenRule { parent: Some("data"), field: "token" },
    TokenRule { parent: Some("data"), field: "access_token" },
    TokenRule { parent: Some("data"), field: "accessToken" },
];

impl TokenRule {
    fn probe<'a>(&self, body: &'a Value) -> Option<&'a str> {
        let scope = match self.parent {
            Some(parent) => body.get(parent)?,
            None => body,
        };
        scope
            .get(self.field)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// First token found in `body`, if any
pub fn extract(body: &Value) -> Option<&str> {
    TOKEN_RULES.iter().find_map(|rule| rule.probe(body))
}
