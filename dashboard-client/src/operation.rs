//! Operation descriptors
//!
//! One [`Operation`] identifies one logical API call. It is built once and
//! then handed to the dispatcher unchanged, so the very same descriptor can
//! be replayed against the mock engine after a live failure.

use http::Method;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{ClientError, ClientResult};

/// File part of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Multipart field name (usually `file`)
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    /// Additional text fields
    pub fields: Vec<(String, String)>,
}

impl Upload {
    pub fn file(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".into(),
            filename: filename.into(),
            content_type: None,
            bytes,
            fields: Vec::new(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// JSON summary handed to the mock engine in place of the multipart body
    pub fn manifest(&self) -> Value {
        json!({
            "field": self.field,
            "filename": self.filename,
            "size": self.bytes.len(),
            "contentType": self.content_type,
        })
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Upload(Upload),
}

/// Immutable description of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Body>,
    headers: Vec<(String, String)>,
}

impl Operation {
    fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(Body::Json(serde_json::to_value(body)?));
        Ok(self)
    }

    /// Attach a multipart file upload
    pub fn upload(mut self, upload: Upload) -> Self {
        self.body = Some(Body::Upload(upload));
        self
    }

    /// Extra request header, applied after the standard ones
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path as given, possibly with an inline query string
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path without any query string
    pub fn route(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Path plus url-encoded query, e.g. `/users/page?page=0&size=10`
    pub fn uri(&self) -> ClientResult<String> {
        if self.query.is_empty() {
            return Ok(self.path.clone());
        }
        let mut url = reqwest::Url::parse(&format!("http://localhost{}", self.path))
            .map_err(|e| ClientError::Config(format!("invalid path {}: {}", self.path, e)))?;
        url.query_pairs_mut().extend_pairs(&self.query);
        Ok(match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
    }

    /// Body bytes for the in-process mock router
    pub(crate) fn mock_body(&self) -> ClientResult<Option<Vec<u8>>> {
        match &self.body {
            None => Ok(None),
            Some(Body::Json(value)) => Ok(Some(serde_json::to_vec(value)?)),
            Some(Body::Upload(upload)) => Ok(Some(serde_json::to_vec(&upload.manifest())?)),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
