// dashboard-client/src/client/transport.rs
// Live HTTP transport

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::operation::Body;

/// Fully prepared live request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Body>,
}

/// Raw live response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Failures that never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Network(String),
}

impl From<TransportError> for crate::ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::Timeout,
            TransportError::Network(msg) => Self::Network(msg),
        }
    }
}

/// Sends live requests. The dispatcher owns timeouts and classification.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn multipart(upload: &crate::operation::Upload) -> Result<Form, TransportError> {
        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone());
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| TransportError::Network(format!("invalid content type: {e}")))?;
        }
        let mut form = Form::new().part(upload.field.clone(), part);
        for (name, value) in &upload.fields {
            form = form.text(name.clone(), value.clone());
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        builder = match &request.body {
            Some(Body::Json(value)) => builder.json(value),
            Some(Body::Upload(upload)) => builder.multipart(Self::multipart(upload)?),
            None => builder,
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}
