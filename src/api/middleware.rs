//! Request/response middleware pipeline.
//!
//! Each stage is a plain function over a value: request stages run in order
//! before the request is sent, response stages run in order on whatever came
//! back (including transport failures, which arrive with no status).

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Fallback message for statuses outside the table and for transport failures
pub const NETWORK_ERROR: &str = "Network Error";

/// Human-readable message for an HTTP status.
pub fn status_message(status: Option<u16>) -> &'static str {
    match status {
        Some(400) => "Bad Request",
        Some(401) => "Unauthorized",
        Some(403) => "Forbidden",
        Some(404) => "Not Found",
        Some(500) => "Internal Server Error",
        Some(502) => "Bad Gateway",
        Some(503) => "Service Unavailable",
        _ => NETWORK_ERROR,
    }
}

/// Outgoing request before it's handed to reqwest
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/users/3`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get(path)
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Path plus query string, as it appears in logs
    pub fn display_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// Normalized failure carried inside a response
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
    pub url: String,
}

/// What came back for one request
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub url: String,
    /// `None` when the request never got a response (connect error, timeout)
    pub status: Option<u16>,
    pub body: Option<Value>,
    /// Transport error text, if any
    pub transport_error: Option<String>,
    /// Set by `normalize_error`
    pub failure: Option<ApiFailure>,
}

impl ApiResponse {
    pub fn received(url: impl Into<String>, status: u16, body: Option<Value>) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            body,
            transport_error: None,
            failure: None,
        }
    }

    pub fn transport_failed(url: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            url: url.into(),
            status: None,
            body: None,
            transport_error: Some(error.to_string()),
            failure: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(s) if (200..300).contains(&s)) && self.transport_error.is_none()
    }
}

pub type RequestStage = Arc<dyn Fn(ApiRequest) -> ApiRequest + Send + Sync>;
pub type ResponseStage = Arc<dyn Fn(ApiResponse) -> ApiResponse + Send + Sync>;

/// Ordered request and response stages
#[derive(Clone, Default)]
pub struct Pipeline {
    request: Vec<RequestStage>,
    response: Vec<ResponseStage>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("request_stages", &self.request.len())
            .field("response_stages", &self.response.len())
            .finish()
    }
}

impl Pipeline {
    /// Empty pipeline (no logging, no error normalization)
    pub fn new() -> Self {
        Self::default()
    }

    /// log_request → [send] → normalize_error → log_error
    pub fn standard() -> Self {
        Self::new()
            .with_request_stage(log_request)
            .with_response_stage(normalize_error)
            .with_response_stage(log_error)
    }

    pub fn with_request_stage<F>(mut self, stage: F) -> Self
    where
        F: Fn(ApiRequest) -> ApiRequest + Send + Sync + 'static,
    {
        self.request.push(Arc::new(stage));
        self
    }

    pub fn with_response_stage<F>(mut self, stage: F) -> Self
    where
        F: Fn(ApiResponse) -> ApiResponse + Send + Sync + 'static,
    {
        self.response.push(Arc::new(stage));
        self
    }

    pub fn apply_request(&self, request: ApiRequest) -> ApiRequest {
        self.request.iter().fold(request, |req, stage| stage(req))
    }

    pub fn apply_response(&self, response: ApiResponse) -> ApiResponse {
        self.response.iter().fold(response, |resp, stage| stage(resp))
    }
}

/// Request stage: log every outgoing request
pub fn log_request(request: ApiRequest) -> ApiRequest {
    tracing::info!("Making request to: {}", request.display_url());
    request
}

/// Response stage: turn non-2xx statuses and transport errors into an [`ApiFailure`]
pub fn normalize_error(mut response: ApiResponse) -> ApiResponse {
    if response.failure.is_none() && !response.is_success() {
        response.failure = Some(ApiFailure {
            status: response.status,
            message: status_message(response.status).to_string(),
            url: response.url.clone(),
        });
    }
    response
}

/// Response stage: log normalized failures
pub fn log_error(response: ApiResponse) -> ApiResponse {
    if let Some(failure) = &response.failure {
        tracing::error!(
            status = ?failure.status,
            message = %failure.message,
            url = %failure.url,
            transport = ?response.transport_error,
            "API Error"
        );
    }
    response
}

/// Request stage factory: attach a bearer token to every request
pub fn bearer_auth(token: impl Into<String>) -> impl Fn(ApiRequest) -> ApiRequest + Send + Sync {
    let header = format!("Bearer {}", token.into());
    move |request| request.with_header("Authorization", header.clone())
}
