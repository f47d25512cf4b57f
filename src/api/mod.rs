//! REST client for the remote user/post service.
//!
//! Every endpoint performs exactly one HTTP request and returns an
//! [`ApiResult`] envelope. Nothing here returns `Err` or panics once the
//! client is built: transport errors, non-2xx statuses, and undecodable
//! bodies all become `ApiResult { success: false, error: Some(..) }`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::ApiConfig;

pub mod middleware;
pub mod models;

pub use middleware::{ApiFailure, ApiRequest, ApiResponse, Pipeline};
pub use models::{NewPost, Post, User};

/// Errors building the client. Requests themselves never error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Uniform `{success, data, error}` result envelope
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| middleware::NETWORK_ERROR.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    pipeline: Pipeline,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl ApiClient {
    /// Client with the standard pipeline (request logging, error normalization/logging)
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_pipeline(config, Pipeline::standard())
    }

    pub fn with_pipeline(config: &ApiConfig, pipeline: Pipeline) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url).map_err(|source| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let builder = reqwest::Client::builder().default_headers(headers);
        // Browser fetch() has no client-level timeout
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout());

        Ok(Self {
            http: builder.build()?,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            pipeline,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /users`
    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        self.call(ApiRequest::get("/users"), "Failed to fetch users")
            .await
    }

    /// `GET /users/{id}`
    pub async fn fetch_user(&self, id: i64) -> ApiResult<User> {
        self.call(ApiRequest::get(format!("/users/{}", id)), "Failed to fetch user")
            .await
    }

    /// `GET /posts`, or `GET /posts?userId={id}` when filtered
    pub async fn fetch_posts(&self, user_id: Option<i64>) -> ApiResult<Vec<Post>> {
        let request = match user_id {
            Some(id) => ApiRequest::get("/posts").with_query("userId", id),
            None => ApiRequest::get("/posts"),
        };
        self.call(request, "Failed to fetch posts").await
    }

    /// `POST /posts`
    pub async fn create_post(&self, post: &NewPost) -> ApiResult<Post> {
        let body = match serde_json::to_value(post) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to encode post: {}", e);
                return ApiResult::failed("Failed to create post");
            }
        };
        self.call(ApiRequest::post("/posts", body), "Failed to create post")
            .await
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest, fallback: &str) -> ApiResult<T> {
        let response = self.execute(request).await;

        if let Some(failure) = response.failure {
            return ApiResult::failed(failure.message);
        }
        if !response.is_success() {
            // Only reachable with a pipeline that skips normalize_error
            return ApiResult::failed(middleware::status_message(response.status));
        }

        match serde_json::from_value::<T>(response.body.unwrap_or(Value::Null)) {
            Ok(data) => ApiResult::ok(data),
            Err(e) => {
                tracing::warn!("Unexpected response body from {}: {}", response.url, e);
                ApiResult::failed(fallback)
            }
        }
    }

    /// Run one request through the pipeline and reqwest
    pub async fn execute(&self, request: ApiRequest) -> ApiResponse {
        let request = self.pipeline.apply_request(request);
        let display_url = request.display_url();
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                match resp.bytes().await {
                    // Empty or non-JSON bodies are kept as None; decoding decides later
                    Ok(bytes) => {
                        let body = serde_json::from_slice::<Value>(&bytes).ok();
                        ApiResponse::received(display_url, status, body)
                    }
                    Err(e) => ApiResponse::transport_failed(display_url, e),
                }
            }
            Err(e) => match e.status() {
                Some(status) => ApiResponse::received(display_url, status.as_u16(), None),
                None => ApiResponse::transport_failed(display_url, e),
            },
        };

        self.pipeline.apply_response(response)
    }
}
