//! Mock REST service for testing
//!
//! Simulates `/users`, `/users/{id}`, `/posts` (with `?userId=`) and
//! `POST /posts`. A forced status makes every route answer with that
//! status and an empty JSON object.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Mock REST server state
struct MockRestState {
    users: Vec<Value>,
    posts: Vec<Value>,
    forced_status: Option<StatusCode>,
    /// Raw body served for every route instead of real data
    raw_body: Option<&'static str>,
    next_post_id: i64,
    requests: AtomicUsize,
}

/// Mock REST Server
pub struct MockRestServer {
    addr: SocketAddr,
    state: Arc<RwLock<MockRestState>>,
    handle: JoinHandle<()>,
}

impl MockRestServer {
    /// Start a mock REST server on a random port, empty
    pub async fn start() -> Self {
        let state = Arc::new(RwLock::new(MockRestState {
            users: Vec::new(),
            posts: Vec::new(),
            forced_status: None,
            raw_body: None,
            next_post_id: 101,
            requests: AtomicUsize::new(0),
        }));

        let app = Router::new()
            .route("/users", get(list_users))
            .route("/users/{id}", get(get_user))
            .route("/posts", get(list_posts).post(create_post))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Start with `user_count` users, each authoring `posts_per_user` posts
    pub async fn seeded(user_count: i64, posts_per_user: i64) -> Self {
        let server = Self::start().await;
        for id in 1..=user_count {
            server
                .add_user(id, &format!("User {}", id), &format!("user{}@example.com", id))
                .await;
            for n in 0..posts_per_user {
                let post_id = (id - 1) * posts_per_user + n + 1;
                server
                    .add_post(post_id, id, &format!("Post {} by user {}", post_id, id))
                    .await;
            }
        }
        server
    }

    /// Base URL for `ApiConfig::with_base_url`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn add_user(&self, id: i64, name: &str, email: &str) {
        let mut state = self.state.write().await;
        state.users.push(json!({
            "id": id,
            "name": name,
            "username": name.to_lowercase().replace(' ', "."),
            "email": email,
            "phone": "1-770-736-8031",
            "address": { "city": "Gwenborough" },
        }));
    }

    pub async fn add_post(&self, id: i64, user_id: i64, title: &str) {
        let mut state = self.state.write().await;
        state.posts.push(json!({
            "id": id,
            "userId": user_id,
            "title": title,
            "body": format!("{} body", title),
        }));
    }

    /// Answer every request with `status`
    pub async fn force_status(&self, status: u16) {
        let mut state = self.state.write().await;
        state.forced_status = StatusCode::from_u16(status).ok();
    }

    /// Answer every request with 200 and `body` verbatim
    pub async fn force_raw_body(&self, body: &'static str) {
        let mut state = self.state.write().await;
        state.raw_body = Some(body);
    }

    pub async fn clear_forced(&self) {
        let mut state = self.state.write().await;
        state.forced_status = None;
        state.raw_body = None;
    }

    /// Requests served so far
    pub async fn request_count(&self) -> usize {
        self.state.read().await.requests.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

/// Forced status or raw body, if configured
fn forced(state: &MockRestState) -> Option<Response> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = state.forced_status {
        return Some((status, Json(json!({}))).into_response());
    }
    state.raw_body.map(|body| {
        (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    })
}

async fn list_users(State(state): State<Arc<RwLock<MockRestState>>>) -> Response {
    let state = state.read().await;
    if let Some(response) = forced(&state) {
        return response;
    }
    Json(Value::Array(state.users.clone())).into_response()
}

async fn get_user(
    State(state): State<Arc<RwLock<MockRestState>>>,
    Path(id): Path<i64>,
) -> Response {
    let state = state.read().await;
    if let Some(response) = forced(&state) {
        return response;
    }
    match state.users.iter().find(|u| u["id"] == id) {
        Some(user) => Json(user.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct PostsQuery {
    #[serde(rename = "userId")]
    user_id: Option<i64>,
}

async fn list_posts(
    State(state): State<Arc<RwLock<MockRestState>>>,
    Query(query): Query<PostsQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(response) = forced(&state) {
        return response;
    }
    let posts: Vec<Value> = state
        .posts
        .iter()
        .filter(|p| query.user_id.is_none_or(|id| p["userId"] == id))
        .cloned()
        .collect();
    Json(Value::Array(posts)).into_response()
}

async fn create_post(
    State(state): State<Arc<RwLock<MockRestState>>>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Some(response) = forced(&state) {
        return response;
    }
    // Like the public service: echo the post with a fresh id, store nothing
    body["id"] = json!(state.next_post_id);
    state.next_post_id += 1;
    (StatusCode::CREATED, Json(body)).into_response()
}
