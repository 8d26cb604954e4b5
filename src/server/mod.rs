//! JSON API over the post repository and the private-post gate
//!
//! Every request rereads the content directory on the blocking pool; the
//! only shared state is the immutable repository and gate.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::access::SecretGate;
use crate::content::{Post, PostRepository, TermCount};
use crate::error::ContentError;
use crate::Blog;

/// Server state
struct ServerState {
    repo: PostRepository,
    gate: SecretGate,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyResponse {
    pub success: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures surfaced to API clients
#[derive(Debug)]
enum ApiError {
    NotFound,
    Content(ContentError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Content(e) => {
                tracing::error!("Content query failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!("Request task failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e)
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Build the API router
pub fn router(repo: PostRepository, gate: SecretGate) -> Router {
    let state = Arc::new(ServerState { repo, gate });

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/slugs", get(list_slugs))
        .route("/api/tags", get(list_tags))
        .route("/api/categories", get(list_categories))
        .route("/api/verify", post(verify))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let gate = blog.gate();
    if !gate.is_configured() {
        tracing::warn!(
            "{} is not set; private posts cannot be unlocked",
            blog.config.gate.secret_env
        );
    }
    let app = router(blog.repository(), gate);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}

/// Run a repository query off the async workers
async fn query<T, F>(state: Arc<ServerState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&PostRepository) -> Result<T, ContentError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state.repo))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::Content)
}

async fn list_posts(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<Post>>, ApiError> {
    query(state, |repo| repo.list_posts()).await.map(Json)
}

async fn get_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, ApiError> {
    query(state, move |repo| repo.get_post(&slug))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn list_slugs(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<String>>, ApiError> {
    query(state, |repo| repo.list_slugs()).await.map(Json)
}

async fn list_tags(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<TermCount>>, ApiError> {
    query(state, |repo| repo.list_tags()).await.map(Json)
}

async fn list_categories(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<TermCount>>, ApiError> {
    query(state, |repo| repo.list_categories()).await.map(Json)
}

async fn verify(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let success = state.gate.verify(&request.password);
    tracing::debug!("Secret verification: success={}", success);
    Json(VerifyResponse { success })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentOptions;
    use std::fs;

    fn state(dir: &tempfile::TempDir, secret: Option<&str>) -> Arc<ServerState> {
        Arc::new(ServerState {
            repo: PostRepository::new(dir.path(), ContentOptions::default()),
            gate: SecretGate::new(secret.map(str::to_string)),
        })
    }

    fn sample_site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, date, published) in [
            ("a.mdx", "2025-01-01", true),
            ("b.mdx", "2025-02-01", true),
            ("c.mdx", "2025-03-01", false),
        ] {
            fs::write(
                dir.path().join(name),
                format!(
                    "---\ntitle: {}\ndate: {}\npublished: {}\n---\nBody\n",
                    name, date, published
                ),
            )
            .unwrap();
        }
        dir
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_posts_and_slugs() {
        let dir = sample_site();

        let response = list_posts(State(state(&dir, None))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let posts: Vec<serde_json::Value> = body_json(response).await;
        let slugs: Vec<_> = posts.iter().map(|p| p["slug"].as_str().unwrap()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
        assert_eq!(posts[0]["readingTime"]["text"], "1 min read");
        assert_eq!(posts[0]["isPrivate"], false);

        let response = list_slugs(State(state(&dir, None))).await.into_response();
        let slugs: Vec<String> = body_json(response).await;
        assert_eq!(slugs, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_get_post() {
        let dir = sample_site();

        let response = get_post(State(state(&dir, None)), Path("a".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let post: serde_json::Value = body_json(response).await;
        assert_eq!(post["date"], "2025-01-01");

        for missing in ["nonexistent-slug", "c"] {
            let response = get_post(State(state(&dir, None)), Path(missing.to_string()))
                .await
                .into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body: serde_json::Value = body_json(response).await;
            assert_eq!(body["error"], "not found");
        }
    }

    #[tokio::test]
    async fn test_unreadable_directory_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(ServerState {
            repo: PostRepository::new(dir.path().join("missing"), ContentOptions::default()),
            gate: SecretGate::default(),
        });

        let response = list_posts(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_verify() {
        let dir = sample_site();

        let ask = |secret: Option<&'static str>, password: &str| {
            let state = state(&dir, secret);
            let request = VerifyRequest {
                password: password.to_string(),
            };
            async move { verify(State(state), Json(request)).await.0 }
        };

        assert_eq!(ask(None, "").await, VerifyResponse { success: false });
        assert_eq!(ask(None, "guess").await, VerifyResponse { success: false });
        assert_eq!(ask(Some("s3cret"), "s3cret").await, VerifyResponse { success: true });
        assert_eq!(ask(Some("s3cret"), "S3cret").await, VerifyResponse { success: false });
        assert_eq!(ask(Some("s3cret"), "s3cret\n").await, VerifyResponse { success: false });
    }

    #[tokio::test]
    async fn test_tags_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("t.md"),
            "---\ntitle: T\ndate: 2025-01-01\ntags: [rust]\ncategory: dev\n---\n",
        )
        .unwrap();

        let tags: Vec<TermCount> = body_json(
            list_tags(State(state(&dir, None))).await.into_response(),
        )
        .await;
        assert_eq!(tags, vec![TermCount { name: "rust".into(), count: 1 }]);

        let categories: Vec<TermCount> = body_json(
            list_categories(State(state(&dir, None))).await.into_response(),
        )
        .await;
        assert_eq!(categories[0].name, "dev");
    }
}
