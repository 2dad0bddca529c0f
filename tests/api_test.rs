//! End-to-end tests for the HTTP API with in-process collaborators

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use embedding_service::{
    api::{build_router, AppState},
    embedding::EmbeddingProvider,
    error::{EmbeddingError, Result, VectorDbError},
    middleware::{RateLimitConfig, RateLimiter, Sanitizer},
    vector_db::{SearchResult, VectorStore},
    EmbeddingService,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

struct MockProvider {
    fail: bool,
}

#[async_trait]
impl EmbeddingProvider for MockProvider {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(EmbeddingError::ApiError("AI service error".to_string()).into());
        }
        Ok(vec![0.1, 0.2, 0.3])
    }
}

#[derive(Default)]
struct MockStore {
    fail: bool,
    saved: Mutex<Vec<(String, Vec<f32>)>>,
    searches: Mutex<Vec<Option<usize>>>,
}

#[async_trait]
impl VectorStore for MockStore {
    async fn save_embedding(&self, text: &str, embedding: &[f32]) -> Result<()> {
        if self.fail {
            return Err(VectorDbError::InsertError("Database error".to_string()).into());
        }
        self.saved
            .lock()
            .unwrap()
            .push((text.to_string(), embedding.to_vec()));
        Ok(())
    }

    async fn get_embedding(&self, _id: &str) -> Result<Vec<f32>> {
        Err(VectorDbError::NotFound("Embedding not found".to_string()).into())
    }

    async fn search_similar(
        &self,
        _embedding: &[f32],
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>> {
        if self.fail {
            return Err(VectorDbError::SearchError("Database error".to_string()).into());
        }
        self.searches.lock().unwrap().push(limit);
        // Deliberately not sorted by similarity
        Ok(vec![
            SearchResult::new("another text", 0.5).with_id("2"),
            SearchResult::new("similar text", 0.75).with_id("1"),
        ])
    }
}

struct TestApp {
    router: Router,
    store: Arc<MockStore>,
}

fn test_app_with(
    store: MockStore,
    provider_fails: bool,
    limiter: RateLimitConfig,
    max_len: usize,
) -> TestApp {
    test_app_with_origins(store, provider_fails, limiter, max_len, &[])
}

fn test_app_with_origins(
    store: MockStore,
    provider_fails: bool,
    limiter: RateLimitConfig,
    max_len: usize,
    allowed_origins: &[String],
) -> TestApp {
    let store = Arc::new(store);
    let service = EmbeddingService::new(
        Arc::new(MockProvider {
            fail: provider_fails,
        }),
        store.clone(),
    );
    let state = AppState::new(Arc::new(service), Arc::new(Sanitizer::new(max_len)));
    let router = build_router(state, Arc::new(RateLimiter::new(limiter)), allowed_origins);
    TestApp { router, store }
}

fn test_app() -> TestApp {
    test_app_with(MockStore::default(), false, RateLimitConfig::default(), 10_000)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

#[tokio::test]
async fn test_embed_success() {
    let app = test_app();

    let (status, _, body) = send(&app.router, post_json("/embed", json!({"text": "hello"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    assert_eq!(
        app.store.saved.lock().unwrap().as_slice(),
        &[("hello".to_string(), vec![0.1, 0.2, 0.3])]
    );
}

#[tokio::test]
async fn test_embed_sanitizes_before_storing() {
    let app = test_app();

    let (status, _, _) = send(
        &app.router,
        post_json(
            "/embed",
            json!({"text": "  <script>alert('x')</script><b>hello</b> world "}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.saved.lock().unwrap()[0].0, "hello world");
}

#[tokio::test]
async fn test_invalid_text_is_rejected() {
    let app = test_app();

    for uri in ["/embed", "/search"] {
        for body in [
            json!({}),
            json!({"text": 123}),
            json!({"text": ""}),
            json!({"text": null}),
            json!({"text": ["a"]}),
            json!("hello"),
        ] {
            let (status, _, response) = send(&app.router, post_json(uri, body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, body);
            assert_eq!(response, json!({"error": "Missing or invalid text"}));
        }
    }

    assert!(app.store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_returns_store_order() {
    let app = test_app();

    let (status, _, body) = send(
        &app.router,
        post_json("/search", json!({"text": "hello", "limit": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"results": [
            {"id": "2", "text": "another text", "similarity": 0.5},
            {"id": "1", "text": "similar text", "similarity": 0.75}
        ]})
    );
    assert_eq!(app.store.searches.lock().unwrap().as_slice(), &[Some(2)]);
}

#[tokio::test]
async fn test_search_invalid_limit() {
    let app = test_app();

    for limit in [json!(0), json!(101), json!("abc"), json!(null), json!(-5), json!(0.5)] {
        let (status, _, body) = send(
            &app.router,
            post_json("/search", json!({"text": "hello", "limit": limit.clone()})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "limit {}", limit);
        assert_eq!(
            body,
            json!({"error": "Invalid limit. Must be a number between 1 and 100"})
        );
    }

    assert!(app.store.searches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_limit_boundaries_and_default() {
    let app = test_app();

    for body in [
        json!({"text": "hello"}),
        json!({"text": "hello", "limit": 1}),
        json!({"text": "hello", "limit": 100}),
        json!({"text": "hello", "limit": 2.9}),
    ] {
        let (status, _, _) = send(&app.router, post_json("/search", body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(
        app.store.searches.lock().unwrap().as_slice(),
        &[None, Some(1), Some(100), Some(2)]
    );
}

#[tokio::test]
async fn test_datastore_failure_surfaces_message() {
    let app = test_app_with(
        MockStore {
            fail: true,
            ..MockStore::default()
        },
        false,
        RateLimitConfig::default(),
        10_000,
    );

    let (status, _, body) = send(&app.router, post_json("/embed", json!({"text": "hello"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Insert error: Database error"}));

    let (status, _, body) = send(&app.router, post_json("/search", json!({"text": "hello"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Search error: Database error"}));
}

#[tokio::test]
async fn test_provider_failure_surfaces_message() {
    let app = test_app_with(MockStore::default(), true, RateLimitConfig::default(), 10_000);

    let (status, _, body) = send(&app.router, post_json("/embed", json!({"text": "hello"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "API request failed: AI service error"}));
    assert!(app.store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_text_too_long_is_server_error() {
    let app = test_app_with(MockStore::default(), false, RateLimitConfig::default(), 5);

    let (status, _, body) = send(
        &app.router,
        post_json("/embed", json!({"text": "hello world"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Text too long. Maximum 5 characters allowed."}));
}

#[tokio::test]
async fn test_malformed_json_is_server_error() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/embed")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_requires_json_content_type() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/embed")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(json!({"text": "hello"}).to_string()))
        .unwrap();

    let (status, _, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Content-Type must be application/json"}));
    assert!(app.store.saved.lock().unwrap().is_empty());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/search")
        .body(Body::from(json!({"text": "hello"}).to_string()))
        .unwrap();
    let (status, _, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let app = test_app_with(
        MockStore::default(),
        false,
        RateLimitConfig {
            max_requests: 2,
            window_duration: Duration::from_secs(60),
            enabled: true,
        },
        10_000,
    );

    let health = |client: &'static str| {
        Request::builder()
            .uri("/health")
            .header("x-forwarded-for", client)
            .body(Body::empty())
            .unwrap()
    };

    for _ in 0..2 {
        let (status, _, _) = send(&app.router, health("10.0.0.1")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, headers, body) = send(&app.router, health("10.0.0.1")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({"error": "Too many requests", "retryAfter": 60}));
    assert_eq!(headers.get(header::RETRY_AFTER).unwrap(), "60");
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");

    let (status, _, _) = send(&app.router, health("10.0.0.2")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let app = test_app();

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, headers, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
}

#[tokio::test]
async fn test_cors_preflight_is_permissive() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/embed")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
}

#[tokio::test]
async fn test_rate_limited_embed_is_not_processed() {
    let app = test_app_with(
        MockStore::default(),
        false,
        RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            enabled: true,
        },
        10_000,
    );

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app.router, post_json("/embed", json!({"text": "hello"}))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests");
    assert!(app.store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_restricted_to_allowed_origins() {
    let app = test_app_with_origins(
        MockStore::default(),
        false,
        RateLimitConfig::default(),
        10_000,
        &["https://a.example".to_string()],
    );

    let from_origin = |origin: &'static str| {
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    };

    let (status, headers, _) = send(&app.router, from_origin("https://a.example")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://a.example"
    );

    let (status, headers, _) = send(&app.router, from_origin("https://b.example")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
