//! Gateway tests against a mock API server.
//!
//! These use wiremock to check header attachment and the 401/403 recovery
//! path without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use reqwest::header::{self, HeaderValue};
use reqwest::Method;
use serde_json::json;
use vitalink_core::{
    ApiError, AuthFailure, AuthFailureHandler, Gateway, MemorySessionStore, RequestOptions,
    ResponseCache, SessionStore,
};
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(Default)]
struct RecordingHandler {
    failures: Mutex<Vec<AuthFailure>>,
}

impl AuthFailureHandler for RecordingHandler {
    fn on_auth_failure(&self, failure: &AuthFailure) {
        self.failures.lock().unwrap().push(failure.clone());
    }
}

#[derive(Default)]
struct CountingCache {
    clears: AtomicUsize,
}

impl ResponseCache for CountingCache {
    fn clear(&self) -> anyhow::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Harness {
    server: MockServer,
    store: Arc<MemorySessionStore>,
    handler: Arc<RecordingHandler>,
    cache: Arc<CountingCache>,
    gateway: Gateway,
}

async fn harness(token: Option<&str>) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(match token {
        Some(t) => MemorySessionStore::with_token(t),
        None => MemorySessionStore::new(),
    });
    let handler = Arc::new(RecordingHandler::default());
    let cache = Arc::new(CountingCache::default());
    let gateway = Gateway::new(store.clone())
        .unwrap()
        .with_cache(cache.clone())
        .with_auth_failure_handler(handler.clone());
    Harness {
        server,
        store,
        handler,
        cache,
        gateway,
    }
}

fn url(server: &MockServer, p: &str) -> String {
    format!("{}{}", server.uri(), p)
}

fn received_authorization(requests: &[Request]) -> Vec<Option<String>> {
    requests
        .iter()
        .map(|r| {
            r.headers
                .get("authorization")
                .map(|v| v.to_str().unwrap().to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_no_credential_sends_no_authorization() {
    let h = harness(None).await;
    Mock::given(method("GET"))
        .and(path("/share/public/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&h.server)
        .await;

    let response = h
        .gateway
        .send(&url(&h.server, "/share/public/abc"), RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(received_authorization(&requests), vec![None]);
}

#[tokio::test]
async fn test_credential_sent_as_bearer() {
    let h = harness(Some("abc123")).await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header_eq("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Jane"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let response = h
        .gateway
        .send(&url(&h.server, "/profile"), RequestOptions::default())
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();

    assert_eq!(body, json!({"name": "Jane"}));
    assert_eq!(h.store.token().as_deref(), Some("abc123"));
    assert!(h.handler.failures.lock().unwrap().is_empty());
    assert_eq!(h.cache.clears.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_json_body_and_content_type() {
    let h = harness(None).await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header_eq("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&h.server)
        .await;

    let options = RequestOptions::new(Method::POST)
        .json(&json!({"email": "jane@example.com", "password": "pw"}))
        .unwrap();
    h.gateway
        .send(&url(&h.server, "/auth/login"), options)
        .await
        .unwrap();

    let requests = h.server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["email"], "jane@example.com");
}

#[tokio::test]
async fn test_caller_content_type_overrides_default() {
    let h = harness(None).await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header_eq("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let options = RequestOptions::new(Method::POST)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    let response = h
        .gateway
        .send(&url(&h.server, "/upload"), options)
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_401_clears_session_and_signals_login() {
    let h = harness(Some("abc123")).await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .send(&url(&h.server, "/profile"), RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthenticationFailed { status: 401 }));
    assert_eq!(err.status(), Some(401));
    assert_eq!(h.store.token(), None);
    assert_eq!(
        *h.handler.failures.lock().unwrap(),
        vec![AuthFailure {
            status: 401,
            redirect_to: "/login".to_string()
        }]
    );
    assert_eq!(h.cache.clears.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_403_is_treated_as_auth_failure() {
    let h = harness(Some("abc123")).await;
    Mock::given(method("DELETE"))
        .and(path("/documents/d1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .send(&url(&h.server, "/documents/d1"), RequestOptions::new(Method::DELETE))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthenticationFailed { status: 403 }));
    assert!(!h.store.has_token());
    assert_eq!(h.handler.failures.lock().unwrap().len(), 1);
    assert_eq!(h.cache.clears.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_auth_failure_without_credential_still_signals() {
    let h = harness(None).await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .send(&url(&h.server, "/profile"), RequestOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_auth_failure());
    assert_eq!(h.handler.failures.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_custom_login_path() {
    let h = harness(Some("abc123")).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let gateway = h.gateway.clone().with_login_path("/auth/sign-in");
    let _ = gateway
        .send(&url(&h.server, "/profile"), RequestOptions::default())
        .await;

    let failures = h.handler.failures.lock().unwrap();
    assert_eq!(failures[0].redirect_to, "/auth/sign-in");
}

#[tokio::test]
async fn test_other_errors_returned_raw() {
    let h = harness(Some("abc123")).await;
    Mock::given(method("GET"))
        .and(path("/documents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&h.server)
        .await;

    let response = h
        .gateway
        .send(&url(&h.server, "/documents/missing"), RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(h.store.token().as_deref(), Some("abc123"));
    assert!(h.handler.failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let store = Arc::new(MemorySessionStore::with_token("abc123"));
    let handler = Arc::new(RecordingHandler::default());
    let gateway = Gateway::new(store.clone())
        .unwrap()
        .with_auth_failure_handler(handler.clone());

    // Nothing listens on port 9 (discard) in the test environment.
    let err = gateway
        .send("http://127.0.0.1:9/profile", RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(store.token().as_deref(), Some("abc123"));
    assert!(handler.failures.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_closure_handler() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let signals = Arc::new(AtomicUsize::new(0));
    let counter = signals.clone();
    let gateway = Gateway::new(Arc::new(MemorySessionStore::with_token("abc123")))
        .unwrap()
        .with_auth_failure_handler(Arc::new(move |_: &AuthFailure| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    let _ = gateway
        .send(&format!("{}/profile", server.uri()), RequestOptions::default())
        .await;
    assert_eq!(signals.load(Ordering::SeqCst), 1);
}

/// A keychain-like store whose delete always fails.
struct LockedStore;

impl SessionStore for LockedStore {
    fn token(&self) -> Option<String> {
        Some("abc123".to_string())
    }

    fn set_token(&self, _token: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("keychain locked"))
    }
}

struct BrokenCache;

impl ResponseCache for BrokenCache {
    fn clear(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("cache directory is read-only"))
    }
}

#[tokio::test]
async fn test_store_clear_error_still_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let handler = Arc::new(RecordingHandler::default());
    let cache = Arc::new(CountingCache::default());
    let gateway = Gateway::new(Arc::new(LockedStore))
        .unwrap()
        .with_cache(cache.clone())
        .with_auth_failure_handler(handler.clone());

    let err = gateway
        .send(&url(&server, "/profile"), RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthenticationFailed { status: 401 }));
    assert_eq!(cache.clears.load(Ordering::SeqCst), 1);
    assert_eq!(handler.failures.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cache_clear_error_still_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/documents"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::with_token("abc123"));
    let handler = Arc::new(RecordingHandler::default());
    let gateway = Gateway::new(store.clone())
        .unwrap()
        .with_cache(Arc::new(BrokenCache))
        .with_auth_failure_handler(handler.clone());

    let err = gateway
        .send(&url(&server, "/documents"), RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::AuthenticationFailed { status: 403 }));
    assert_eq!(store.token(), None);
    assert_eq!(
        *handler.failures.lock().unwrap(),
        vec![AuthFailure {
            status: 403,
            redirect_to: "/login".to_string()
        }]
    );
}
