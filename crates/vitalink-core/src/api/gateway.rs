//! Authenticated request gateway.
//!
//! Every outbound call goes through [`Gateway::send`], which attaches the
//! stored bearer token and handles 401/403 in one place: the credential is
//! cleared, the response cache is emptied, the auth-failure handler is told
//! to navigate to the login route, and the call fails with
//! [`ApiError::AuthenticationFailed`]. Any other response is handed back
//! untouched. There is no retry loop.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::{AuthFailure, AuthFailureHandler, SessionStore, DEFAULT_LOGIN_PATH};
use crate::cache::ResponseCache;

use super::ApiError;

/// HTTP request timeout used when the configuration does not provide one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Method, body and headers for a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Wraps outbound HTTP calls with bearer-token attachment and
/// centralized authentication-failure recovery.
///
/// Clone is cheap: the reqwest client and the injected ports are shared.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    session: Arc<dyn SessionStore>,
    cache: Option<Arc<dyn ResponseCache>>,
    auth_failure_handler: Option<Arc<dyn AuthFailureHandler>>,
    login_path: String,
}

impl Gateway {
    /// Create a gateway with the default transport timeout.
    pub fn new(session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Self::with_timeout(session, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(session: Arc<dyn SessionStore>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, session))
    }

    /// Create a gateway around an existing client, sharing its connection pool.
    pub fn with_client(client: Client, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            session,
            cache: None,
            auth_failure_handler: None,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Response cache to clear when the session is rejected.
    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Handler told to navigate to the login route when the session is rejected.
    pub fn with_auth_failure_handler(mut self, handler: Arc<dyn AuthFailureHandler>) -> Self {
        self.auth_failure_handler = Some(handler);
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Issue one request, attaching the session credential when present.
    ///
    /// Returns the raw response for any status other than 401/403; the
    /// caller decides what the remaining statuses mean. Network failures
    /// come back as [`ApiError::Transport`].
    pub async fn send(&self, url: &str, options: RequestOptions) -> Result<Response, ApiError> {
        let headers = self.build_headers(&options.headers)?;

        let mut request = self.client.request(options.method.clone(), url).headers(headers);
        if let Some(ref body) = options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        debug!(method = %options.method, url = url, "Sending request");
        let response = request.send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            self.recover_from_auth_failure(status.as_u16());
            return Err(ApiError::AuthenticationFailed {
                status: status.as_u16(),
            });
        }

        debug!(status = status.as_u16(), url = url, "Received response");
        Ok(response)
    }

    /// Merge default, caller and auth headers.
    ///
    /// Content-Type defaults to JSON and may be overridden by the caller.
    /// Authorization is owned by the gateway: it is set from the session
    /// store and never taken from the caller.
    fn build_headers(&self, caller: &HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        for name in caller.keys() {
            headers.remove(name);
        }
        for (name, value) in caller.iter() {
            if *name != header::AUTHORIZATION {
                headers.append(name.clone(), value.clone());
            }
        }

        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn recover_from_auth_failure(&self, status: u16) {
        warn!(status = status, redirect_to = %self.login_path, "Session rejected by server, logging out");

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session credential");
        }

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.clear() {
                warn!(error = %e, "Failed to clear response cache");
            }
        }

        if let Some(ref handler) = self.auth_failure_handler {
            handler.on_auth_failure(&AuthFailure {
                status,
                redirect_to: self.login_path.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;

    fn gateway(token: Option<&str>) -> Gateway {
        let store = match token {
            Some(t) => MemorySessionStore::with_token(t),
            None => MemorySessionStore::new(),
        };
        Gateway::with_client(Client::new(), Arc::new(store))
    }

    #[test]
    fn test_build_headers_without_token() {
        let headers = gateway(None).build_headers(&HeaderMap::new()).unwrap();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_build_headers_with_token() {
        let headers = gateway(Some("abc123")).build_headers(&HeaderMap::new()).unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_build_headers_caller_overrides_content_type() {
        let mut caller = HeaderMap::new();
        caller.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        caller.insert(header::ACCEPT, HeaderValue::from_static("application/pdf"));

        let headers = gateway(None).build_headers(&caller).unwrap();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "application/pdf");
        assert_eq!(headers.get_all(header::CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn test_build_headers_ignores_caller_authorization() {
        let mut caller = HeaderMap::new();
        caller.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer forged"));

        let without = gateway(None).build_headers(&caller).unwrap();
        assert!(without.get(header::AUTHORIZATION).is_none());

        let with = gateway(Some("abc123")).build_headers(&caller).unwrap();
        assert_eq!(with.get(header::AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_request_options_json_body() {
        let options = RequestOptions::new(Method::POST)
            .json(&serde_json::json!({"email": "jane@example.com"}))
            .unwrap();
        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body.unwrap()["email"], "jane@example.com");
    }
}
