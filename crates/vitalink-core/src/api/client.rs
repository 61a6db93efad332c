//! API client for the Vitalink REST API.
//!
//! `ApiClient` joins endpoint paths onto the configured base URL, sends
//! them through the [`Gateway`] and unwraps the responses. The endpoint
//! methods themselves live in [`super::endpoints`], one file per area.

use std::sync::Arc;

use reqwest::{Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::SessionStore;
use crate::config::ClientConfig;

use super::{ApiError, Gateway, RequestOptions};

/// API client for Vitalink.
/// Clone is cheap - the gateway shares its connection pool and ports.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Gateway,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured API, with a fresh gateway.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let gateway = Gateway::with_timeout(session, config.timeout())?;
        Self::with_gateway(&config.api_url, gateway)
    }

    /// Create a client around an existing gateway.
    pub fn with_gateway(base_url: &str, gateway: Gateway) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { gateway, base_url })
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.gateway.session()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().has_token()
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and fail on any non-success status.
    async fn execute(&self, segments: &[&str], options: RequestOptions) -> Result<Response, ApiError> {
        let url = self.endpoint_url(segments)?;
        let response = self.gateway.send(url.as_str(), options).await?;
        Self::check_response(response).await
    }

    /// Check if response is successful, returning an error with the
    /// server's message if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // An unreadable body is treated like an empty one.
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %ApiError::truncate_body(&body), "Request failed");
        Err(ApiError::from_status(status, &body))
    }

    /// Send a request with an optional JSON body and parse the JSON response.
    pub async fn request_json<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut options = RequestOptions::new(method);
        if let Some(body) = body {
            options = options.json(body)?;
        }
        let response = self.execute(segments, options).await?;
        let url = response.url().to_string();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    /// Send a request whose response body is ignored.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut options = RequestOptions::new(method);
        if let Some(body) = body {
            options = options.json(body)?;
        }
        self.execute(segments, options).await?;
        Ok(())
    }

    /// Send a request and return the raw response bytes (file downloads).
    pub async fn request_bytes(
        &self,
        segments: &[&str],
        options: RequestOptions,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(segments, options).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.request_json::<T, ()>(Method::GET, segments, None).await
    }

    pub(crate) async fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::POST, segments, Some(body)).await
    }

    pub(crate) async fn put<T, B>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::PUT, segments, Some(body)).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.request_empty::<()>(Method::DELETE, segments, None).await
    }
}
