//! REST API client module for the Vitalink service.
//!
//! `Gateway` wraps every outbound request with bearer-token attachment and
//! centralized 401/403 recovery. `ApiClient` binds one method per endpoint
//! on top of it and unwraps the JSON (or binary) responses.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod gateway;

pub use client::ApiClient;
pub use error::ApiError;
pub use gateway::{Gateway, RequestOptions};
