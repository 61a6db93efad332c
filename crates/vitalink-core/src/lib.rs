//! Core library for the Vitalink health-records client.
//!
//! - `api`: the authenticated request gateway and typed endpoint bindings
//! - `auth`: session credential storage and the auth-failure port
//! - `cache`: on-disk response cache cleared on authentication failure
//! - `config`: environment and persisted configuration
//! - `export`: helpers for saving export blobs
//! - `images`: remote image source allowlist
//! - `models`: request/response types for the REST API

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod export;
pub mod images;
pub mod models;

pub use api::{ApiClient, ApiError, Gateway, RequestOptions};
pub use auth::{
    AuthFailure, AuthFailureHandler, FileSessionStore, KeyringSessionStore, MemorySessionStore,
    SessionStore,
};
pub use cache::{CacheManager, ResponseCache};
pub use config::{ClientConfig, Config, FeatureFlags};
