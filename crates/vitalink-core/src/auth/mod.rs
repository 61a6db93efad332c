//! Authentication module for managing the session credential.
//!
//! This module provides:
//! - `SessionStore`: the single bearer-token slot, injected into the gateway
//! - `MemorySessionStore`, `FileSessionStore`, `KeyringSessionStore`: stores
//! - `AuthFailureHandler`: the port notified when a request returns 401/403

pub mod credentials;
pub mod failure;
pub mod session;
pub mod store;

pub use credentials::KeyringSessionStore;
pub use failure::{AuthFailure, AuthFailureHandler, DEFAULT_LOGIN_PATH};
pub use session::{FileSessionStore, SessionData};
pub use store::{MemorySessionStore, SessionStore, TOKEN_KEY};
