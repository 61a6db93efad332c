//! Endpoint bindings, one `impl ApiClient` block per API area.
//!
//! Each method issues exactly one request through the gateway. Methods
//! marked public do not need a session; they still send the token when
//! one is stored.

mod account;
mod emergency;
mod export;
mod profile;
mod records;
mod share;
