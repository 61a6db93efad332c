//! Local response cache for offline display.
//!
//! `CacheManager` stores API responses as JSON files, each stamped with the
//! time it was cached. Data is considered stale after 60 minutes. The cache
//! implements `ResponseCache` so the gateway can wipe it when the session
//! is rejected.

pub mod manager;

pub use manager::{CacheManager, CachedData, ResponseCache};
