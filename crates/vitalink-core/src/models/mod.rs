//! Data models for the Vitalink REST API.
//!
//! - `User`, `AuthResponse`, `LoginRequest`, `RegisterRequest`: accounts
//! - `Profile`, `ProfileUpdate`: the user's medical profile
//! - `Document`, `HealthRecord`: stored records and their create payloads
//! - Emergency types: `SosRequest`, `EmergencyEvent`, `EmergencyContact`, ...
//! - Share types: `ShareLink`, `CreateShareLink`, `SharedProfile`, ...

pub mod account;
pub mod emergency;
pub mod profile;
pub mod record;
pub mod share;

pub use account::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, User};
pub use emergency::{
    EmergencyContact, EmergencyEvent, EmergencyEventStatus, EmergencyInfo, GeoPoint,
    NewEmergencyContact, SosRequest,
};
pub use profile::{Profile, ProfileUpdate};
pub use record::{Document, HealthRecord, NewDocument, NewHealthRecord};
pub use share::{CreateShareLink, ShareAccess, ShareLink, SharedProfile};
