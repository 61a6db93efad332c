use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmergencyContact, Profile};

/// A public link to the user's profile, optionally password/OTP gated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub id: String,
    pub token: String,
    pub url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub requires_password: bool,
    #[serde(default)]
    pub requires_otp: bool,
    #[serde(default)]
    pub views: u32,
}

impl ShareLink {
    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|t| t <= Utc::now()).unwrap_or(false)
    }

    /// Public URL for the link, falling back to `<frontend>/share/<token>`.
    pub fn public_url(&self, frontend_url: &str) -> String {
        match self.url {
            Some(ref url) => url.clone(),
            None => format!("{}/share/{}", frontend_url.trim_end_matches('/'), self.token),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub require_otp: bool,
    pub emergency_only: bool,
}

/// Data returned for a share token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedProfile {
    pub profile: Profile,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of a password or OTP check on a share link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAccess {
    #[serde(default)]
    pub verified: bool,
    pub data: Option<SharedProfile>,
    pub message: Option<String>,
}
