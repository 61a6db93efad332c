use serde_json::json;

use crate::api::{ApiClient, ApiError};
use crate::models::{CreateShareLink, MessageResponse, ShareAccess, ShareLink, SharedProfile};

impl ApiClient {
    pub async fn create_share_link(&self, request: &CreateShareLink) -> Result<ShareLink, ApiError> {
        self.post(&["share"], request).await
    }

    pub async fn list_share_links(&self) -> Result<Vec<ShareLink>, ApiError> {
        self.get(&["share"]).await
    }

    pub async fn revoke_share_link(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["share", id]).await
    }

    // ===== Public share access =====

    /// Fetch shared data for an ungated link.
    pub async fn get_shared(&self, token: &str) -> Result<SharedProfile, ApiError> {
        self.get(&["share", "public", token]).await
    }

    pub async fn verify_share_password(
        &self,
        token: &str,
        password: &str,
    ) -> Result<ShareAccess, ApiError> {
        self.post(
            &["share", "public", token, "verify-password"],
            &json!({ "password": password }),
        )
        .await
    }

    /// Ask the server to send a one-time code for an OTP-gated link.
    pub async fn request_share_otp(&self, token: &str) -> Result<MessageResponse, ApiError> {
        self.post(&["share", "public", token, "request-otp"], &json!({}))
            .await
    }

    pub async fn verify_share_otp(&self, token: &str, otp: &str) -> Result<ShareAccess, ApiError> {
        self.post(&["share", "public", token, "verify-otp"], &json!({ "otp": otp }))
            .await
    }
}
