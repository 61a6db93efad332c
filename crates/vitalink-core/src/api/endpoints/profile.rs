use crate::api::{ApiClient, ApiError};
use crate::models::{Profile, ProfileUpdate};

impl ApiClient {
    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.get(&["profile"]).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.put(&["profile"], update).await
    }
}
