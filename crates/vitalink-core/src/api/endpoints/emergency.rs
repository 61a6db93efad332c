use reqwest::Method;
use tracing::warn;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    EmergencyContact, EmergencyEvent, EmergencyInfo, NewEmergencyContact, SosRequest,
};

impl ApiClient {
    /// Signal an emergency for the logged-in user.
    pub async fn trigger_sos(&self, request: &SosRequest) -> Result<EmergencyEvent, ApiError> {
        let event: EmergencyEvent = self.post(&["emergency", "sos"], request).await?;
        warn!(event_id = %event.id, "SOS triggered");
        Ok(event)
    }

    pub async fn list_emergency_events(&self) -> Result<Vec<EmergencyEvent>, ApiError> {
        self.get(&["emergency", "events"]).await
    }

    pub async fn resolve_emergency_event(&self, id: &str) -> Result<EmergencyEvent, ApiError> {
        self.request_json::<_, ()>(Method::POST, &["emergency", "events", id, "resolve"], None)
            .await
    }

    pub async fn list_emergency_contacts(&self) -> Result<Vec<EmergencyContact>, ApiError> {
        self.get(&["emergency", "contacts"]).await
    }

    pub async fn add_emergency_contact(
        &self,
        contact: &NewEmergencyContact,
    ) -> Result<EmergencyContact, ApiError> {
        self.post(&["emergency", "contacts"], contact).await
    }

    pub async fn delete_emergency_contact(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["emergency", "contacts", id]).await
    }

    /// Public emergency card for a user.
    pub async fn emergency_info(&self, user_id: &str) -> Result<EmergencyInfo, ApiError> {
        self.get(&["emergency", "info", user_id]).await
    }
}
