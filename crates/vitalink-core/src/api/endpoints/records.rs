use crate::api::{ApiClient, ApiError};
use crate::models::{Document, HealthRecord, NewDocument, NewHealthRecord};

impl ApiClient {
    // ===== Documents =====

    pub async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get(&["documents"]).await
    }

    pub async fn get_document(&self, id: &str) -> Result<Document, ApiError> {
        self.get(&["documents", id]).await
    }

    pub async fn create_document(&self, document: &NewDocument) -> Result<Document, ApiError> {
        self.post(&["documents"], document).await
    }

    pub async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["documents", id]).await
    }

    // ===== Health Records =====

    pub async fn list_health_records(&self) -> Result<Vec<HealthRecord>, ApiError> {
        self.get(&["health-records"]).await
    }

    pub async fn create_health_record(
        &self,
        record: &NewHealthRecord,
    ) -> Result<HealthRecord, ApiError> {
        self.post(&["health-records"], record).await
    }

    pub async fn delete_health_record(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&["health-records", id]).await
    }
}
