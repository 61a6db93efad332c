use reqwest::header::{self, HeaderValue};
use reqwest::Method;
use tracing::debug;

use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::export::ExportFormat;

impl ApiClient {
    /// Download the user's records in the given format.
    pub async fn export_records(&self, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        let options = RequestOptions::new(Method::GET)
            .header(header::ACCEPT, HeaderValue::from_static(format.mime_type()));
        let bytes = self
            .request_bytes(&["export", format.path_segment()], options)
            .await?;
        debug!(format = format.path_segment(), size = bytes.len(), "Export downloaded");
        Ok(bytes)
    }
}
