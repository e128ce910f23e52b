//! Extracted product record endpoints

use conex_domain::constants::DATA;
use conex_domain::{Ack, CsvFormat, ExtractedRecord, RecordList, RecordUpdate};
use tracing::{debug, instrument};

use super::body::{Blob, RequestBody};
use super::client::ApiClient;
use super::errors::ApiError;
use super::{path_segment, with_query};

/// `/api/v1/data` endpoints
#[derive(Debug, Clone, Copy)]
pub struct DataApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DataApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<ExtractedRecord>, ApiError> {
        let (skip, limit) = (skip.to_string(), limit.to_string());
        let endpoint = with_query(DATA, &[("skip", skip.as_str()), ("limit", limit.as_str())]);
        let list: RecordList = self.client.get(&endpoint).await?;
        debug!(count = list.data.len(), "Records listed");
        Ok(list.data)
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn get(&self, record_id: &str) -> Result<ExtractedRecord, ApiError> {
        self.client.get(&format!("{DATA}/{}", path_segment(record_id))).await
    }

    /// Save edits to a record; only the fields set in `update` are sent
    ///
    /// # Errors
    /// Returns `ApiError::Encode` for an empty update, otherwise see
    /// [`ApiClient::make_request`]
    #[instrument(skip(self, update))]
    pub async fn update(&self, record_id: &str, update: &RecordUpdate) -> Result<Ack, ApiError> {
        if update.is_empty() {
            return Err(ApiError::Encode("record update has no fields set".to_string()));
        }
        self.client
            .put(&format!("{DATA}/{}", path_segment(record_id)), RequestBody::json(update)?)
            .await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn delete(&self, record_id: &str) -> Result<Ack, ApiError> {
        self.client.delete(&format!("{DATA}/{}", path_segment(record_id))).await
    }

    /// Mark a record as reviewed
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    #[instrument(skip(self, notes))]
    pub async fn validate(&self, record_id: &str, notes: Option<&str>) -> Result<Ack, ApiError> {
        let path = format!("{DATA}/{}/validate", path_segment(record_id));
        let endpoint = match notes {
            Some(notes) => with_query(&path, &[("validation_notes", notes)]),
            None => path,
        };
        self.client.post(&endpoint, RequestBody::Empty).await
    }

    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn export_csv(&self, format: CsvFormat) -> Result<Blob, ApiError> {
        self.client.export_data_to_csv(format).await
    }
}
