//! OCR conversion job endpoints

use conex_domain::constants::CONVERSION;
use conex_domain::{Ack, ConversionJob, ConversionProgress, ConversionRequest, ConversionStarted, JobList};
use tracing::{info, instrument};

use super::body::RequestBody;
use super::client::ApiClient;
use super::errors::ApiError;
use super::path_segment;

/// `/api/v1/conversion` endpoints
#[derive(Debug, Clone, Copy)]
pub struct ConversionApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ConversionApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Start one job covering all files of the request
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    #[instrument(skip_all)]
    pub async fn start(&self, request: &ConversionRequest) -> Result<ConversionStarted, ApiError> {
        self.start_at("start", request).await
    }

    /// Start one job per file
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    #[instrument(skip_all)]
    pub async fn start_with_files(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionStarted, ApiError> {
        self.start_at("start-with-files", request).await
    }

    /// Start one job per folder
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    #[instrument(skip_all)]
    pub async fn start_with_folders(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionStarted, ApiError> {
        self.start_at("start-with-folders", request).await
    }

    async fn start_at(
        &self,
        action: &str,
        request: &ConversionRequest,
    ) -> Result<ConversionStarted, ApiError> {
        let started: ConversionStarted = self
            .client
            .post(&format!("{CONVERSION}/{action}"), RequestBody::json(request)?)
            .await?;
        info!(
            action,
            jobs = usize::from(started.job.is_some()) + started.jobs.len(),
            "Conversion started"
        );
        Ok(started)
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn job(&self, job_id: &str) -> Result<ConversionJob, ApiError> {
        self.client.get(&format!("{CONVERSION}/{}", path_segment(job_id))).await
    }

    /// Progress snapshot for polling
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn status(&self, job_id: &str) -> Result<ConversionProgress, ApiError> {
        self.client.get(&format!("{CONVERSION}/{}/status", path_segment(job_id))).await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<ConversionJob>, ApiError> {
        let list: JobList =
            self.client.get(&format!("{CONVERSION}/user/{}", path_segment(user_id))).await?;
        Ok(list.jobs)
    }

    /// Re-run a failed or cancelled job
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn retry(&self, job_id: &str) -> Result<Ack, ApiError> {
        self.client
            .post(&format!("{CONVERSION}/{}/retry", path_segment(job_id)), RequestBody::Empty)
            .await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn cancel(&self, job_id: &str) -> Result<Ack, ApiError> {
        self.client
            .post(&format!("{CONVERSION}/{}/cancel", path_segment(job_id)), RequestBody::Empty)
            .await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn delete(&self, job_id: &str) -> Result<Ack, ApiError> {
        self.client.delete(&format!("{CONVERSION}/{}", path_segment(job_id))).await
    }
}
