//! File upload, listing and download endpoints

use conex_domain::constants::FILES;
use conex_domain::{Ack, FileListing, SingleUpload, UploadResult};
use tracing::{info, instrument};

use super::body::{Blob, FilePart, MultipartForm, RequestBody};
use super::client::ApiClient;
use super::errors::ApiError;
use super::{path_segment, with_query};

/// `/api/v1/files` endpoints
#[derive(Debug, Clone, Copy)]
pub struct FilesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FilesApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload several files, optionally grouped under a folder
    ///
    /// Files the backend rejects are reported in `UploadResult::errors`
    /// while the rest are stored.
    ///
    /// # Errors
    /// `Http` 400 when no file was accepted, otherwise see
    /// [`ApiClient::make_request`]
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_multiple(
        &self,
        files: Vec<FilePart>,
        folder_name: Option<&str>,
    ) -> Result<UploadResult, ApiError> {
        let mut form = MultipartForm::new();
        for file in files {
            form = form.file("files", file);
        }
        if let Some(folder) = folder_name.filter(|f| !f.is_empty()) {
            form = form.text("folder_name", folder);
        }

        let result: UploadResult = self
            .client
            .post(&format!("{FILES}/upload-multiple"), RequestBody::Multipart(form))
            .await?;
        info!(
            uploaded = result.uploaded_files.len(),
            rejected = result.errors.len(),
            "Files uploaded"
        );
        Ok(result)
    }

    /// Upload one file
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    #[instrument(skip(self, file), fields(file_name = %file.file_name))]
    pub async fn upload(
        &self,
        file: FilePart,
        folder_name: Option<&str>,
    ) -> Result<SingleUpload, ApiError> {
        let endpoint = match folder_name.filter(|f| !f.is_empty()) {
            Some(folder) => with_query(&format!("{FILES}/upload"), &[("folder_name", folder)]),
            None => format!("{FILES}/upload"),
        };
        let form = MultipartForm::new().file("file", file);
        self.client.post(&endpoint, RequestBody::Multipart(form)).await
    }

    /// One page of the user's individual files and folders
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn list_items(
        &self,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<FileListing, ApiError> {
        let (page, limit) = (page.to_string(), limit.to_string());
        let endpoint = with_query(
            &format!("{FILES}/user/{}/items", path_segment(user_id)),
            &[("page", page.as_str()), ("limit", limit.as_str())],
        );
        self.client.get(&endpoint).await
    }

    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn delete(&self, file_id: &str) -> Result<Ack, ApiError> {
        self.client.delete(&format!("{FILES}/{}", path_segment(file_id))).await
    }

    /// Delete a folder together with its files
    ///
    /// # Errors
    /// See [`ApiClient::make_request`]
    pub async fn delete_folder(&self, folder_name: &str) -> Result<Ack, ApiError> {
        self.client.delete(&format!("{FILES}/folder/{}", path_segment(folder_name))).await
    }

    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn serve(&self, file_id: &str) -> Result<Blob, ApiError> {
        self.client.serve_file(file_id).await
    }

    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn view(&self, file_id: &str) -> Result<Blob, ApiError> {
        self.client.view_file(file_id).await
    }

    /// # Errors
    /// See [`ApiClient::fetch_blob`]
    pub async fn download(&self, file_id: &str) -> Result<Blob, ApiError> {
        self.client.download_file(file_id).await
    }
}
