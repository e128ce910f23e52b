//! Uploaded file types

use serde::{Deserialize, Serialize};

/// File record as returned right after upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response of `/files/upload-multiple`
///
/// Partial success is normal: files rejected by the backend (size, type) are
/// listed in `errors` while the rest are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Response of the single-file `/files/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUpload {
    #[serde(default)]
    pub success: bool,
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub folder_name: Option<String>,
}

/// File entry in the paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub upload_date: Option<String>,
}

/// Folder entry in the paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    pub name: String,
    #[serde(default)]
    pub file_count: usize,
    #[serde(default)]
    pub files: Vec<FileItem>,
    #[serde(default)]
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Response of `/files/user/{id}/items`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListing {
    #[serde(default)]
    pub individual_files: Vec<FileItem>,
    #[serde(default)]
    pub folders: Vec<FolderItem>,
    #[serde(default)]
    pub total_individual_files: usize,
    #[serde(default)]
    pub total_folders: usize,
    #[serde(default)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_result_keeps_partial_errors() {
        let result: UploadResult = serde_json::from_value(serde_json::json!({
            "success": true,
            "uploadedFiles": [{
                "id": "f1",
                "filename": "0b9e.pdf",
                "originalName": "catalogue.pdf",
                "mimeType": "application/pdf",
                "size": 2048,
                "folderName": "spring"
            }],
            "folderName": "spring",
            "totalFiles": 1,
            "errors": ["File movie.mp4 has unsupported type"]
        }))
        .unwrap();

        assert_eq!(result.uploaded_files[0].original_name, "catalogue.pdf");
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn listing_defaults_missing_sections() {
        let listing: FileListing = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(listing.folders.is_empty());
        assert_eq!(listing.pagination, Pagination::default());
    }
}
