//! Request bodies and raw response payloads
//!
//! Bodies are kept as owned data rather than reqwest builders so a request
//! can be rebuilt for the retry after a token refresh; reqwest multipart
//! forms are single-use.

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::Serialize;

use super::errors::ApiError;

/// Body of an API request
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized as `application/json`
    Json(serde_json::Value),
    /// Serialized as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// Serialized as `multipart/form-data`; the boundary is set by reqwest
    Multipart(MultipartForm),
}

impl RequestBody {
    /// JSON body from any serializable value
    ///
    /// # Errors
    /// Returns `ApiError::Encode` if `value` cannot be represented as JSON
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value).map(Self::Json).map_err(|e| ApiError::Encode(e.to_string()))
    }

    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Re-encode a flat JSON object as form fields. Other bodies are returned
    /// unchanged.
    fn into_form(self) -> Self {
        match self {
            Self::Json(serde_json::Value::Object(map)) => Self::Form(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| {
                        let value = match v {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (k, value)
                    })
                    .collect(),
            ),
            other => other,
        }
    }

    /// Attach the body to a request.
    ///
    /// `force_form` switches JSON objects to form encoding, which the OAuth2
    /// password login endpoint requires.
    pub(crate) fn apply(
        &self,
        builder: RequestBuilder,
        force_form: bool,
    ) -> Result<RequestBuilder, ApiError> {
        let body = if force_form { self.clone().into_form() } else { self.clone() };
        Ok(match body {
            Self::Empty => builder,
            Self::Json(value) => builder.json(&value),
            Self::Form(pairs) => builder.form(&pairs),
            Self::Multipart(form) => builder.multipart(form.to_reqwest()?),
        })
    }
}

/// File attached to a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), content_type: None, bytes: bytes.into() }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing the MIME type from the extension.
    ///
    /// # Errors
    /// Returns `ApiError::Encode` if the file cannot be read
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Encode(format!("Failed to read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let content_type = guess_mime(&file_name).map(str::to_string);
        Ok(Self { file_name, content_type, bytes })
    }
}

/// Multipart form kept in a rebuildable shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, MultipartValue)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MultipartValue {
    Text(String),
    File(FilePart),
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), MultipartValue::Text(value.into())));
        self
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.fields.push((name.into(), MultipartValue::File(file)));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn to_reqwest(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = match value {
                MultipartValue::Text(text) => form.text(name.clone(), text.clone()),
                MultipartValue::File(file) => {
                    let mut part =
                        Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                    if let Some(content_type) = &file.content_type {
                        part = part.mime_str(content_type).map_err(|e| {
                            ApiError::Encode(format!("Invalid content type {content_type}: {e}"))
                        })?;
                    }
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Raw response of a file or CSV download
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// From `Content-Disposition`, when the backend sends one
    pub filename: Option<String>,
}

impl Blob {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Body as UTF-8 text, with a leading BOM stripped (the CSV export
    /// prepends one for spreadsheet applications).
    #[must_use]
    pub fn text_lossy(&self) -> String {
        let bytes = self.bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(&self.bytes);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blob")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish()
    }
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*` form, which carries non-ASCII names.
pub(crate) fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let value = value.trim().trim_matches('"');
                let encoded = value.split_once("''").map_or(value, |(_, rest)| rest);
                if let Ok(decoded) = urlencoding::decode(encoded) {
                    return Some(decoded.into_owned());
                }
            }
            "filename" => {
                plain = Some(value.trim().trim_matches('"').to_string());
            }
            _ => {}
        }
    }
    plain.filter(|name| !name.is_empty())
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    Some(match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    })
}
