//! Backend API client
//!
//! [`ApiClient`] owns the session tokens and the request pipeline; the
//! endpoint groups ([`FilesApi`], [`ConversionApi`], [`DataApi`],
//! [`CompaniesApi`], [`BillingApi`]) are borrowed views that route every call
//! through it.

pub mod billing;
pub mod body;
pub mod client;
pub mod companies;
pub mod conversion;
pub mod data;
pub mod errors;
pub mod files;

use std::borrow::Cow;

pub use billing::BillingApi;
pub use body::{Blob, FilePart, MultipartForm, RequestBody};
pub use client::{ApiClient, ApiClientBuilder};
pub use companies::CompaniesApi;
pub use conversion::ConversionApi;
pub use data::DataApi;
pub use errors::{ApiError, ApiErrorCategory};
pub use files::FilesApi;

/// Percent-encode a value used as a single path segment (folder names are
/// free text and often Japanese).
pub(crate) fn path_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Append query parameters to an endpoint path.
pub(crate) fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    format!("{path}?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_encoded() {
        assert_eq!(
            with_query("/api/v1/data", &[("skip", "0"), ("limit", "100")]),
            "/api/v1/data?skip=0&limit=100"
        );
        assert_eq!(
            with_query("/api/v1/data/r1/validate", &[("validation_notes", "ok & checked")]),
            "/api/v1/data/r1/validate?validation_notes=ok+%26+checked"
        );
        assert_eq!(with_query("/api/v1/files", &[]), "/api/v1/files");
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(path_segment("春 カタログ/2024"), "%E6%98%A5%20%E3%82%AB%E3%82%BF%E3%83%AD%E3%82%B0%2F2024");
        assert_eq!(path_segment("65f0c0ffee"), "65f0c0ffee");
    }
}
