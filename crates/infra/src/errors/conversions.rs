//! Conversions from infrastructure errors into the domain error.

use conex_domain::ConexError;
use reqwest::Error as HttpError;

use crate::api::ApiError;

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if err.is_builder() {
            return Self::Encode(err.to_string());
        }
        // Connect, request, body and redirect failures all mean the exchange
        // never completed.
        Self::Network(err.to_string())
    }
}

/* -------------------------------------------------------------------------- */
/* ApiError → ConexError */
/* -------------------------------------------------------------------------- */

impl From<ApiError> for ConexError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status: 401, message } => Self::Auth(message),
            ApiError::Http { status: 404, message } => Self::NotFound(message),
            ApiError::Http { status: 400 | 422, message } => Self::InvalidInput(message),
            ApiError::Http { message, .. } => Self::Backend(message),
            ApiError::NotAuthenticated => Self::Auth(ApiError::NotAuthenticated.to_string()),
            ApiError::Network(msg) | ApiError::Timeout(msg) => Self::Network(msg),
            ApiError::Config(msg) => Self::Config(msg),
            err @ (ApiError::Decode(_) | ApiError::Encode(_)) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_session_fatal_auth_error() {
        let err: ConexError =
            ApiError::Http { status: 401, message: "Could not validate credentials".into() }.into();
        assert_eq!(err, ConexError::Auth("Could not validate credentials".into()));
        assert!(err.is_session_fatal());

        let missing: ConexError = ApiError::NotAuthenticated.into();
        assert!(missing.is_session_fatal());
    }

    #[test]
    fn backend_messages_survive_conversion() {
        let err: ConexError =
            ApiError::Http { status: 500, message: "Error uploading file: disk full".into() }
                .into();
        assert_eq!(err.to_string(), "Error uploading file: disk full");

        let not_found: ConexError =
            ApiError::Http { status: 404, message: "Data not found".into() }.into();
        assert!(matches!(not_found, ConexError::NotFound(_)));
    }
}
