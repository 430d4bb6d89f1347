// src/error.rs
//! Error types shared by the document core, the viewer and the HTTP layer.
//!
//! Every error in this crate is caused by caller input and is recoverable:
//! the caller re-prompts and tries again. Nothing here is fatal.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::connector::WalletError;

/// Structural problem with builder input or with an assembled DID Document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Controller identifier was empty or whitespace-only
    #[error("controller identifier must not be empty")]
    EmptyController,

    /// Service endpoint is not an absolute URL with a scheme and host
    #[error("invalid service endpoint '{endpoint}': {reason}")]
    InvalidServiceEndpoint { endpoint: String, reason: String },

    /// Document `id` is not a DID
    #[error("document id '{id}' is not a DID (expected 'did:' prefix)")]
    InvalidDid { id: String },

    #[error("document has no verification method")]
    MissingVerificationMethod,

    /// A verification relationship points at a method the document lacks
    #[error("{relationship} references unknown verification method '{reference}'")]
    UnknownVerificationMethod {
        relationship: &'static str,
        reference: String,
    },

    #[error("service '{service_id}' has an empty type")]
    EmptyServiceType { service_id: String },

    /// Well-formed JSON that does not have the shape of a DID Document
    #[error("malformed DID document: {0}")]
    MalformedDocument(String),
}

impl ValidationError {
    /// Stable tag reported to callers alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyController => "EmptyController",
            ValidationError::InvalidServiceEndpoint { .. } => "InvalidServiceEndpoint",
            ValidationError::InvalidDid { .. } => "InvalidDid",
            ValidationError::MissingVerificationMethod => "MissingVerificationMethod",
            ValidationError::UnknownVerificationMethod { .. } => "UnknownVerificationMethod",
            ValidationError::EmptyServiceType { .. } => "EmptyServiceType",
            ValidationError::MalformedDocument(_) => "MalformedDocument",
        }
    }

    /// JSON field of the input or document that caused the error, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::EmptyController => Some("controller"),
            ValidationError::InvalidServiceEndpoint { .. } => Some("serviceEndpoint"),
            ValidationError::InvalidDid { .. } => Some("id"),
            ValidationError::MissingVerificationMethod => Some("verificationMethod"),
            ValidationError::UnknownVerificationMethod { relationship, .. } => Some(*relationship),
            ValidationError::EmptyServiceType { .. } => Some("service"),
            ValidationError::MalformedDocument(_) => None,
        }
    }
}

/// Input handed to the viewer was not JSON at all.
#[derive(Error, Debug)]
#[error("document is not valid JSON: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Failure to open a document for rendering.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Error body returned by every failing API endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::Parse(e) => ApiError::Parse(e),
            ViewError::Invalid(e) => ApiError::Validation(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::Validation(e) => ErrorBody {
                kind: e.kind().to_string(),
                field: e.field().map(str::to_string),
                message: e.to_string(),
            },
            ApiError::Parse(e) => ErrorBody {
                kind: "ParseError".to_string(),
                field: None,
                message: e.to_string(),
            },
            ApiError::Wallet(e) => ErrorBody {
                kind: "InvalidAddress".to_string(),
                field: Some("address".to_string()),
                message: e.to_string(),
            },
        };

        log::warn!("Request rejected ({}): {}", body.kind, body.message);

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_field() {
        let err = ValidationError::InvalidServiceEndpoint {
            endpoint: "not-a-url".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(err.kind(), "InvalidServiceEndpoint");
        assert_eq!(err.field(), Some("serviceEndpoint"));
        assert!(err.to_string().contains("not-a-url"));

        let err = ValidationError::UnknownVerificationMethod {
            relationship: "assertionMethod",
            reference: "did:eth:abc#key-9".into(),
        };
        assert_eq!(err.field(), Some("assertionMethod"));
    }

    #[test]
    fn test_parse_error_is_not_a_validation_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApiError = ViewError::from(ParseError::from(json_err)).into();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
