//! API error responses
//!
//! Every error body is `{ "error": "<message>" }` so that clients can show
//! the message verbatim. A stable machine-readable code rides along in the
//! `x-error-code` header.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infra::SubmissionError;

/// Error codes for API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body is malformed
    InvalidRequestBody,
    /// Required field is missing
    MissingRequiredField,
    /// Field value is invalid
    InvalidFieldValue,
    /// Requested resource not found
    ResourceNotFound,
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequestBody
            | ErrorCode::MissingRequiredField
            | ErrorCode::InvalidFieldValue => StatusCode::BAD_REQUEST,
            ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code_str = match self {
            ErrorCode::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ErrorCode::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorCode::InvalidFieldValue => "INVALID_FIELD_VALUE",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", code_str)
    }
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by REST handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code_str = self.code.to_string();
        let mut response = (status, Json(ErrorBody { error: self.message })).into_response();

        if let Ok(code_value) = HeaderValue::from_str(&code_str) {
            response
                .headers_mut()
                .insert(HeaderName::from_static("x-error-code"), code_value);
        }

        response
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        let code = match &err {
            SubmissionError::MissingField(_) => ErrorCode::MissingRequiredField,
            SubmissionError::InvalidField { .. } => ErrorCode::InvalidFieldValue,
            SubmissionError::InvalidPayload(_) => ErrorCode::InvalidRequestBody,
            SubmissionError::NotFound(_) => ErrorCode::ResourceNotFound,
            SubmissionError::Canonicalization(_)
            | SubmissionError::Configuration(_)
            | SubmissionError::Internal(_) => {
                tracing::error!(error = %err, "internal error while handling request");
                ErrorCode::InternalError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            ErrorCode::InvalidRequestBody,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    }
}
