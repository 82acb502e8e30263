//! HTTP error responses.
//!
//! Only transport and schema problems reach this type: once a submission
//! has deserialized, analysis cannot fail. The body mirrors the
//! `{"detail": ...}` shape the editor already displays.
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// An error returned to the HTTP client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

/// Keeps axum's own status mapping: 400 for malformed JSON, 422 for a body
/// that is JSON but not a submission, 415 for a missing content type and
/// 413 for an oversized body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, detail = %self.detail, "rejected request");
        (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response()
    }
}
