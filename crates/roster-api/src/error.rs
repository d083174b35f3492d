//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body failed validation before reaching the resolver.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// A resolver failure; the variant picks the status code.
  #[error(transparent)]
  Core(#[from] CoreError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Core(CoreError::NotFound(m)) => (StatusCode::NOT_FOUND, m),
      ApiError::Core(CoreError::Conflict(m)) => (StatusCode::CONFLICT, m),
      ApiError::Core(CoreError::Internal(m)) => {
        (StatusCode::INTERNAL_SERVER_ERROR, m)
      }
    };
    (status, Json(json!({ "success": false, "message": message })))
      .into_response()
  }
}
