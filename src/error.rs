//! Error types for configuration loading and the HTTP surface.
//! Comment generation itself never fails.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::domain::StudentId;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
}

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unknown student: {0}")]
  UnknownStudent(StudentId),
  #[error("unsupported level step: {0}")]
  BadLevelStep(u8),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::UnknownStudent(_) => StatusCode::NOT_FOUND,
      ApiError::BadLevelStep(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = Json(serde_json::json!({ "error": self.to_string() }));
    (self.status(), body).into_response()
  }
}
