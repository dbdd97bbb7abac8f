//! Error types for the item service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while serving items.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Item not found: {0}")]
    NotFound(u64),
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        match self {
            RegistryError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Item not found" })),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": other.to_string() })),
            )
                .into_response(),
        }
    }
}
