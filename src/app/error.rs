use crate::storage::error::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

/// `{"message": ...}` body used for every non-resource response.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserExists,
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("not found")]
    NoRoute,
}

impl From<StorageError> for ApiError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::NotFound(_) => Self::UserNotFound,
            StorageError::DuplicateId(_) => Self::UserExists,
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::NoRoute => StatusCode::NOT_FOUND,
            Self::UserExists => StatusCode::CONFLICT,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!("request failed: {self}");
        (self.status(), Message::new(self.to_string())).into_response()
    }
}
