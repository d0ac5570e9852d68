use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unknown session")]
    UnknownSession,

    #[error("Too many open sessions")]
    SessionLimit,

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("Recipe has no image")]
    ImageNotFound,

    #[error("A recipe named {0:?} already exists")]
    DuplicateName(String),

    #[error("storage connection error")]
    Storage(#[source] anyhow::Error),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownSession
            | AppError::RecipeNotFound(_)
            | AppError::ImageNotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateName(_) => StatusCode::CONFLICT,
            AppError::SessionLimit | AppError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Storage(e) => error!(error = %format!("{:#}", e), "storage failure"),
            other if status.is_client_error() => warn!(error = %other, "request rejected"),
            _ => {}
        }
        (status, self.to_string()).into_response()
    }
}
