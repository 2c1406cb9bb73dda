use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("User not found")]
    UserNotFound,

    /// Only produced under the strict input policy.
    #[error("{0}")]
    InvalidInput(String),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
