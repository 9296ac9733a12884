use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::RpcError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),

    #[error("Backend client error: {0}")]
    Client(#[from] RpcError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Render { .. } | AppError::Client { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!("{self}");
        (status, self.to_string()).into_response()
    }
}
