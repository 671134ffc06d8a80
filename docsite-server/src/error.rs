use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docsite_core::{ResolveError, TemplateError};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Render error: {0}")]
    Template(#[from] TemplateError),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            // Plain framework 404, no custom page
            Self::Resolve(_) => StatusCode::NOT_FOUND.into_response(),
            other => {
                error!(error = %other, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
