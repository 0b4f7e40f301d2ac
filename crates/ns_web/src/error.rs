use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("accounts are not enabled")]
    AccountsDisabled,

    #[error(transparent)]
    Core(#[from] ns_core::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::AccountsDisabled => (StatusCode::NOT_FOUND, Html("Not Found")).into_response(),
            WebError::Core(e) => {
                error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html("Internal Server Error")).into_response()
            }
        }
    }
}
