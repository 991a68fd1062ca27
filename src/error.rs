// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Error taxonomy shared by the stores and the HTTP layer.
///
/// Precondition failures map to 4xx statuses; backing-store failures are
/// split between transient pool errors (503, retryable by the caller) and
/// everything else (500).
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Store(#[from] diesel::result::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::AlreadyExists(_) => StatusCode::CONFLICT,
            Error::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal store details stay out of responses.
        let message = match &self {
            Error::Store(e) => {
                tracing::error!("store error: {e}");
                "an unexpected error occurred".to_string()
            }
            Error::Unavailable(e) => {
                tracing::error!("database unavailable: {e}");
                "service temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Forbidden("no".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(Error::NotFound("post").status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::AlreadyExists("like").status(), StatusCode::CONFLICT);
        assert_eq!(
            Error::Unavailable("pool".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_diesel_errors_become_store_errors() {
        let err: Error = diesel::result::Error::BrokenTransactionManager.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message_names_the_entity() {
        assert_eq!(Error::NotFound("comment").to_string(), "comment not found");
    }
}
