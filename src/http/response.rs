//! Error classification at the HTTP boundary.
//!
//! # Responsibilities
//! - Map handler outcomes to status codes
//! - Keep error responses body-less
//! - Hold the one place where a storage fault is not surfaced (listing)
//!
//! # Design Decisions
//! - Storage faults become 500 and are logged here, once
//! - `empty_on_storage_fault` is used by the list endpoint only; every other
//!   endpoint lets the fault through

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::storage::StoreError;

/// Outcome of a person request that did not succeed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("person not found")]
    NotFound,

    #[error("request body missing or unreadable")]
    BadRequest,

    #[error("storage fault: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(err) = &self {
            tracing::error!(error = %err, "Unhandled storage fault");
        }
        self.status().into_response()
    }
}

/// Compatibility shim for listing: a storage fault turns into an empty
/// 204 response instead of an error. Nothing is logged.
pub fn empty_on_storage_fault<T: IntoResponse>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(value) => value.into_response(),
        Err(ApiError::Storage(_)) => StatusCode::NO_CONTENT.into_response(),
        Err(other) => other.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_classification() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Storage(StoreError::Poisoned).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn shim_swallows_only_storage_faults() {
        let swallowed = empty_on_storage_fault::<StatusCode>(Err(StoreError::Poisoned.into()));
        assert_eq!(swallowed.status(), StatusCode::NO_CONTENT);

        let passed = empty_on_storage_fault::<StatusCode>(Err(ApiError::NotFound));
        assert_eq!(passed.status(), StatusCode::NOT_FOUND);

        let ok = empty_on_storage_fault(Ok(StatusCode::OK));
        assert_eq!(ok.status(), StatusCode::OK);
    }
}
