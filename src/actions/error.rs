//! Request-time errors of generated actions and their HTTP mapping.

use crate::actions::repository::RepositoryError;
use crate::core::TransitionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Fixed machine-readable reason returned when a guard rejects a request.
pub const CONDITIONS_NOT_MET: &str = "Conditions not met";

/// Everything a generated action can fail with.
///
/// Guard and permission failures happen before any mutation; the
/// transition and persistence variants carry the underlying message
/// verbatim.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The transition is not allowed in the instance's current state.
    #[error("{CONDITIONS_NOT_MET}")]
    ConditionsNotMet,

    /// The principal may not invoke this transition.
    #[error("permission denied")]
    PermissionDenied,

    /// No resource under the requested primary key.
    #[error("resource not found")]
    NotFound,

    /// The route's transition name is absent from the registry. Not
    /// reachable through routes generated from that registry.
    #[error("unknown transition '{0}'")]
    UnknownTransition(String),

    /// The transition action failed; its own error semantics are
    /// preserved.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Persisting the updated instance failed.
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl From<RepositoryError> for ActionError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ActionError::NotFound,
            RepositoryError::Storage(message) => ActionError::Persistence(message),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        match self {
            ActionError::ConditionsNotMet => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "detail": CONDITIONS_NOT_MET })),
            )
                .into_response(),
            ActionError::PermissionDenied => StatusCode::FORBIDDEN.into_response(),
            ActionError::NotFound => StatusCode::NOT_FOUND.into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "detail": other.to_string() })),
            )
                .into_response(),
        }
    }
}
