//! Build errors for transition and registry builders.

use thiserror::Error;

/// Errors that can occur when declaring transitions and registries.
///
/// All variants are construction-time failures: they surface when the
/// registry or action bundle is built, never while a request is handled.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition name must not be empty")]
    EmptyTransitionName,

    #[error("Transition '{name}' has no source state. Call .from(state) or .from_any()")]
    MissingSourceState { name: String },

    #[error("Transition '{name}' has no target state. Call .to(state)")]
    MissingTargetState { name: String },

    #[error("No transitions declared. Add at least one transition")]
    NoTransitions,

    #[error("HTTP method '{method}' cannot be used for transition routes")]
    UnsupportedMethod { method: String },

    #[error("URL path override '{path}' conflicts across {count} distinct transitions")]
    ConflictingRoutePath { path: String, count: usize },
}
