//! Builder API for declaring transitions and registries.
//!
//! This module provides fluent builders for declaring a model's transition
//! set with construction-time validation: problems with a declaration fail
//! the build, not a request.

pub mod error;
pub mod registry;
pub mod transition;

pub use error::BuildError;
pub use registry::RegistryBuilder;
pub use transition::TransitionBuilder;

use crate::core::{StateModel, Transition};

/// Declare a plain transition: a pure state change with no guard,
/// permission or action.
///
/// # Panics
///
/// Panics if `name` is empty; use [`TransitionBuilder`] directly to handle
/// declaration errors.
pub fn simple_transition<M>(name: impl Into<String>, from: M::State, to: M::State) -> Transition<M>
where
    M: StateModel,
{
    TransitionBuilder::new(name)
        .from(from)
        .to(to)
        .build()
        .expect("Simple transition should always build")
}

/// Declare a guarded transition from a closure predicate.
///
/// # Panics
///
/// Panics if `name` is empty; use [`TransitionBuilder`] directly to handle
/// declaration errors.
pub fn guarded_transition<M, F>(
    name: impl Into<String>,
    from: M::State,
    to: M::State,
    guard: F,
) -> Transition<M>
where
    M: StateModel,
    F: Fn(&M) -> bool + Send + Sync + 'static,
{
    TransitionBuilder::new(name)
        .from(from)
        .to(to)
        .when(guard)
        .build()
        .expect("Guarded transition should always build")
}
