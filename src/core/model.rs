//! The model-side capability contract.
//!
//! A model declares its lifecycle up front: its state type, the principal
//! type its permission predicates evaluate, and the full transition
//! registry. Declaration is a class-level capability; the adapter never
//! constructs a model instance to discover transitions.

use crate::builder::BuildError;
use crate::core::registry::TransitionRegistry;
use crate::core::state::State;
use serde::Serialize;

/// A domain entity whose lifecycle is governed by declared transitions.
///
/// Implementations own the current-state field and expose it through
/// [`state`](StateModel::state) / [`set_state`](StateModel::set_state);
/// the adapter reads the field for source matching and writes it once per
/// successful transition. [`transitions`](StateModel::transitions) is an
/// associated function returning the declared registry, so registry
/// problems surface when the action bundle is built (startup), never per
/// request.
///
/// `Serialize` is required because generated endpoints return the updated
/// instance as the response representation.
pub trait StateModel: Serialize + Send + Sized + 'static {
    /// The lifecycle state type.
    type State: State + 'static;

    /// The principal evaluated by permission predicates. The host's
    /// authentication middleware is expected to insert one into request
    /// extensions; permission checks receive it explicitly.
    type Principal: Clone + Send + Sync + 'static;

    /// Current state of this instance.
    fn state(&self) -> &Self::State;

    /// Replace the current state. Called by the adapter exactly once per
    /// successful transition, after the transition action has run.
    fn set_state(&mut self, state: Self::State);

    /// The declared transition registry for this model type.
    fn transitions() -> Result<TransitionRegistry<Self>, BuildError>;
}
