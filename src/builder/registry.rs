//! Builder for assembling transition registries.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{StateModel, Transition, TransitionRegistry};

/// Builder assembling a model's declared transition registry.
///
/// Intended to be the body of [`StateModel::transitions`]: chain one
/// `.transition(..)?` per declared row, then `.build()`.
///
/// [`StateModel::transitions`]: crate::core::StateModel::transitions
pub struct RegistryBuilder<M: StateModel> {
    transitions: Vec<Transition<M>>,
}

impl<M: StateModel> RegistryBuilder<M> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<M>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<M>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple pre-built transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<M>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the registry.
    /// Returns an error if no transitions were declared.
    pub fn build(self) -> Result<TransitionRegistry<M>, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }
        Ok(TransitionRegistry::from_transitions(self.transitions))
    }
}

impl<M: StateModel> Default for RegistryBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
