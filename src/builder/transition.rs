//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::{
    ArgumentBuilder, Guard, Permission, StateModel, Transition, TransitionAction, TransitionArgs,
    TransitionError,
};
use std::sync::Arc;

/// Builder for declaring transitions with a fluent API.
///
/// Only the name (constructor argument), a source declaration and a target
/// are required; guard, permission, argument builder and action are
/// optional slots. A transition with no action is a pure state change.
pub struct TransitionBuilder<M: StateModel> {
    name: String,
    sources: Vec<M::State>,
    from_any: bool,
    target: Option<M::State>,
    guard: Option<Guard<M>>,
    permission: Option<Permission<M>>,
    arguments: Option<ArgumentBuilder<M>>,
    action: Option<TransitionAction<M>>,
}

impl<M: StateModel> TransitionBuilder<M> {
    /// Start declaring a transition with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            from_any: false,
            target: None,
            guard: None,
            permission: None,
            arguments: None,
            action: None,
        }
    }

    /// Add a source state (may be called multiple times).
    pub fn from(mut self, state: M::State) -> Self {
        self.sources.push(state);
        self
    }

    /// Declare the transition as applicable from any state.
    pub fn from_any(mut self) -> Self {
        self.from_any = true;
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: M::State) -> Self {
        self.target = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<M>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add a permission predicate (optional).
    pub fn permission(mut self, permission: Permission<M>) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Add a permission predicate using a closure (optional).
    pub fn authorize<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&M, &M::Principal) -> bool + Send + Sync + 'static,
    {
        self.permission = Some(Permission::new(predicate));
        self
    }

    /// Set the argument builder (optional). Resolved against the live
    /// instance right before the action runs.
    pub fn arguments<F>(mut self, build: F) -> Self
    where
        F: Fn(&M) -> TransitionArgs + Send + Sync + 'static,
    {
        self.arguments = Some(Arc::new(build));
        self
    }

    /// Set the side-effecting action (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut M, &TransitionArgs) -> Result<(), TransitionError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<M>, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyTransitionName);
        }
        if self.sources.is_empty() && !self.from_any {
            return Err(BuildError::MissingSourceState { name: self.name });
        }
        let target = match self.target {
            Some(target) => target,
            None => return Err(BuildError::MissingTargetState { name: self.name }),
        };

        Ok(Transition::from_parts(
            self.name,
            self.sources,
            self.from_any,
            target,
            self.guard,
            self.permission,
            self.arguments,
            self.action,
        ))
    }
}
