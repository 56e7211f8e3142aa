//! Permission predicates gating transitions per caller.
//!
//! Unlike guards, permission predicates see the requesting principal as an
//! explicit argument. There is no ambient current-user: the handler reads
//! the principal from the request and passes it in.

use crate::core::model::StateModel;
use std::sync::Arc;

/// Predicate deciding whether a principal may invoke a transition on a
/// given model instance.
///
/// Evaluated after the guard and before any mutation; a denial leaves the
/// instance untouched and surfaces as a 403. A transition without a
/// permission predicate is open to any caller.
pub struct Permission<M: StateModel> {
    predicate: Arc<dyn Fn(&M, &M::Principal) -> bool + Send + Sync>,
}

impl<M: StateModel> Permission<M> {
    /// Create a permission from a predicate over (instance, principal).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&M, &M::Principal) -> bool + Send + Sync + 'static,
    {
        Permission {
            predicate: Arc::new(predicate),
        }
    }

    /// Check whether the principal is authorized for this instance.
    pub fn check(&self, model: &M, principal: &M::Principal) -> bool {
        (self.predicate)(model, principal)
    }
}

impl<M: StateModel> Clone for Permission<M> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}
