//! Guard predicates for controlling transitions.
//!
//! Guards are side-effect-free boolean functions over the live model
//! instance. A transition whose guard rejects the instance is reported as
//! "Conditions not met" and nothing is mutated.

use std::sync::Arc;

/// Side-effect-free predicate deciding whether a transition is currently
/// allowed for a given model instance.
///
/// Guards run before the permission check and before any mutation, so a
/// failing guard leaves the instance untouched. They see the whole model,
/// not just its state field, so conditions like "has a shipping address"
/// are expressible alongside state checks.
///
/// # Example
///
/// ```rust
/// use fsm_actions::core::Guard;
///
/// struct Order {
///     total: f64,
/// }
///
/// let nonzero_total = Guard::new(|order: &Order| order.total > 0.0);
///
/// assert!(nonzero_total.check(&Order { total: 9.5 }));
/// assert!(!nonzero_total.check(&Order { total: 0.0 }));
/// ```
pub struct Guard<M> {
    predicate: Arc<dyn Fn(&M) -> bool + Send + Sync>,
}

impl<M> Guard<M> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate must be free of side effects and thread-safe
    /// (`Send + Sync`); it may run on any request worker.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows the transition for this instance.
    pub fn check(&self, model: &M) -> bool {
        (self.predicate)(model)
    }
}

impl<M> Clone for Guard<M> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}
