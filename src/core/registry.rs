//! The declared transition registry.
//!
//! A registry is the full transition graph of a model type: every row the
//! model declares, in declaration order. Built once through
//! [`RegistryBuilder`](crate::builder::RegistryBuilder), immutable and
//! shareable afterwards.

use crate::core::model::StateModel;
use crate::core::transition::Transition;
use std::collections::BTreeSet;

/// Ordered collection of declared transitions for one model type.
///
/// Several rows may share a name; the distinct name set is what the action
/// bundle exposes as endpoints, and request-time dispatch scans the rows
/// of the requested name against the live instance.
pub struct TransitionRegistry<M: StateModel> {
    transitions: Vec<Transition<M>>,
}

impl<M: StateModel> TransitionRegistry<M> {
    pub(crate) fn from_transitions(transitions: Vec<Transition<M>>) -> Self {
        Self { transitions }
    }

    /// All declared rows, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition<M>> {
        self.transitions.iter()
    }

    /// Rows declared under the given name, in declaration order.
    pub fn by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Transition<M>> {
        self.transitions.iter().filter(move |t| t.name() == name)
    }

    /// The distinct transition names, deduplicated and ordered. This is
    /// exactly the set of endpoints a bundle built from this registry
    /// exposes, independent of row multiplicity or declaration order.
    pub fn distinct_names(&self) -> BTreeSet<&str> {
        self.transitions.iter().map(|t| t.name()).collect()
    }

    /// Number of declared rows (not distinct names).
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<M: StateModel> Clone for TransitionRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            transitions: self.transitions.clone(),
        }
    }
}
