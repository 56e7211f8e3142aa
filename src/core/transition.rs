//! Declared transition descriptors.
//!
//! A descriptor names one guarded state change: which source states it
//! applies from, which state it targets, and the optional guard,
//! permission, argument-builder and action slots. Descriptors are built
//! through [`TransitionBuilder`](crate::builder::TransitionBuilder) and are
//! read-only afterwards.

use crate::core::guard::Guard;
use crate::core::model::StateModel;
use crate::core::permission::Permission;
use std::sync::Arc;
use thiserror::Error;

/// Keyword arguments handed to a transition action.
///
/// Arguments come from the descriptor's argument builder, never from the
/// request body; absent a builder, actions receive an empty map.
pub type TransitionArgs = serde_json::Map<String, serde_json::Value>;

/// Failure raised inside a transition action.
///
/// The adapter applies no handling of its own: an action error aborts the
/// request before the state field is written and travels to the caller
/// verbatim.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The action required an argument the builder did not supply.
    #[error("missing transition argument '{0}'")]
    MissingArgument(String),

    /// The action failed with its own message.
    #[error("{0}")]
    Failed(String),
}

/// Side-effecting body of a transition. Runs after the guard and
/// permission checks, before the state field is written.
pub type TransitionAction<M> =
    Arc<dyn Fn(&mut M, &TransitionArgs) -> Result<(), TransitionError> + Send + Sync>;

/// Per-transition argument builder, resolved by direct lookup on the
/// descriptor rather than by constructed method name.
pub type ArgumentBuilder<M> = Arc<dyn Fn(&M) -> TransitionArgs + Send + Sync>;

/// A named, guarded state change on a model.
///
/// Several descriptors may share a name (one per source/target pairing);
/// the generated endpoint dispatches on the live instance at request time.
pub struct Transition<M: StateModel> {
    name: String,
    sources: Vec<M::State>,
    from_any: bool,
    target: M::State,
    guard: Option<Guard<M>>,
    permission: Option<Permission<M>>,
    arguments: Option<ArgumentBuilder<M>>,
    action: Option<TransitionAction<M>>,
}

impl<M: StateModel> Transition<M> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        name: String,
        sources: Vec<M::State>,
        from_any: bool,
        target: M::State,
        guard: Option<Guard<M>>,
        permission: Option<Permission<M>>,
        arguments: Option<ArgumentBuilder<M>>,
        action: Option<TransitionAction<M>>,
    ) -> Self {
        Self {
            name,
            sources,
            from_any,
            target,
            guard,
            permission,
            arguments,
            action,
        }
    }

    /// The transition's name; also the URL suffix of its generated route.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared source states. Empty when the transition applies from any
    /// state.
    pub fn sources(&self) -> &[M::State] {
        &self.sources
    }

    /// The state written on success.
    pub fn target(&self) -> &M::State {
        &self.target
    }

    /// Whether this transition is currently allowed for the instance:
    /// the current state must be a declared source and the guard, if any,
    /// must pass. Side-effect-free.
    pub fn can_proceed(&self, model: &M) -> bool {
        let source_ok = self.from_any || self.sources.contains(model.state());
        source_ok && self.guard.as_ref().is_none_or(|g| g.check(model))
    }

    /// Whether the principal may invoke this transition. A transition
    /// without a permission predicate is open; one with a predicate fails
    /// closed when no principal was supplied.
    pub fn has_permission(&self, model: &M, principal: Option<&M::Principal>) -> bool {
        match (&self.permission, principal) {
            (None, _) => true,
            (Some(permission), Some(principal)) => permission.check(model, principal),
            (Some(_), None) => false,
        }
    }

    /// Resolve the action's keyword arguments from the instance.
    pub fn arguments(&self, model: &M) -> TransitionArgs {
        self.arguments
            .as_ref()
            .map(|build| build(model))
            .unwrap_or_default()
    }

    /// Run the action (if any) and write the target state. An action error
    /// propagates before the state field is touched.
    pub fn apply(&self, model: &mut M, args: &TransitionArgs) -> Result<(), TransitionError> {
        if let Some(action) = &self.action {
            action(model, args)?;
        }
        model.set_state(self.target.clone());
        Ok(())
    }
}

impl<M: StateModel> std::fmt::Debug for Transition<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .field("from_any", &self.from_any)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<M: StateModel> Clone for Transition<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            sources: self.sources.clone(),
            from_any: self.from_any,
            target: self.target.clone(),
            guard: self.guard.clone(),
            permission: self.permission.clone(),
            arguments: self.arguments.clone(),
            action: self.action.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildError, RegistryBuilder, TransitionBuilder};
    use crate::core::registry::TransitionRegistry;
    use crate::core::state::State;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TicketState {
        Open,
        Triaged,
        Closed,
    }

    impl State for TicketState {
        fn name(&self) -> &str {
            match self {
                Self::Open => "open",
                Self::Triaged => "triaged",
                Self::Closed => "closed",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Closed)
        }
    }

    #[derive(Serialize)]
    struct Ticket {
        state: TicketState,
        assignee: Option<String>,
        resolution: Option<String>,
    }

    #[derive(Clone)]
    struct Agent {
        can_close: bool,
    }

    impl StateModel for Ticket {
        type State = TicketState;
        type Principal = Agent;

        fn state(&self) -> &TicketState {
            &self.state
        }

        fn set_state(&mut self, state: TicketState) {
            self.state = state;
        }

        fn transitions() -> Result<TransitionRegistry<Self>, BuildError> {
            RegistryBuilder::new()
                .transition(
                    TransitionBuilder::new("triage")
                        .from(TicketState::Open)
                        .to(TicketState::Triaged),
                )?
                .build()
        }
    }

    fn open_ticket() -> Ticket {
        Ticket {
            state: TicketState::Open,
            assignee: None,
            resolution: None,
        }
    }

    fn close_transition() -> Transition<Ticket> {
        TransitionBuilder::new("close")
            .from(TicketState::Triaged)
            .to(TicketState::Closed)
            .when(|ticket: &Ticket| ticket.assignee.is_some())
            .authorize(|_: &Ticket, agent: &Agent| agent.can_close)
            .arguments(|_: &Ticket| {
                let mut args = TransitionArgs::new();
                args.insert("resolution".to_string(), "fixed".into());
                args
            })
            .action(|ticket: &mut Ticket, args: &TransitionArgs| {
                let resolution = args
                    .get("resolution")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| TransitionError::MissingArgument("resolution".to_string()))?;
                ticket.resolution = Some(resolution.to_string());
                Ok(())
            })
            .build()
            .unwrap()
    }

    #[test]
    fn can_proceed_requires_source_match() {
        let transition = close_transition();

        let mut ticket = open_ticket();
        ticket.assignee = Some("ana".to_string());
        assert!(!transition.can_proceed(&ticket));

        ticket.state = TicketState::Triaged;
        assert!(transition.can_proceed(&ticket));
    }

    #[test]
    fn can_proceed_respects_guard() {
        let transition = close_transition();

        let mut ticket = open_ticket();
        ticket.state = TicketState::Triaged;
        assert!(!transition.can_proceed(&ticket));

        ticket.assignee = Some("ana".to_string());
        assert!(transition.can_proceed(&ticket));
    }

    #[test]
    fn from_any_matches_every_source() {
        let transition: Transition<Ticket> = TransitionBuilder::new("close")
            .from_any()
            .to(TicketState::Closed)
            .build()
            .unwrap();

        let mut ticket = open_ticket();
        assert!(transition.can_proceed(&ticket));
        ticket.state = TicketState::Triaged;
        assert!(transition.can_proceed(&ticket));
    }

    #[test]
    fn permission_fails_closed_without_principal() {
        let transition = close_transition();
        let ticket = open_ticket();

        assert!(!transition.has_permission(&ticket, None));
        assert!(transition.has_permission(&ticket, Some(&Agent { can_close: true })));
        assert!(!transition.has_permission(&ticket, Some(&Agent { can_close: false })));
    }

    #[test]
    fn transition_without_permission_is_open() {
        let transition: Transition<Ticket> = TransitionBuilder::new("triage")
            .from(TicketState::Open)
            .to(TicketState::Triaged)
            .build()
            .unwrap();

        assert!(transition.has_permission(&open_ticket(), None));
    }

    #[test]
    fn arguments_default_to_empty() {
        let transition: Transition<Ticket> = TransitionBuilder::new("triage")
            .from(TicketState::Open)
            .to(TicketState::Triaged)
            .build()
            .unwrap();

        assert!(transition.arguments(&open_ticket()).is_empty());
    }

    #[test]
    fn apply_runs_action_then_writes_target() {
        let transition = close_transition();

        let mut ticket = open_ticket();
        ticket.state = TicketState::Triaged;
        ticket.assignee = Some("ana".to_string());

        let args = transition.arguments(&ticket);
        transition.apply(&mut ticket, &args).unwrap();

        assert_eq!(ticket.state, TicketState::Closed);
        assert_eq!(ticket.resolution.as_deref(), Some("fixed"));
    }

    #[test]
    fn failed_action_leaves_state_untouched() {
        let transition = close_transition();

        let mut ticket = open_ticket();
        ticket.state = TicketState::Triaged;
        ticket.assignee = Some("ana".to_string());

        // Empty args: the action demands "resolution" and fails.
        let result = transition.apply(&mut ticket, &TransitionArgs::new());

        assert!(matches!(result, Err(TransitionError::MissingArgument(_))));
        assert_eq!(ticket.state, TicketState::Triaged);
        assert!(ticket.resolution.is_none());
    }
}
