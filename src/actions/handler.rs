//! Transition handler factory.
//!
//! One generated handler per distinct transition name. The handler is
//! stateless: everything it needs at request time lives in the shared
//! [`ActionState`].

use crate::actions::bundle::RouteOptions;
use crate::actions::error::ActionError;
use crate::actions::repository::Repository;
use crate::builder::BuildError;
use crate::core::State as _;
use crate::core::{StateModel, TransitionRegistry};
use axum::extract::{Extension, Path, State};
use axum::routing::{on, MethodRouter};
use axum::Json;
use log::{debug, info, warn};
use std::sync::Arc;

/// Shared, read-only request context of the generated routes: the declared
/// registry, the backing repository and the persistence flag. Safe for
/// concurrent reuse across requests.
pub struct ActionState<M: StateModel> {
    pub(crate) registry: TransitionRegistry<M>,
    pub(crate) repository: Arc<dyn Repository<M>>,
    pub(crate) save_after_transition: bool,
}

impl<M: StateModel> ActionState<M> {
    pub fn new(
        registry: TransitionRegistry<M>,
        repository: Arc<dyn Repository<M>>,
        save_after_transition: bool,
    ) -> Self {
        Self {
            registry,
            repository,
            save_after_transition,
        }
    }
}

/// Create a route handler bound to `transition_name`.
///
/// The route options decide which HTTP methods the route answers;
/// unsupported methods fail here, at construction time.
pub fn make_handler<M: StateModel>(
    transition_name: impl Into<String>,
    options: &RouteOptions,
) -> Result<MethodRouter<Arc<ActionState<M>>>, BuildError> {
    let filter = options.method_filter()?;
    let name = transition_name.into();

    let handler = move |State(state): State<Arc<ActionState<M>>>,
                        Path(id): Path<String>,
                        principal: Option<Extension<M::Principal>>| {
        let name = name.clone();
        async move {
            let principal = principal.map(|Extension(principal)| principal);
            run_transition(&name, state.as_ref(), &id, principal.as_ref()).await
        }
    };

    Ok(on(filter, handler))
}

/// The fixed request pipeline: lookup, guard, permission, arguments,
/// invoke, persist, serialize. Guard and permission run before any
/// mutation, so a rejected request leaves the instance untouched.
async fn run_transition<M: StateModel>(
    name: &str,
    state: &ActionState<M>,
    id: &str,
    principal: Option<&M::Principal>,
) -> Result<Json<M>, ActionError> {
    debug!("transition requested name={} id={}", name, id);

    let mut model = state.repository.find(id).await?;

    if state.registry.by_name(name).next().is_none() {
        warn!("transition not in registry name={}", name);
        return Err(ActionError::UnknownTransition(name.to_string()));
    }

    let Some(row) = state
        .registry
        .by_name(name)
        .find(|t| t.can_proceed(&model))
    else {
        debug!(
            "transition blocked by guard name={} id={} state={}",
            name,
            id,
            model.state().name()
        );
        return Err(ActionError::ConditionsNotMet);
    };

    if !row.has_permission(&model, principal) {
        warn!("transition denied name={} id={}", name, id);
        return Err(ActionError::PermissionDenied);
    }

    let args = row.arguments(&model);
    let from = model.state().name().to_string();
    row.apply(&mut model, &args)?;

    if state.save_after_transition {
        state.repository.save(&model).await?;
    }

    info!(
        "transition applied name={} id={} from={} to={}",
        name,
        id,
        from,
        model.state().name()
    );
    Ok(Json(model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::repository::RepositoryError;
    use crate::builder::{RegistryBuilder, TransitionBuilder};
    use crate::core::State;
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum InvoiceState {
        Open,
        Sent,
        Paid,
    }

    impl State for InvoiceState {
        fn name(&self) -> &str {
            match self {
                Self::Open => "open",
                Self::Sent => "sent",
                Self::Paid => "paid",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Paid)
        }
    }

    #[derive(Clone, Debug, Serialize)]
    struct Invoice {
        id: String,
        state: InvoiceState,
        total: u64,
    }

    #[derive(Clone)]
    struct Accountant {
        can_send: bool,
    }

    impl StateModel for Invoice {
        type State = InvoiceState;
        type Principal = Accountant;

        fn state(&self) -> &InvoiceState {
            &self.state
        }

        fn set_state(&mut self, state: InvoiceState) {
            self.state = state;
        }

        fn transitions() -> Result<TransitionRegistry<Self>, BuildError> {
            RegistryBuilder::new()
                .transition(
                    TransitionBuilder::new("send")
                        .from(InvoiceState::Open)
                        .to(InvoiceState::Sent)
                        .when(|invoice: &Invoice| invoice.total > 0)
                        .authorize(|_: &Invoice, who: &Accountant| who.can_send),
                )?
                .transition(
                    TransitionBuilder::new("settle")
                        .from(InvoiceState::Sent)
                        .to(InvoiceState::Paid),
                )?
                .build()
        }
    }

    struct MemoryRepo {
        rows: Mutex<HashMap<String, Invoice>>,
        saves: AtomicUsize,
    }

    impl MemoryRepo {
        fn with(invoice: Invoice) -> Self {
            let mut rows = HashMap::new();
            rows.insert(invoice.id.clone(), invoice);
            Self {
                rows: Mutex::new(rows),
                saves: AtomicUsize::new(0),
            }
        }

        fn stored_state(&self, id: &str) -> InvoiceState {
            self.rows.lock().unwrap()[id].state.clone()
        }
    }

    #[async_trait]
    impl Repository<Invoice> for MemoryRepo {
        async fn find(&self, id: &str) -> Result<Invoice, RepositoryError> {
            self.rows
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn save(&self, model: &Invoice) -> Result<(), RepositoryError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.rows
                .lock()
                .unwrap()
                .insert(model.id.clone(), model.clone());
            Ok(())
        }
    }

    fn action_state(repo: Arc<MemoryRepo>, save_after_transition: bool) -> ActionState<Invoice> {
        ActionState::new(Invoice::transitions().unwrap(), repo, save_after_transition)
    }

    fn open_invoice(total: u64) -> Invoice {
        Invoice {
            id: "7".to_string(),
            state: InvoiceState::Open,
            total,
        }
    }

    #[tokio::test]
    async fn successful_transition_mutates_and_saves_once() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(120)));
        let state = action_state(Arc::clone(&repo), true);

        let sender = Accountant { can_send: true };
        let Json(updated) = run_transition("send", &state, "7", Some(&sender))
            .await
            .unwrap();

        assert_eq!(updated.state, InvoiceState::Sent);
        assert_eq!(repo.stored_state("7"), InvoiceState::Sent);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn guard_failure_precedes_permission_and_saves_nothing() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(0)));
        let state = action_state(Arc::clone(&repo), true);

        // Unauthorized caller, but the guard must reject first.
        let viewer = Accountant { can_send: false };
        let err = run_transition("send", &state, "7", Some(&viewer))
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::ConditionsNotMet));
        assert_eq!(repo.stored_state("7"), InvoiceState::Open);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn permission_failure_saves_nothing() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(120)));
        let state = action_state(Arc::clone(&repo), true);

        let viewer = Accountant { can_send: false };
        let err = run_transition("send", &state, "7", Some(&viewer))
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::PermissionDenied));
        assert_eq!(repo.stored_state("7"), InvoiceState::Open);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_principal_fails_closed() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(120)));
        let state = action_state(Arc::clone(&repo), true);

        let err = run_transition("send", &state, "7", None).await.unwrap_err();

        assert!(matches!(err, ActionError::PermissionDenied));
    }

    #[tokio::test]
    async fn open_transition_needs_no_principal() {
        let mut invoice = open_invoice(120);
        invoice.state = InvoiceState::Sent;
        let repo = Arc::new(MemoryRepo::with(invoice));
        let state = action_state(Arc::clone(&repo), true);

        let Json(updated) = run_transition("settle", &state, "7", None).await.unwrap();

        assert_eq!(updated.state, InvoiceState::Paid);
    }

    #[tokio::test]
    async fn save_toggle_skips_persistence() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(120)));
        let state = action_state(Arc::clone(&repo), false);

        let sender = Accountant { can_send: true };
        let Json(updated) = run_transition("send", &state, "7", Some(&sender))
            .await
            .unwrap();

        // The returned representation reflects the mutation, but nothing
        // was written back.
        assert_eq!(updated.state, InvoiceState::Sent);
        assert_eq!(repo.stored_state("7"), InvoiceState::Open);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(120)));
        let state = action_state(Arc::clone(&repo), true);

        let err = run_transition("send", &state, "404", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::NotFound));
    }

    #[tokio::test]
    async fn unregistered_name_is_reported() {
        let repo = Arc::new(MemoryRepo::with(open_invoice(120)));
        let state = action_state(Arc::clone(&repo), true);

        let err = run_transition("archive", &state, "7", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::UnknownTransition(name) if name == "archive"));
    }
}
