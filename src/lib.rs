//! fsm-actions: state machine transitions as web API actions
//!
//! Given a model whose lifecycle is governed by declared transitions
//! (guard conditions, permission checks, side effects), this crate
//! synthesizes one HTTP endpoint per distinct transition name on an axum
//! resource router. Each generated handler loads the resource, checks the
//! guard, checks the caller's permission, invokes the transition with its
//! declared arguments, persists the result and returns the updated
//! representation.
//!
//! # Core Concepts
//!
//! - **State**: lifecycle state values via the `State` trait
//! - **StateModel**: the model contract — state field access plus a
//!   class-level declared transition registry
//! - **Transition**: a named, guarded state change with optional
//!   permission, argument-builder and action slots
//! - **TransitionActions**: the generated bundle, composable into a
//!   resource router
//!
//! # Example
//!
//! ```rust
//! use fsm_actions::builder::{BuildError, RegistryBuilder, TransitionBuilder};
//! use fsm_actions::core::{State, StateModel, TransitionRegistry};
//! use fsm_actions::actions::TransitionActions;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
//! enum OrderStatus {
//!     Pending,
//!     Paid,
//!     Shipped,
//! }
//!
//! impl State for OrderStatus {
//!     fn name(&self) -> &str {
//!         match self {
//!             Self::Pending => "pending",
//!             Self::Paid => "paid",
//!             Self::Shipped => "shipped",
//!         }
//!     }
//!
//!     fn is_final(&self) -> bool {
//!         matches!(self, Self::Shipped)
//!     }
//! }
//!
//! #[derive(Clone, Serialize)]
//! struct Order {
//!     id: u64,
//!     status: OrderStatus,
//! }
//!
//! #[derive(Clone)]
//! struct Staff {
//!     can_ship: bool,
//! }
//!
//! impl StateModel for Order {
//!     type State = OrderStatus;
//!     type Principal = Staff;
//!
//!     fn state(&self) -> &OrderStatus {
//!         &self.status
//!     }
//!
//!     fn set_state(&mut self, status: OrderStatus) {
//!         self.status = status;
//!     }
//!
//!     fn transitions() -> Result<TransitionRegistry<Self>, BuildError> {
//!         RegistryBuilder::new()
//!             .transition(
//!                 TransitionBuilder::new("pay")
//!                     .from(OrderStatus::Pending)
//!                     .to(OrderStatus::Paid),
//!             )?
//!             .transition(
//!                 TransitionBuilder::new("ship")
//!                     .from(OrderStatus::Paid)
//!                     .to(OrderStatus::Shipped)
//!                     .authorize(|_: &Order, staff: &Staff| staff.can_ship),
//!             )?
//!             .build()
//!     }
//! }
//!
//! # fn main() -> Result<(), BuildError> {
//! let actions = TransitionActions::<Order>::for_model()?;
//! assert_eq!(actions.transition_names(), ["pay", "ship"]);
//! // actions.into_router(repository) yields one POST route per name,
//! // ready to nest under "/orders".
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod builder;
pub mod core;

// Re-export commonly used types
pub use crate::actions::{
    ActionError, ActionState, Repository, RepositoryError, RouteOptions, TransitionActions,
};
pub use crate::builder::{BuildError, RegistryBuilder, TransitionBuilder};
pub use crate::core::{
    Guard, Permission, State, StateModel, Transition, TransitionArgs, TransitionError,
    TransitionRegistry,
};
