//! Core contracts between the domain model and the generated actions.
//!
//! This module defines the capability surface the adapter binds against:
//! - State values via the `State` trait
//! - The `StateModel` contract (state field access + declared registry)
//! - `Transition` descriptors with guard, permission, argument-builder and
//!   action slots
//! - The immutable `TransitionRegistry`
//!
//! Everything here is side-effect-free; I/O lives in `crate::actions`.

mod guard;
mod model;
mod permission;
mod registry;
mod state;
mod transition;

pub use guard::Guard;
pub use model::StateModel;
pub use permission::Permission;
pub use registry::TransitionRegistry;
pub use state::State;
pub use transition::{
    ArgumentBuilder, Transition, TransitionAction, TransitionArgs, TransitionError,
};
