//! Generated web actions: the handler factory, the action bundle and the
//! contracts it binds against (repository, request-time errors).

pub mod bundle;
pub mod error;
pub mod handler;
pub mod repository;

pub use bundle::{RouteOptions, TransitionActions};
pub use error::{ActionError, CONDITIONS_NOT_MET};
pub use handler::{make_handler, ActionState};
pub use repository::{Repository, RepositoryError};
