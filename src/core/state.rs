//! Core State trait for lifecycle states.
//!
//! Every model whose transitions are exposed as web actions carries a
//! current-state field of a type implementing this trait. The trait gives
//! the adapter the little it needs: a stable name for routing and logging,
//! and a terminal flag.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle state values.
///
/// States are plain immutable values. The adapter never interprets them
/// beyond equality (source matching) and naming (logs, diagnostics);
/// everything else about the state field belongs to the domain model.
///
/// # Required Traits
///
/// - `Clone`: descriptors store source and target states by value
/// - `PartialEq`: source-state matching compares against the live instance
/// - `Debug`: diagnostics
/// - `Serialize` + `Deserialize`: states travel inside the serialized
///   resource representation returned by generated endpoints
///
/// # Example
///
/// ```rust
/// use fsm_actions::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum OrderStatus {
///     Pending,
///     Paid,
///     Shipped,
/// }
///
/// impl State for OrderStatus {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "pending",
///             Self::Paid => "paid",
///             Self::Shipped => "shipped",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Shipped)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Terminal states typically declare no outgoing transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
