//! Base trait for actions (user/system input) in MVI architecture.

use super::state::UiState;
use super::transition::{Transition, Transitions};

/// An input event plus the logic that decides what it does.
///
/// Actions represent:
/// - User input (text changes, button clicks)
/// - System events (an out-of-band code arriving, a link failing to resolve)
///
/// The reducer first asks [`Action::valid_action`] against the current
/// state and silently drops the action when it returns false. Otherwise
/// [`Action::compute_results`] produces the transitions, which may take
/// arbitrarily long (network calls) and may yield any number of items.
pub trait Action<S: UiState>: Send + 'static {
    /// Transition type this action produces.
    type Transition: Transition<S>;

    /// Whether this action may run against `state`.
    fn valid_action(&self, state: &S) -> bool;

    /// Compute the transitions for this action, given the state it was
    /// accepted against.
    fn compute_results(self, state: &S) -> Transitions<Self::Transition>;
}
