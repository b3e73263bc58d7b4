//! Transitions: state-transformation instructions produced by actions.

use futures::future::{self, Future};
use futures::stream::{self, BoxStream, StreamExt};

use super::fault::FlowFault;
use super::state::UiState;

/// A single instruction to move a flow from one state to the next.
///
/// A transition computed against one state may be applied to a later one.
/// [`Transition::valid_transformation`] is checked against the live state
/// at application time and must reject anything that has gone stale.
pub trait Transition<S: UiState>: Send + 'static {
    /// Whether this transition may be applied to `state`.
    fn valid_transformation(&self, state: &S) -> bool;

    /// Produce the next state. Only called after `valid_transformation`
    /// returned true for the same `state`.
    fn apply(self, state: &S) -> S;
}

/// Lazy sequence of transitions computed from one action.
///
/// An `Err` item is a catastrophic fault: the reducer applies its
/// [`FaultPolicy`](super::FaultPolicy) and stops reading the sequence.
pub type Transitions<T> = BoxStream<'static, Result<T, FlowFault>>;

/// A sequence of exactly one transition, ready immediately.
pub fn just<T: Send + 'static>(transition: T) -> Transitions<T> {
    stream::once(future::ready(Ok(transition))).boxed()
}

/// An empty sequence.
pub fn none<T: Send + 'static>() -> Transitions<T> {
    stream::empty().boxed()
}

/// Emit `begin` immediately, then whatever `completion` resolves to.
///
/// `completion` is not polled until `begin` has been taken, so a backend
/// call starts only after the flow has entered its loading state.
pub fn begin_then<T, F>(begin: T, completion: F) -> Transitions<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, FlowFault>> + Send + 'static,
{
    stream::once(future::ready(Ok(begin)))
        .chain(stream::once(completion))
        .boxed()
}
