//! The state reducer: serialises asynchronous actions into one state stream.
//!
//! ```text
//! ActionSink ──→ valid_action? ──→ compute_results ──→ valid_transformation? ──→ apply ──→ watch slot
//!                     │ no                │ fault                    │ no
//!                     ▼                   ▼                          ▼
//!                  dropped          FaultPolicy                   dropped
//! ```
//!
//! A single driver task owns the write side of the state slot, so every
//! transition is checked and applied against the state that is live at that
//! moment, one at a time. Transitions that are ready without suspending are
//! applied before the next action is read; anything that has to wait (a
//! backend call) moves to a worker task and is delivered back to the driver.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::stream::{BoxStream, Stream, StreamExt};
use futures::FutureExt;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio_stream::wrappers::WatchStream;
use tracing::Instrument;
use uuid::Uuid;

use super::action::Action;
use super::fault::{FaultPolicy, FlowFault};
use super::observe::ObserveExt;
use super::state::UiState;
use super::transition::{Transition, Transitions};

/// A derived, read-only view of a reducer's state.
pub type Observable<T> = BoxStream<'static, T>;

/// Counters describing what a reducer has done so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReducerStats {
    pub actions_accepted: u64,
    pub actions_discarded: u64,
    pub transitions_applied: u64,
    pub transitions_discarded: u64,
    pub faults: u64,
}

#[derive(Default)]
struct StatsCells {
    actions_accepted: AtomicU64,
    actions_discarded: AtomicU64,
    transitions_applied: AtomicU64,
    transitions_discarded: AtomicU64,
    faults: AtomicU64,
}

impl StatsCells {
    fn bump(cell: &AtomicU64) {
        cell.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ReducerStats {
        ReducerStats {
            actions_accepted: self.actions_accepted.load(Ordering::Relaxed),
            actions_discarded: self.actions_discarded.load(Ordering::Relaxed),
            transitions_applied: self.transitions_applied.load(Ordering::Relaxed),
            transitions_discarded: self.transitions_discarded.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }
}

/// Handle to a running reducer.
///
/// Owns the driver task: dropping the handle (or calling
/// [`StateReducer::shutdown`]) stops it and aborts any in-flight result
/// computation. The last published state stays readable afterwards.
pub struct StateReducer<S: UiState> {
    name: &'static str,
    id: Uuid,
    state: watch::Receiver<S>,
    stats: Arc<StatsCells>,
    driver: JoinHandle<()>,
}

impl<S: UiState> StateReducer<S> {
    /// Start a reducer on the current tokio runtime.
    ///
    /// `actions` is the merged input of the flow; the driver reads it until
    /// it ends. `name` only labels log output.
    pub fn spawn<A, St>(name: &'static str, initial: S, actions: St, policy: FaultPolicy) -> Self
    where
        A: Action<S>,
        St: Stream<Item = A> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let stats = Arc::new(StatsCells::default());
        let (results_tx, results_rx) = mpsc::unbounded_channel::<Delivery<A::Transition>>();

        let driver = Driver {
            initial,
            state: state_tx,
            policy,
            stats: Arc::clone(&stats),
            workers: JoinSet::new(),
            results: results_tx,
        };

        let span = tracing::debug_span!("flow", name, %id);
        let driver = tokio::spawn(driver.run(actions.boxed(), results_rx).instrument(span));

        Self {
            name,
            id,
            state: state_rx,
            stats,
            driver,
        }
    }

    /// Flow label given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Unique id of this reducer instance, as it appears in log spans.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The latest published state.
    pub fn current(&self) -> S {
        self.state.borrow().clone()
    }

    /// Stream of states, starting with the current one.
    pub fn subscribe(&self) -> WatchStream<S> {
        WatchStream::new(self.state.clone())
    }

    /// Derived view of one aspect of the state, without consecutive repeats.
    pub fn select<T, F>(&self, project: F) -> Observable<T>
    where
        T: Clone + PartialEq + Send + Unpin + 'static,
        F: FnMut(S) -> T + Send + 'static,
    {
        self.subscribe().map(project).distinct_until_changed().boxed()
    }

    /// Wait for the first state (current or future) matching `predicate`.
    ///
    /// Returns `None` if the reducer stops before any state matches.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Option<S>
    where
        F: FnMut(&S) -> bool + Send,
    {
        let mut state = self.state.clone();
        let matched = state.wait_for(|s| predicate(s)).await;
        matched.ok().map(|s| (*s).clone())
    }

    pub fn stats(&self) -> ReducerStats {
        self.stats.snapshot()
    }

    /// Whether the driver is still processing input.
    pub fn is_running(&self) -> bool {
        !self.driver.is_finished()
    }

    /// Stop the driver and abort in-flight computations.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl<S: UiState> Drop for StateReducer<S> {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

type Delivery<T> = Result<T, FlowFault>;

struct Driver<S: UiState, T> {
    initial: S,
    state: watch::Sender<S>,
    policy: FaultPolicy,
    stats: Arc<StatsCells>,
    workers: JoinSet<()>,
    results: mpsc::UnboundedSender<Delivery<T>>,
}

impl<S, T> Driver<S, T>
where
    S: UiState,
    T: Transition<S>,
{
    async fn run<A>(
        mut self,
        mut actions: BoxStream<'static, A>,
        mut results: mpsc::UnboundedReceiver<Delivery<T>>,
    ) where
        A: Action<S, Transition = T>,
    {
        tracing::debug!("reducer started");
        let mut accepting = true;

        loop {
            if !accepting && self.workers.is_empty() {
                while let Ok(delivery) = results.try_recv() {
                    self.deliver(delivery);
                }
                break;
            }

            tokio::select! {
                biased;
                Some(delivery) = results.recv() => self.deliver(delivery),
                action = actions.next(), if accepting => match action {
                    Some(action) => self.dispatch(action),
                    None => {
                        tracing::debug!("action sources closed");
                        accepting = false;
                    }
                },
                Some(joined) = self.workers.join_next(), if !self.workers.is_empty() => {
                    if let Err(err) = joined {
                        tracing::debug!(error = %err, "result worker ended abnormally");
                    }
                }
                else => break,
            }
        }

        tracing::debug!("reducer stopped");
    }

    fn dispatch<A>(&mut self, action: A)
    where
        A: Action<S, Transition = T>,
    {
        let computed = {
            let current = self.state.borrow();
            if !action.valid_action(&current) {
                StatsCells::bump(&self.stats.actions_discarded);
                tracing::debug!("action discarded");
                return;
            }
            std::panic::catch_unwind(AssertUnwindSafe(|| action.compute_results(&current)))
        };
        StatsCells::bump(&self.stats.actions_accepted);

        let mut transitions = match computed {
            Ok(transitions) => transitions,
            Err(payload) => {
                self.fault(FlowFault::from_panic(payload));
                return;
            }
        };

        loop {
            let polled = AssertUnwindSafe(transitions.next())
                .catch_unwind()
                .now_or_never();
            match polled {
                Some(Ok(Some(Ok(transition)))) => self.settle(transition),
                Some(Ok(Some(Err(fault)))) => {
                    self.fault(fault);
                    return;
                }
                Some(Ok(None)) => return,
                Some(Err(payload)) => {
                    self.fault(FlowFault::from_panic(payload));
                    return;
                }
                None => {
                    self.workers
                        .spawn(forward(transitions, self.results.clone()).in_current_span());
                    return;
                }
            }
        }
    }

    fn deliver(&mut self, delivery: Delivery<T>) {
        match delivery {
            Ok(transition) => self.settle(transition),
            Err(fault) => self.fault(fault),
        }
    }

    fn settle(&mut self, transition: T) {
        let checked = {
            let current = self.state.borrow();
            std::panic::catch_unwind(AssertUnwindSafe(|| {
                if transition.valid_transformation(&current) {
                    Some(transition.apply(&current))
                } else {
                    None
                }
            }))
        };
        match checked {
            Ok(Some(next)) => {
                self.state.send_replace(next);
                StatsCells::bump(&self.stats.transitions_applied);
                tracing::trace!("transition applied");
            }
            Ok(None) => {
                StatsCells::bump(&self.stats.transitions_discarded);
                tracing::debug!("stale transition discarded");
            }
            Err(payload) => self.fault(FlowFault::from_panic(payload)),
        }
    }

    fn fault(&mut self, fault: FlowFault) {
        StatsCells::bump(&self.stats.faults);
        match self.policy {
            FaultPolicy::Reset => {
                tracing::warn!(error = %fault, "result computation failed, resetting flow state");
                self.state.send_replace(self.initial.clone());
            }
            FaultPolicy::Discard => {
                tracing::warn!(error = %fault, "result computation failed, discarding action");
            }
        }
    }
}

/// Drain a suspended transition sequence on a worker task.
async fn forward<T: Send + 'static>(
    mut transitions: Transitions<T>,
    results: mpsc::UnboundedSender<Delivery<T>>,
) {
    loop {
        let next = AssertUnwindSafe(transitions.next()).catch_unwind().await;
        let delivery = match next {
            Ok(Some(Ok(transition))) => Ok(transition),
            Ok(Some(Err(fault))) => Err(fault),
            Ok(None) => return,
            Err(payload) => Err(FlowFault::from_panic(payload)),
        };
        let stop = delivery.is_err();
        if results.send(delivery).is_err() || stop {
            return;
        }
    }
}
