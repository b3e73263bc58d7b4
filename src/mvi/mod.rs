//! Model-View-Intent (MVI) state management.
//!
//! Every authentication flow is built from the same primitives:
//!
//! ```text
//! ActionSink ──→ Action ──→ Transition ──→ State ──→ Observable
//!     ↑                                                  │
//!     └──────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot of a flow, held in a single replaying slot
//! - **Action**: an input plus the logic deciding eligibility and effects
//! - **Transition**: a state-transformation instruction that re-checks the
//!   live state before it is applied
//! - **StateReducer**: the single writer serialising all of the above

mod action;
mod fault;
pub mod observe;
mod reducer;
mod sink;
mod state;
pub mod transition;

pub use action::Action;
pub use fault::{FaultPolicy, FlowFault};
pub use observe::ObserveExt;
pub use reducer::{Observable, ReducerStats, StateReducer};
pub use sink::ActionSink;
pub use state::{Stamped, UiState};
pub use transition::{Transition, Transitions};
