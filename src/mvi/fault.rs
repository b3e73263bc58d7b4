//! Catastrophic failures during result computation and how to react to them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An unexpected failure while computing transitions for an action.
///
/// Domain failures (wrong password, expired code) are not faults. They
/// travel inside transitions and end up in the flow's error field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowFault {
    /// The transition source reported an unrecoverable error.
    #[error("transition source failed: {message}")]
    Source { message: String },

    /// The transition source panicked while being polled.
    #[error("transition computation panicked: {message}")]
    Panicked { message: String },
}

impl FlowFault {
    pub fn source(message: impl Into<String>) -> Self {
        FlowFault::Source {
            message: message.into(),
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        FlowFault::Panicked { message }
    }
}

/// What the reducer does when a [`FlowFault`] surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Publish the initial state again, discarding field input, loading
    /// and error state. Matches the behavior existing consumers rely on.
    #[default]
    Reset,

    /// Drop the rest of the faulting action's transitions and keep the
    /// current state. The flows also turn backend faults into the
    /// attempt's catch-all failure code under this policy, so a faulting
    /// submit does not leave them loading.
    Discard,
}
