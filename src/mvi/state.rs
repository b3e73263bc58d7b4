//! Base trait for flow state in MVI architecture.

/// Marker trait for state snapshots.
///
/// States should be:
/// - Immutable (Clone to create new states, never mutated in place)
/// - Self-contained (everything an observer needs to derive its values)
/// - Shareable across the driver task and observers (Send + Sync)
pub trait UiState: Clone + Send + Sync + 'static {}

/// A value paired with its staleness counter.
///
/// Each independently editable field carries its own counter. An update
/// stamped `n` is only applied while the live field's stamp is below `n`,
/// so a late update can never overwrite a newer edit of the same field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stamped<T> {
    pub value: T,
    pub stamp: u64,
}

impl<T> Stamped<T> {
    /// Initial value at stamp zero.
    pub fn new(value: T) -> Self {
        Self { value, stamp: 0 }
    }

    /// Stamp to use for the next update computed against this value.
    pub fn next_stamp(&self) -> u64 {
        self.stamp.saturating_add(1)
    }

    /// Whether an update carrying `stamp` is newer than this value.
    pub fn is_superseded_by(&self, stamp: u64) -> bool {
        self.stamp < stamp
    }

    /// Replace the value with a newer one.
    pub fn advance(&self, value: T, stamp: u64) -> Self {
        Self { value, stamp }
    }
}
