//! State for the reset-password flow.

use crate::auth::ResetPasswordError;
use crate::mvi::{Stamped, UiState};

/// Snapshot of the "choose a new password" screen.
///
/// The flow starts out loading: it cannot do anything until the
/// out-of-band code from the reset link arrives (or fails to).
#[derive(Debug, Clone, PartialEq)]
pub struct ResetPasswordState {
    pub password: Stamped<String>,
    pub confirm_password: Stamped<String>,
    pub passwords_match: bool,
    pub error: Option<ResetPasswordError>,
    pub failed_to_get_oob: bool,
    pub loading: bool,
    pub success: bool,
    pub oob_code: Option<String>,
}

impl UiState for ResetPasswordState {}

impl ResetPasswordState {
    /// Waiting for the code, with both fields pre-filled with `password`.
    pub fn new(password: String) -> Self {
        Self {
            password: Stamped::new(password.clone()),
            confirm_password: Stamped::new(password),
            passwords_match: true,
            error: None,
            failed_to_get_oob: false,
            loading: true,
            success: false,
            oob_code: None,
        }
    }

    pub fn has_code(&self) -> bool {
        self.oob_code.is_some()
    }

    /// Whether the password fields accept edits.
    pub fn is_editable(&self) -> bool {
        !self.loading && !self.success && self.has_code()
    }

    pub(crate) fn with_match_recomputed(mut self) -> Self {
        self.passwords_match = self.password.value == self.confirm_password.value;
        self
    }
}

impl Default for ResetPasswordState {
    fn default() -> Self {
        Self::new(String::new())
    }
}
