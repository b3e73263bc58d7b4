//! State for the forgot-password flow.

use crate::auth::RequestPasswordResetError;
use crate::mvi::{Stamped, UiState};

/// Snapshot of the "forgot password" screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ForgotPasswordState {
    pub email: Stamped<String>,
    pub email_valid: bool,
    pub loading: bool,
    pub error: Option<RequestPasswordResetError>,
    /// The reset email went out. Terminal.
    pub success: bool,
}

impl UiState for ForgotPasswordState {}

impl ForgotPasswordState {
    pub fn new(email: String, email_valid: bool) -> Self {
        Self {
            email: Stamped::new(email),
            email_valid,
            loading: false,
            error: None,
            success: false,
        }
    }

    /// Whether the screen still accepts input.
    pub fn is_editable(&self) -> bool {
        !self.loading && !self.success
    }
}
