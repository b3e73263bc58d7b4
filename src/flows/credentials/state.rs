//! State for the email + password credential flows.

use crate::auth::{FailureCode, UserInfo};
use crate::mvi::{Stamped, UiState};

/// Where a credentials flow is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialsPhase {
    /// Accepting input.
    Idle,
    /// Waiting for the backend.
    Loading,
    /// The backend accepted the credentials. Terminal.
    Successful(UserInfo),
}

/// Snapshot of a login or sign-up screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialsState<E> {
    pub email: Stamped<String>,
    pub password: Stamped<String>,
    pub email_valid: bool,
    pub password_valid: bool,
    /// Failure code of the last attempt, cleared when a new one begins.
    pub error: Option<E>,
    pub phase: CredentialsPhase,
}

impl<E: FailureCode> UiState for CredentialsState<E> {}

impl<E> CredentialsState<E> {
    pub fn new(email: String, password: String, email_valid: bool, password_valid: bool) -> Self {
        Self {
            email: Stamped::new(email),
            password: Stamped::new(password),
            email_valid,
            password_valid,
            error: None,
            phase: CredentialsPhase::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, CredentialsPhase::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, CredentialsPhase::Loading)
    }

    /// The signed-in user, once the flow has succeeded.
    pub fn user(&self) -> Option<&UserInfo> {
        match &self.phase {
            CredentialsPhase::Successful(user) => Some(user),
            _ => None,
        }
    }

    pub fn button_enabled(&self) -> bool {
        self.email_valid && self.password_valid
    }
}
