//! Transitions for the forgot-password flow.

use crate::auth::RequestPasswordResetError;
use crate::mvi::Transition;

use super::state::ForgotPasswordState;

#[derive(Debug, Clone, PartialEq)]
pub enum ForgotPasswordTransition {
    UpdateEmail { text: String, valid: bool, stamp: u64 },
    Begin,
    Complete(Result<(), RequestPasswordResetError>),
}

impl Transition<ForgotPasswordState> for ForgotPasswordTransition {
    fn valid_transformation(&self, state: &ForgotPasswordState) -> bool {
        match self {
            ForgotPasswordTransition::UpdateEmail { stamp, .. } => {
                state.email.is_superseded_by(*stamp)
            }
            ForgotPasswordTransition::Begin => !state.loading,
            ForgotPasswordTransition::Complete(_) => state.loading,
        }
    }

    fn apply(self, state: &ForgotPasswordState) -> ForgotPasswordState {
        match self {
            ForgotPasswordTransition::UpdateEmail { text, valid, stamp } => ForgotPasswordState {
                email: state.email.advance(text, stamp),
                email_valid: valid,
                ..state.clone()
            },
            ForgotPasswordTransition::Begin => ForgotPasswordState {
                loading: true,
                error: None,
                ..state.clone()
            },
            ForgotPasswordTransition::Complete(Ok(())) => ForgotPasswordState {
                loading: false,
                success: true,
                ..state.clone()
            },
            ForgotPasswordTransition::Complete(Err(code)) => ForgotPasswordState {
                loading: false,
                error: Some(code),
                ..state.clone()
            },
        }
    }
}
