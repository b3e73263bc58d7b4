//! Actions for the reset-password flow.

use std::sync::Arc;

use futures::future;

use crate::auth::ResetPasswordError;
use crate::mvi::{transition, Action, Transitions};

use super::state::ResetPasswordState;
use super::transition::ResetPasswordTransition;
use super::ResetPasswordStrategy;
use crate::flows::validators::guarded_call;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetPasswordInput {
    /// The out-of-band code extracted from the reset link.
    OobCode(String),
    /// The link could not be read.
    FailedToGetLink,
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    Submit,
}

pub struct ResetPasswordAction {
    input: ResetPasswordInput,
    strategy: Arc<ResetPasswordStrategy>,
}

impl ResetPasswordAction {
    pub fn new(input: ResetPasswordInput, strategy: Arc<ResetPasswordStrategy>) -> Self {
        Self { input, strategy }
    }
}

impl Action<ResetPasswordState> for ResetPasswordAction {
    type Transition = ResetPasswordTransition;

    fn valid_action(&self, state: &ResetPasswordState) -> bool {
        match self.input {
            ResetPasswordInput::OobCode(_) | ResetPasswordInput::FailedToGetLink => {
                !state.has_code()
            }
            ResetPasswordInput::PasswordChanged(_) | ResetPasswordInput::ConfirmPasswordChanged(_) => {
                state.is_editable()
            }
            ResetPasswordInput::Submit => state.is_editable() && state.passwords_match,
        }
    }

    fn compute_results(self, state: &ResetPasswordState) -> Transitions<ResetPasswordTransition> {
        match self.input {
            ResetPasswordInput::OobCode(code) => {
                transition::just(ResetPasswordTransition::SetOobCode(code))
            }
            ResetPasswordInput::FailedToGetLink => {
                transition::just(ResetPasswordTransition::FailedToGetLink)
            }
            ResetPasswordInput::PasswordChanged(text) => {
                transition::just(ResetPasswordTransition::UpdatePassword {
                    text,
                    stamp: state.password.next_stamp(),
                })
            }
            ResetPasswordInput::ConfirmPasswordChanged(text) => {
                transition::just(ResetPasswordTransition::UpdateConfirmPassword {
                    text,
                    stamp: state.confirm_password.next_stamp(),
                })
            }
            ResetPasswordInput::Submit => {
                let password = state.password.value.clone();
                if !self.strategy.validators.password(&password) {
                    return transition::begin_then(
                        ResetPasswordTransition::Begin,
                        future::ready(Ok(ResetPasswordTransition::Complete(Err(
                            ResetPasswordError::InvalidPassword,
                        )))),
                    );
                }

                // valid_action guarantees the code is present
                let code = state.oob_code.clone().unwrap_or_default();
                let provider = Arc::clone(&self.strategy.provider);
                let policy = self.strategy.policy;
                transition::begin_then(ResetPasswordTransition::Begin, async move {
                    let call = provider.perform_password_reset(&code, &password);
                    guarded_call(call, policy)
                        .await
                        .map(ResetPasswordTransition::Complete)
                })
            }
        }
    }
}
