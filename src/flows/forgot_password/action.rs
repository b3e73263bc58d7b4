//! Actions for the forgot-password flow.

use std::sync::Arc;

use crate::mvi::{transition, Action, Transitions};

use super::state::ForgotPasswordState;
use super::transition::ForgotPasswordTransition;
use super::ForgotPasswordStrategy;
use crate::flows::validators::guarded_call;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgotPasswordInput {
    EmailChanged(String),
    Send,
}

pub struct ForgotPasswordAction {
    input: ForgotPasswordInput,
    strategy: Arc<ForgotPasswordStrategy>,
}

impl ForgotPasswordAction {
    pub fn new(input: ForgotPasswordInput, strategy: Arc<ForgotPasswordStrategy>) -> Self {
        Self { input, strategy }
    }
}

impl Action<ForgotPasswordState> for ForgotPasswordAction {
    type Transition = ForgotPasswordTransition;

    fn valid_action(&self, state: &ForgotPasswordState) -> bool {
        match self.input {
            ForgotPasswordInput::EmailChanged(_) => state.is_editable(),
            ForgotPasswordInput::Send => state.is_editable() && state.email_valid,
        }
    }

    fn compute_results(self, state: &ForgotPasswordState) -> Transitions<ForgotPasswordTransition> {
        match self.input {
            ForgotPasswordInput::EmailChanged(text) => {
                let valid = self.strategy.validators.email(&text);
                transition::just(ForgotPasswordTransition::UpdateEmail {
                    text,
                    valid,
                    stamp: state.email.next_stamp(),
                })
            }
            ForgotPasswordInput::Send => {
                let strategy = Arc::clone(&self.strategy);
                let email = state.email.value.clone();
                transition::begin_then(ForgotPasswordTransition::Begin, async move {
                    let call = async { (strategy.request)(email).await };
                    guarded_call(call, strategy.policy).await.map(|outcome| {
                        if matches!(outcome, Ok(Some(_))) {
                            tracing::debug!("backend returned a reset code directly");
                        }
                        ForgotPasswordTransition::Complete(outcome.map(|_| ()))
                    })
                })
            }
        }
    }
}
