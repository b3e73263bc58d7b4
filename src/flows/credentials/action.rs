//! Actions for the credential flows.

use std::sync::Arc;

use crate::mvi::{transition, Action, Transitions};

use super::state::CredentialsState;
use super::transition::CredentialsTransition;
use super::{CredentialsStrategy, Submitter};
use crate::flows::validators::guarded_call;

/// What the user did on a credentials screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsInput {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
}

/// A [`CredentialsInput`] bound to the strategies that evaluate it.
pub struct CredentialsAction<Sub: Submitter> {
    input: CredentialsInput,
    strategy: Arc<CredentialsStrategy<Sub>>,
}

impl<Sub: Submitter> CredentialsAction<Sub> {
    pub fn new(input: CredentialsInput, strategy: Arc<CredentialsStrategy<Sub>>) -> Self {
        Self { input, strategy }
    }
}

impl<Sub: Submitter> Action<CredentialsState<Sub::Error>> for CredentialsAction<Sub> {
    type Transition = CredentialsTransition<Sub::Error>;

    fn valid_action(&self, state: &CredentialsState<Sub::Error>) -> bool {
        if !state.is_idle() {
            return false;
        }
        match &self.input {
            CredentialsInput::EmailChanged(_) | CredentialsInput::PasswordChanged(_) => true,
            CredentialsInput::Submit => {
                let validators = &self.strategy.validators;
                validators.email(&state.email.value) && validators.password(&state.password.value)
            }
        }
    }

    fn compute_results(
        self,
        state: &CredentialsState<Sub::Error>,
    ) -> Transitions<Self::Transition> {
        let validators = &self.strategy.validators;
        match self.input {
            CredentialsInput::EmailChanged(text) => {
                let valid = validators.email(&text);
                transition::just(CredentialsTransition::UpdateEmail {
                    text,
                    valid,
                    stamp: state.email.next_stamp(),
                })
            }
            CredentialsInput::PasswordChanged(text) => {
                let valid = validators.password(&text);
                transition::just(CredentialsTransition::UpdatePassword {
                    text,
                    valid,
                    stamp: state.password.next_stamp(),
                })
            }
            CredentialsInput::Submit => {
                let strategy = Arc::clone(&self.strategy);
                let policy = strategy.policy;
                let email = state.email.value.clone();
                let password = state.password.value.clone();
                transition::begin_then(CredentialsTransition::Begin, async move {
                    let call = strategy.submitter.submit(&email, &password);
                    guarded_call(call, policy)
                        .await
                        .map(CredentialsTransition::Complete)
                })
            }
        }
    }
}
