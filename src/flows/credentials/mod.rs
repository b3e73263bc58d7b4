//! Email + password flows: login and sign-up.
//!
//! Both screens run the same reducer. They differ only in the backend call
//! made on submit ([`Submitter`]) and, optionally, in the [`Validators`]
//! deciding field validity.

mod action;
mod login;
mod signup;
mod state;
mod transition;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use crate::auth::{AuthError, FailureCode, UserInfo};
use crate::config::FlowsConfig;
use crate::flows::Validators;
use crate::mvi::{ActionSink, FaultPolicy, Observable, ReducerStats, StateReducer};

pub use action::{CredentialsAction, CredentialsInput};
pub use login::{LoginFlow, SignIn};
pub use signup::{SignUp, SignUpFlow};
pub use state::{CredentialsPhase, CredentialsState};
pub use transition::CredentialsTransition;

/// The backend call a credentials flow makes on submit.
#[async_trait]
pub trait Submitter: Send + Sync + 'static {
    type Error: FailureCode;

    async fn submit(&self, email: &str, password: &str)
        -> Result<UserInfo, AuthError<Self::Error>>;
}

/// Field text a credentials flow starts with, e.g. an email remembered from
/// an earlier screen. Validity is derived from the flow's [`Validators`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialCredentials {
    pub email: String,
    pub password: String,
}

impl InitialCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    fn into_state<E: FailureCode>(self, validators: &Validators) -> CredentialsState<E> {
        let email_valid = validators.email(&self.email);
        let password_valid = validators.password(&self.password);
        CredentialsState::new(self.email, self.password, email_valid, password_valid)
    }
}

/// Strategies shared by every action of one flow instance.
pub struct CredentialsStrategy<Sub> {
    validators: Validators,
    submitter: Sub,
    policy: FaultPolicy,
}

impl<Sub: Submitter> CredentialsStrategy<Sub> {
    pub fn new(validators: Validators, submitter: Sub) -> Self {
        Self {
            validators,
            submitter,
            policy: FaultPolicy::default(),
        }
    }
}

/// A running credentials flow: observables out, sinks in.
///
/// Dropping the flow stops its reducer and abandons any backend call still
/// in flight.
pub struct CredentialsFlow<Sub: Submitter> {
    reducer: StateReducer<CredentialsState<Sub::Error>>,
    inputs: ActionSink<CredentialsInput>,
}

impl<Sub: Submitter> CredentialsFlow<Sub> {
    /// Start a flow from `initial` with the given strategies.
    pub fn spawn(
        name: &'static str,
        initial: CredentialsState<Sub::Error>,
        strategy: CredentialsStrategy<Sub>,
        config: &FlowsConfig,
    ) -> Self {
        let strategy = Arc::new(CredentialsStrategy {
            policy: config.fault_policy,
            ..strategy
        });
        let (inputs, received) = ActionSink::channel();
        let actions =
            received.map(move |input| CredentialsAction::new(input, Arc::clone(&strategy)));
        let reducer = StateReducer::spawn(name, initial, actions, config.fault_policy);
        tracing::debug!(flow = name, id = %reducer.id(), "credentials flow started");
        Self { reducer, inputs }
    }

    pub fn email_input(&self, text: impl Into<String>) -> bool {
        self.inputs.send(CredentialsInput::EmailChanged(text.into()))
    }

    pub fn password_input(&self, text: impl Into<String>) -> bool {
        self.inputs.send(CredentialsInput::PasswordChanged(text.into()))
    }

    pub fn submit(&self) -> bool {
        self.inputs.send(CredentialsInput::Submit)
    }

    /// Cloneable input handle, for feeding the flow from another task.
    pub fn inputs(&self) -> ActionSink<CredentialsInput> {
        self.inputs.clone()
    }

    pub fn email(&self) -> Observable<String> {
        self.reducer.select(|s| s.email.value)
    }

    pub fn password(&self) -> Observable<String> {
        self.reducer.select(|s| s.password.value)
    }

    pub fn email_valid(&self) -> Observable<bool> {
        self.reducer.select(|s| s.email_valid)
    }

    pub fn password_valid(&self) -> Observable<bool> {
        self.reducer.select(|s| s.password_valid)
    }

    pub fn button_enabled(&self) -> Observable<bool> {
        self.reducer.select(|s| s.button_enabled())
    }

    pub fn loading(&self) -> Observable<bool> {
        self.reducer.select(|s| s.is_loading())
    }

    pub fn error(&self) -> Observable<Option<Sub::Error>> {
        self.reducer.select(|s| s.error)
    }

    /// Resolves with the signed-in user once the flow succeeds.
    ///
    /// Returns `None` if the flow stops first.
    pub async fn completed(&self) -> Option<UserInfo> {
        let done = self.reducer.wait_for(|s| s.user().is_some()).await?;
        done.user().cloned()
    }

    pub fn state(&self) -> CredentialsState<Sub::Error> {
        self.reducer.current()
    }

    pub fn stats(&self) -> ReducerStats {
        self.reducer.stats()
    }

    pub fn shutdown(self) {
        self.reducer.shutdown();
    }
}

impl<Sub: Submitter> fmt::Debug for CredentialsFlow<Sub> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsFlow")
            .field("name", &self.reducer.name())
            .field("id", &self.reducer.id())
            .finish_non_exhaustive()
    }
}
