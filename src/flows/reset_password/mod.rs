//! "Reset password": set a new password with the code from a reset link.
//!
//! The flow waits for the out-of-band code before it accepts input. Password
//! and confirmation are stamped independently, and `passwords_match` is
//! recomputed whenever either changes.

mod action;
mod state;
mod transition;

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;

use crate::auth::{AuthProvider, ResetPasswordError};
use crate::config::FlowsConfig;
use crate::flows::Validators;
use crate::mvi::{ActionSink, FaultPolicy, Observable, ReducerStats, StateReducer};

pub use action::{ResetPasswordAction, ResetPasswordInput};
pub use state::ResetPasswordState;
pub use transition::ResetPasswordTransition;

pub struct ResetPasswordStrategy {
    validators: Validators,
    provider: Arc<dyn AuthProvider>,
    policy: FaultPolicy,
}

/// A running reset-password flow.
pub struct ResetPasswordFlow {
    reducer: StateReducer<ResetPasswordState>,
    inputs: ActionSink<ResetPasswordInput>,
}

impl ResetPasswordFlow {
    pub fn new(provider: Arc<dyn AuthProvider>, config: &FlowsConfig) -> Self {
        let validators = Validators::from_provider(Arc::clone(&provider));
        Self::with_validators(provider, validators, config)
    }

    /// Only the password predicate of `validators` is used.
    pub fn with_validators(
        provider: Arc<dyn AuthProvider>,
        validators: Validators,
        config: &FlowsConfig,
    ) -> Self {
        Self::with_initial_password(provider, validators, String::new(), config)
    }

    /// Pre-fill both password fields with `password`.
    pub fn with_initial_password(
        provider: Arc<dyn AuthProvider>,
        validators: Validators,
        password: impl Into<String>,
        config: &FlowsConfig,
    ) -> Self {
        let strategy = Arc::new(ResetPasswordStrategy {
            validators,
            provider,
            policy: config.fault_policy,
        });
        let (inputs, received) = ActionSink::channel();
        let actions =
            received.map(move |input| ResetPasswordAction::new(input, Arc::clone(&strategy)));
        let reducer = StateReducer::spawn(
            "reset-password",
            ResetPasswordState::new(password.into()),
            actions,
            config.fault_policy,
        );
        tracing::debug!(id = %reducer.id(), "reset-password flow started");
        Self { reducer, inputs }
    }

    pub fn set_oob_code(&self, code: impl Into<String>) -> bool {
        self.inputs.send(ResetPasswordInput::OobCode(code.into()))
    }

    pub fn failed_to_get_link(&self) -> bool {
        self.inputs.send(ResetPasswordInput::FailedToGetLink)
    }

    pub fn password_input(&self, text: impl Into<String>) -> bool {
        self.inputs.send(ResetPasswordInput::PasswordChanged(text.into()))
    }

    pub fn confirm_password_input(&self, text: impl Into<String>) -> bool {
        self.inputs
            .send(ResetPasswordInput::ConfirmPasswordChanged(text.into()))
    }

    pub fn submit(&self) -> bool {
        self.inputs.send(ResetPasswordInput::Submit)
    }

    pub fn inputs(&self) -> ActionSink<ResetPasswordInput> {
        self.inputs.clone()
    }

    pub fn password(&self) -> Observable<String> {
        self.reducer.select(|s| s.password.value)
    }

    pub fn confirm_password(&self) -> Observable<String> {
        self.reducer.select(|s| s.confirm_password.value)
    }

    pub fn passwords_match(&self) -> Observable<bool> {
        self.reducer.select(|s| s.passwords_match)
    }

    pub fn loading(&self) -> Observable<bool> {
        self.reducer.select(|s| s.loading)
    }

    pub fn error(&self) -> Observable<Option<ResetPasswordError>> {
        self.reducer.select(|s| s.error)
    }

    pub fn failed_to_get_oob(&self) -> Observable<bool> {
        self.reducer.select(|s| s.failed_to_get_oob)
    }

    /// Resolves once the new password is set; `false` if the flow stopped
    /// first.
    pub async fn completed(&self) -> bool {
        self.reducer.wait_for(|s| s.success).await.is_some()
    }

    pub fn state(&self) -> ResetPasswordState {
        self.reducer.current()
    }

    pub fn stats(&self) -> ReducerStats {
        self.reducer.stats()
    }

    pub fn shutdown(self) {
        self.reducer.shutdown();
    }
}

impl fmt::Debug for ResetPasswordFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordFlow")
            .field("id", &self.reducer.id())
            .finish_non_exhaustive()
    }
}
