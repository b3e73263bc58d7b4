//! "Forgot password": request a reset link for an email address.
//!
//! The visible email text is debounced so fast typing does not flood
//! observers. Once the request succeeds the flow is finished.

mod action;
mod state;
mod transition;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};

use crate::auth::{AuthError, AuthProvider, RequestPasswordResetError};
use crate::config::FlowsConfig;
use crate::flows::Validators;
use crate::mvi::{ActionSink, FaultPolicy, ObserveExt, Observable, ReducerStats, StateReducer};

pub use action::{ForgotPasswordAction, ForgotPasswordInput};
pub use state::ForgotPasswordState;
pub use transition::ForgotPasswordTransition;

/// Outcome of a reset request: an out-of-band code if the backend hands
/// one back directly.
pub type ResetRequestOutcome = Result<Option<String>, AuthError<RequestPasswordResetError>>;

/// The call made when the user presses "send".
pub type RequestReset = Arc<dyn Fn(String) -> BoxFuture<'static, ResetRequestOutcome> + Send + Sync>;

pub struct ForgotPasswordStrategy {
    validators: Validators,
    request: RequestReset,
    policy: FaultPolicy,
}

/// Configures a [`ForgotPasswordFlow`] before it starts.
pub struct ForgotPasswordBuilder {
    validators: Validators,
    request: RequestReset,
    initial_email: String,
}

impl ForgotPasswordBuilder {
    fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let validators = Validators::from_provider(Arc::clone(&provider));
        let request: RequestReset = Arc::new(move |email: String| {
            let provider = Arc::clone(&provider);
            async move { provider.request_password_reset(&email).await }.boxed()
        });
        Self {
            validators,
            request,
            initial_email: String::new(),
        }
    }

    pub fn with_email_validator<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validators = self.validators.with_email(validate);
        self
    }

    /// Replace the backend call made on "send".
    pub fn with_request<F, Fut>(mut self, request: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ResetRequestOutcome> + Send + 'static,
    {
        self.request = Arc::new(move |email: String| request(email).boxed());
        self
    }

    /// Pre-fill the email field, e.g. with what the user typed on login.
    pub fn with_initial_email(mut self, email: impl Into<String>) -> Self {
        self.initial_email = email.into();
        self
    }

    pub fn start(self, config: &FlowsConfig) -> ForgotPasswordFlow {
        let email_valid = self.validators.email(&self.initial_email);
        let initial = ForgotPasswordState::new(self.initial_email, email_valid);
        let strategy = Arc::new(ForgotPasswordStrategy {
            validators: self.validators,
            request: self.request,
            policy: config.fault_policy,
        });

        let (inputs, received) = ActionSink::channel();
        let actions =
            received.map(move |input| ForgotPasswordAction::new(input, Arc::clone(&strategy)));
        let reducer = StateReducer::spawn("forgot-password", initial, actions, config.fault_policy);
        tracing::debug!(id = %reducer.id(), "forgot-password flow started");

        ForgotPasswordFlow {
            reducer,
            inputs,
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }
}

/// A running "forgot password" flow.
pub struct ForgotPasswordFlow {
    reducer: StateReducer<ForgotPasswordState>,
    inputs: ActionSink<ForgotPasswordInput>,
    debounce: Duration,
}

impl ForgotPasswordFlow {
    pub fn new(provider: Arc<dyn AuthProvider>, config: &FlowsConfig) -> Self {
        Self::builder(provider).start(config)
    }

    pub fn builder(provider: Arc<dyn AuthProvider>) -> ForgotPasswordBuilder {
        ForgotPasswordBuilder::new(provider)
    }

    pub fn email_input(&self, text: impl Into<String>) -> bool {
        self.inputs.send(ForgotPasswordInput::EmailChanged(text.into()))
    }

    pub fn send(&self) -> bool {
        self.inputs.send(ForgotPasswordInput::Send)
    }

    pub fn inputs(&self) -> ActionSink<ForgotPasswordInput> {
        self.inputs.clone()
    }

    /// Email text, emitted once typing pauses.
    pub fn email(&self) -> Observable<String> {
        self.reducer
            .subscribe()
            .map(|s| s.email.value)
            .debounce(self.debounce)
            .distinct_until_changed()
            .boxed()
    }

    pub fn email_valid(&self) -> Observable<bool> {
        self.reducer.select(|s| s.email_valid)
    }

    pub fn loading(&self) -> Observable<bool> {
        self.reducer.select(|s| s.loading)
    }

    pub fn error(&self) -> Observable<Option<RequestPasswordResetError>> {
        self.reducer.select(|s| s.error)
    }

    pub fn email_sent(&self) -> Observable<bool> {
        self.reducer.select(|s| s.success)
    }

    /// Resolves once the reset email has been sent; `false` if the flow
    /// stopped first.
    pub async fn completed(&self) -> bool {
        self.reducer.wait_for(|s| s.success).await.is_some()
    }

    pub fn state(&self) -> ForgotPasswordState {
        self.reducer.current()
    }

    pub fn stats(&self) -> ReducerStats {
        self.reducer.stats()
    }

    pub fn shutdown(self) {
        self.reducer.shutdown();
    }
}

impl fmt::Debug for ForgotPasswordFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgotPasswordFlow")
            .field("id", &self.reducer.id())
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}
