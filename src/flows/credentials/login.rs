use std::sync::Arc;

use async_trait::async_trait;

use super::{CredentialsFlow, CredentialsStrategy, InitialCredentials, Submitter};
use crate::auth::{AuthError, AuthProvider, SignInError, UserInfo};
use crate::config::FlowsConfig;
use crate::flows::Validators;

/// Submits credentials to [`AuthProvider::sign_in`].
pub struct SignIn {
    provider: Arc<dyn AuthProvider>,
}

impl SignIn {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Submitter for SignIn {
    type Error = SignInError;

    async fn submit(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError<SignInError>> {
        self.provider.sign_in(email, password).await
    }
}

pub type LoginFlow = CredentialsFlow<SignIn>;

impl CredentialsFlow<SignIn> {
    /// Login flow validating with the provider's own rules.
    pub fn new(provider: Arc<dyn AuthProvider>, config: &FlowsConfig) -> Self {
        let validators = Validators::from_provider(Arc::clone(&provider));
        Self::with_validators(provider, validators, config)
    }

    pub fn with_validators(
        provider: Arc<dyn AuthProvider>,
        validators: Validators,
        config: &FlowsConfig,
    ) -> Self {
        Self::with_initial(provider, validators, InitialCredentials::default(), config)
    }

    /// Start with pre-filled fields.
    pub fn with_initial(
        provider: Arc<dyn AuthProvider>,
        validators: Validators,
        initial: InitialCredentials,
        config: &FlowsConfig,
    ) -> Self {
        let state = initial.into_state(&validators);
        let strategy = CredentialsStrategy::new(validators, SignIn::new(provider));
        Self::spawn("login", state, strategy, config)
    }
}
