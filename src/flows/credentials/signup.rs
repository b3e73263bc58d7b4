use std::sync::Arc;

use async_trait::async_trait;

use super::{CredentialsFlow, CredentialsStrategy, InitialCredentials, Submitter};
use crate::auth::{AuthError, AuthProvider, SignUpError, UserInfo};
use crate::config::FlowsConfig;
use crate::flows::Validators;

/// Submits credentials to [`AuthProvider::sign_up`].
pub struct SignUp {
    provider: Arc<dyn AuthProvider>,
}

impl SignUp {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Submitter for SignUp {
    type Error = SignUpError;

    async fn submit(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError<SignUpError>> {
        self.provider.sign_up(email, password).await
    }
}

pub type SignUpFlow = CredentialsFlow<SignUp>;

impl CredentialsFlow<SignUp> {
    /// Sign-up flow validating with the provider's own rules.
    pub fn new(provider: Arc<dyn AuthProvider>, config: &FlowsConfig) -> Self {
        let validators = Validators::from_provider(Arc::clone(&provider));
        Self::with_validators(provider, validators, config)
    }

    /// Sign-up flow with custom field rules, e.g. a stricter password policy
    /// than the backend enforces.
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
        let strategy = CredentialsStrategy::new(validators, SignUp::new(provider));
        Self::spawn("sign-up", state, strategy, config)
    }
}
