//! Credential predicates shared by the flows.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::auth::{AuthError, AuthProvider, FailureCode};
use crate::mvi::{FaultPolicy, FlowFault};

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Email and password predicates used to derive validity flags.
///
/// Defaults come from the [`AuthProvider`]; either predicate can be
/// replaced for a single flow.
#[derive(Clone)]
pub struct Validators {
    email: Predicate,
    password: Predicate,
}

impl Validators {
    pub fn new<E, P>(email: E, password: P) -> Self
    where
        E: Fn(&str) -> bool + Send + Sync + 'static,
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            email: Arc::new(email),
            password: Arc::new(password),
        }
    }

    /// Delegate both checks to `provider`.
    pub fn from_provider(provider: Arc<dyn AuthProvider>) -> Self {
        let for_password = Arc::clone(&provider);
        Self::new(
            move |email| provider.is_valid_email(email),
            move |password| for_password.is_valid_password(password),
        )
    }

    pub fn with_email<F>(mut self, email: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.email = Arc::new(email);
        self
    }

    pub fn with_password<F>(mut self, password: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.password = Arc::new(password);
        self
    }

    pub fn email(&self, email: &str) -> bool {
        (self.email)(email)
    }

    pub fn password(&self, password: &str) -> bool {
        (self.password)(password)
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validators").finish_non_exhaustive()
    }
}

/// Split a backend result into the domain outcome and a catastrophic fault.
///
/// Rejections become part of the flow's state. Under [`FaultPolicy::Reset`]
/// a backend fault goes to the reducer, which resets the flow; under
/// [`FaultPolicy::Discard`] it is confined to the attempt and reported as the
/// code's catch-all failure.
pub(crate) fn classify_outcome<T, E: FailureCode>(
    result: Result<T, AuthError<E>>,
    policy: FaultPolicy,
) -> Result<Result<T, E>, FlowFault> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(AuthError::Rejected(code)) => Ok(Err(code)),
        Err(AuthError::Fault(message)) => match policy {
            FaultPolicy::Reset => Err(FlowFault::source(message)),
            FaultPolicy::Discard => {
                tracing::warn!(error = %message, "backend fault, failing the attempt");
                Ok(Err(E::unexpected()))
            }
        },
    }
}

/// Await a backend call and classify its result, containing panics.
///
/// A panicking call is a fault like any other: the reducer handles it under
/// [`FaultPolicy::Reset`], while [`FaultPolicy::Discard`] fails the attempt
/// with the catch-all code so the flow leaves its loading phase.
pub(crate) async fn guarded_call<T, E, F>(
    call: F,
    policy: FaultPolicy,
) -> Result<Result<T, E>, FlowFault>
where
    E: FailureCode,
    F: Future<Output = Result<T, AuthError<E>>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => classify_outcome(result, policy),
        Err(payload) => {
            let fault = FlowFault::from_panic(payload);
            match policy {
                FaultPolicy::Reset => Err(fault),
                FaultPolicy::Discard => {
                    tracing::warn!(error = %fault, "backend call panicked, failing the attempt");
                    Ok(Err(E::unexpected()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{InMemoryAuth, SignInError};

    #[test]
    fn provider_defaults_can_be_overridden() {
        let provider: Arc<dyn AuthProvider> = Arc::new(InMemoryAuth::new(6));
        let validators = Validators::from_provider(provider);
        assert!(validators.email("a@b.com"));
        assert!(!validators.password("short"));

        let relaxed = validators.with_password(|p| !p.is_empty());
        assert!(relaxed.password("short"));
        assert!(relaxed.email("a@b.com"));
    }

    #[test]
    fn rejections_stay_domain_outcomes() {
        let ok: Result<u8, AuthError<SignInError>> = Ok(1);
        assert_eq!(classify_outcome(ok, FaultPolicy::Reset), Ok(Ok(1)));

        let rejected: Result<u8, AuthError<SignInError>> =
            Err(AuthError::Rejected(SignInError::UserNotFound));
        assert_eq!(
            classify_outcome(rejected, FaultPolicy::Reset),
            Ok(Err(SignInError::UserNotFound))
        );
    }

    #[test]
    fn faults_follow_the_policy() {
        let fault = || -> Result<u8, AuthError<SignInError>> { Err(AuthError::Fault("down".into())) };
        assert_eq!(
            classify_outcome(fault(), FaultPolicy::Reset),
            Err(FlowFault::source("down"))
        );
        assert_eq!(
            classify_outcome(fault(), FaultPolicy::Discard),
            Ok(Err(SignInError::Error))
        );
    }

    #[tokio::test]
    async fn panicking_call_follows_the_policy() {
        async fn explode() -> Result<u8, AuthError<SignInError>> {
            tokio::task::yield_now().await;
            panic!("backend blew up")
        }

        assert_eq!(
            guarded_call(explode(), FaultPolicy::Discard).await,
            Ok(Err(SignInError::Error))
        );
        assert_eq!(
            guarded_call(explode(), FaultPolicy::Reset).await,
            Err(FlowFault::Panicked {
                message: "backend blew up".to_string()
            })
        );
    }
}
