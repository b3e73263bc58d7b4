//! Typed failure codes reported by authentication backends.

use std::fmt;

use thiserror::Error;

/// A typed failure code a flow can hold in its state.
pub trait FailureCode: Clone + PartialEq + fmt::Debug + Send + Sync + Unpin + 'static {
    /// Catch-all code for a backend that failed in an unexpected way.
    fn unexpected() -> Self;
}

macro_rules! catch_all {
    ($($code:ty),* $(,)?) => {
        $(impl FailureCode for $code {
            fn unexpected() -> Self {
                Self::Error
            }
        })*
    };
}

catch_all!(
    SignInError,
    SignUpError,
    RequestPasswordResetError,
    ResetPasswordError,
);

/// Failure of a single backend call.
///
/// `Rejected` is an expected outcome the flow shows to the user.
/// `Fault` means the backend machinery itself broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError<E> {
    #[error("request rejected: {0}")]
    Rejected(E),

    #[error("authentication backend fault: {0}")]
    Fault(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SignInError {
    #[error("no account exists for this email")]
    UserNotFound,
    #[error("email or password is incorrect")]
    InvalidCredentials,
    #[error("sign-in failed")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SignUpError {
    #[error("an account already exists for this email")]
    UserAlreadyPresent,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password does not meet requirements")]
    InvalidPassword,
    #[error("sign-up failed")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RequestPasswordResetError {
    #[error("no account exists for this email")]
    Email,
    #[error("password reset request failed")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ResetPasswordError {
    #[error("reset code has expired")]
    CodeExpired,
    #[error("reset code is not valid")]
    InvalidCode,
    #[error("password does not meet requirements")]
    InvalidPassword,
    #[error("password reset failed")]
    Error,
}
