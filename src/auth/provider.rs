//! The authentication capability flows call into.

use async_trait::async_trait;

use super::error::{
    AuthError, RequestPasswordResetError, ResetPasswordError, SignInError, SignUpError,
};
use super::user::UserInfo;

/// Hosted authentication backend, as seen by the flows.
///
/// Validators are synchronous and cheap; they run on every keystroke.
/// The async operations each resolve exactly once, either with their
/// payload or with an [`AuthError`].
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Whether `email` is syntactically acceptable.
    fn is_valid_email(&self, email: &str) -> bool;

    /// Whether `password` satisfies the backend's password rules.
    fn is_valid_password(&self, password: &str) -> bool;

    /// Whether both credentials are syntactically acceptable.
    fn is_valid_login(&self, email: &str, password: &str) -> bool {
        self.is_valid_email(email) && self.is_valid_password(password)
    }

    async fn sign_in(&self, email: &str, password: &str)
        -> Result<UserInfo, AuthError<SignInError>>;

    async fn sign_up(&self, email: &str, password: &str)
        -> Result<UserInfo, AuthError<SignUpError>>;

    /// Ask the backend to send a reset link. Some backends hand back the
    /// out-of-band code directly; most return `None`.
    async fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<Option<String>, AuthError<RequestPasswordResetError>>;

    /// Set a new password using an out-of-band code from a reset link.
    async fn perform_password_reset(
        &self,
        oob_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError<ResetPasswordError>>;
}
