//! The four authentication screens, each a [`StateReducer`](crate::mvi::StateReducer)
//! instantiation with its own state, actions and transitions.
//!
//! - `credentials` - login and sign-up
//! - `forgot_password` - request a reset link
//! - `reset_password` - set a new password from a reset link

pub mod credentials;
pub mod forgot_password;
pub mod reset_password;
mod validators;

pub use credentials::{CredentialsFlow, InitialCredentials, LoginFlow, SignUpFlow};
pub use forgot_password::ForgotPasswordFlow;
pub use reset_password::ResetPasswordFlow;
pub use validators::Validators;
