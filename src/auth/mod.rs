//! Authentication capability consumed by the flows.
//!
//! - `provider.rs` - the [`AuthProvider`] trait
//! - `error.rs` - typed failure codes
//! - `memory.rs` - in-process backend
//! - `validation.rs` - syntactic credential checks

mod error;
mod memory;
mod provider;
mod user;
pub mod validation;

pub use error::{
    AuthError, FailureCode, RequestPasswordResetError, ResetPasswordError, SignInError, SignUpError,
};
pub use memory::InMemoryAuth;
pub use provider::AuthProvider;
pub use user::UserInfo;
