//! In-process authentication backend.
//!
//! Stands in for the hosted service in tests and in the demo binary. Error
//! mapping follows what the hosted SDK reports for the same situations.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{
    AuthError, RequestPasswordResetError, ResetPasswordError, SignInError, SignUpError,
};
use super::provider::AuthProvider;
use super::user::UserInfo;
use super::validation::{is_plausible_email, meets_min_length};
use crate::config::AuthConfig;

struct Account {
    uid: String,
    email: String,
    password: String,
}

struct ResetCode {
    email: String,
    used: bool,
}

#[derive(Default)]
struct Directory {
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
    codes: HashMap<String, ResetCode>,
    next_uid: u64,
    next_code: u64,
}

impl Directory {
    fn insert_account(&mut self, email: &str, password: &str) -> UserInfo {
        self.next_uid += 1;
        let uid = format!("user-{}", self.next_uid);
        self.accounts.insert(
            email.to_lowercase(),
            Account {
                uid: uid.clone(),
                email: email.to_string(),
                password: password.to_string(),
            },
        );
        UserInfo::new(uid).with_email(email)
    }

    fn issue_code(&mut self, email: &str) -> String {
        self.next_code += 1;
        let code = format!("oob-{:06}", self.next_code);
        self.codes.insert(
            code.clone(),
            ResetCode {
                email: email.to_lowercase(),
                used: false,
            },
        );
        code
    }
}

/// Authentication backend keeping accounts and reset codes in memory.
pub struct InMemoryAuth {
    min_password_length: usize,
    latency: Duration,
    directory: Mutex<Directory>,
}

impl InMemoryAuth {
    pub fn new(min_password_length: usize) -> Self {
        Self {
            min_password_length,
            latency: Duration::ZERO,
            directory: Mutex::new(Directory::default()),
        }
    }

    /// Build a backend seeded with the accounts and codes from `config`.
    pub fn from_config(config: &AuthConfig) -> Self {
        let auth = Self::new(config.min_password_length)
            .with_latency(Duration::from_millis(config.latency_ms));
        {
            let mut directory = auth.directory.lock();
            for account in &config.accounts {
                directory.insert_account(&account.email, &account.password);
            }
            for reset in &config.reset_codes {
                directory.codes.insert(
                    reset.code.clone(),
                    ResetCode {
                        email: reset.email.to_lowercase(),
                        used: false,
                    },
                );
            }
        }
        auth
    }

    /// Delay every backend call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Register an account directly, bypassing validation.
    pub fn add_account(&self, email: &str, password: &str) -> UserInfo {
        self.directory.lock().insert_account(email, password)
    }

    /// Whether an account exists for `email`.
    pub fn has_account(&self, email: &str) -> bool {
        self.directory.lock().accounts.contains_key(&email.to_lowercase())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuth {
    fn is_valid_email(&self, email: &str) -> bool {
        is_plausible_email(email)
    }

    fn is_valid_password(&self, password: &str) -> bool {
        meets_min_length(password, self.min_password_length)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError<SignInError>> {
        self.simulate_latency().await;
        if !self.is_valid_email(email) {
            return Err(AuthError::Rejected(SignInError::InvalidCredentials));
        }
        let directory = self.directory.lock();
        let account = directory
            .accounts
            .get(&email.to_lowercase())
            .ok_or(AuthError::Rejected(SignInError::UserNotFound))?;
        if account.password != password {
            return Err(AuthError::Rejected(SignInError::InvalidCredentials));
        }
        tracing::debug!(uid = %account.uid, "signed in");
        Ok(UserInfo::new(account.uid.clone()).with_email(account.email.clone()))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError<SignUpError>> {
        self.simulate_latency().await;
        if !self.is_valid_email(email) {
            return Err(AuthError::Rejected(SignUpError::InvalidEmail));
        }
        if !self.is_valid_password(password) {
            return Err(AuthError::Rejected(SignUpError::InvalidPassword));
        }
        let mut directory = self.directory.lock();
        if directory.accounts.contains_key(&email.to_lowercase()) {
            return Err(AuthError::Rejected(SignUpError::UserAlreadyPresent));
        }
        let user = directory.insert_account(email, password);
        tracing::debug!(uid = %user.uid, "account created");
        Ok(user)
    }

    async fn request_password_reset(
        &self,
        email: &str,
    ) -> Result<Option<String>, AuthError<RequestPasswordResetError>> {
        self.simulate_latency().await;
        let mut directory = self.directory.lock();
        if !directory.accounts.contains_key(&email.to_lowercase()) {
            return Err(AuthError::Rejected(RequestPasswordResetError::Email));
        }
        Ok(Some(directory.issue_code(email)))
    }

    async fn perform_password_reset(
        &self,
        oob_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError<ResetPasswordError>> {
        self.simulate_latency().await;
        if !self.is_valid_password(new_password) {
            return Err(AuthError::Rejected(ResetPasswordError::InvalidPassword));
        }
        let mut guard = self.directory.lock();
        let directory = &mut *guard;
        let reset = directory
            .codes
            .get_mut(oob_code)
            .ok_or(AuthError::Rejected(ResetPasswordError::InvalidCode))?;
        if reset.used {
            return Err(AuthError::Rejected(ResetPasswordError::CodeExpired));
        }
        // a code for an unknown account stays unused
        let account = directory
            .accounts
            .get_mut(&reset.email)
            .ok_or(AuthError::Rejected(ResetPasswordError::InvalidCode))?;
        reset.used = true;
        account.password = new_password.to_string();
        Ok(())
    }
}
