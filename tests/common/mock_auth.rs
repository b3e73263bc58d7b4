//! Scripted authentication provider for driving flows from tests.

#![allow(dead_code)]

use async_trait::async_trait;
use authflow::auth::validation::{is_plausible_email, meets_min_length};
use authflow::auth::{
    AuthError, AuthProvider, RequestPasswordResetError, ResetPasswordError, SignInError,
    SignUpError, UserInfo,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

pub type Reply<T, E> = Result<T, AuthError<E>>;

enum Pending<T, E> {
    Now(Reply<T, E>),
    Later(oneshot::Receiver<Reply<T, E>>),
    Panic(&'static str),
}

/// Queue of replies for one backend operation.
///
/// Each call takes the next reply. Deferred replies keep the call suspended
/// until the test resolves them. An empty queue answers with a fault.
pub struct Script<T, E> {
    replies: Mutex<VecDeque<Pending<T, E>>>,
    calls: AtomicUsize,
    last_args: Mutex<Vec<String>>,
}

impl<T, E> Default for Script<T, E> {
    fn default() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            last_args: Mutex::new(Vec::new()),
        }
    }
}

impl<T, E> Script<T, E> {
    /// Answer the next call immediately.
    pub fn reply(&self, reply: Reply<T, E>) {
        self.replies.lock().push_back(Pending::Now(reply));
    }

    /// Suspend the next call until the returned sender fires.
    pub fn defer(&self) -> oneshot::Sender<Reply<T, E>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().push_back(Pending::Later(rx));
        tx
    }

    /// Make the next call panic after yielding once.
    pub fn panic_with(&self, message: &'static str) {
        self.replies.lock().push_back(Pending::Panic(message));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of the most recent call.
    pub fn last_args(&self) -> Vec<String> {
        self.last_args.lock().clone()
    }

    async fn take(&self, args: &[&str]) -> Reply<T, E> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock() = args.iter().map(|a| a.to_string()).collect();
        let next = self.replies.lock().pop_front();
        match next {
            Some(Pending::Now(reply)) => reply,
            Some(Pending::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(AuthError::Fault("deferred reply dropped".to_string()))),
            Some(Pending::Panic(message)) => {
                tokio::task::yield_now().await;
                panic!("{message}")
            }
            None => Err(AuthError::Fault("no scripted reply".to_string())),
        }
    }
}

/// [`AuthProvider`] whose every answer is scripted by the test.
pub struct ScriptedAuth {
    pub min_password_length: usize,
    pub sign_in: Script<UserInfo, SignInError>,
    pub sign_up: Script<UserInfo, SignUpError>,
    pub request_reset: Script<Option<String>, RequestPasswordResetError>,
    pub reset: Script<(), ResetPasswordError>,
}

impl ScriptedAuth {
    pub fn new() -> Self {
        Self {
            min_password_length: 6,
            sign_in: Script::default(),
            sign_up: Script::default(),
            request_reset: Script::default(),
            reset: Script::default(),
        }
    }
}

#[async_trait]
impl AuthProvider for ScriptedAuth {
    fn is_valid_email(&self, email: &str) -> bool {
        is_plausible_email(email)
    }

    fn is_valid_password(&self, password: &str) -> bool {
        meets_min_length(password, self.min_password_length)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Reply<UserInfo, SignInError> {
        self.sign_in.take(&[email, password]).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Reply<UserInfo, SignUpError> {
        self.sign_up.take(&[email, password]).await
    }

    async fn request_password_reset(
        &self,
        email: &str,
    ) -> Reply<Option<String>, RequestPasswordResetError> {
        self.request_reset.take(&[email]).await
    }

    async fn perform_password_reset(
        &self,
        oob_code: &str,
        new_password: &str,
    ) -> Reply<(), ResetPasswordError> {
        self.reset.take(&[oob_code, new_password]).await
    }
}
