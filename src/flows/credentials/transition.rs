//! Transitions for the credential flows.

use crate::auth::{FailureCode, UserInfo};
use crate::mvi::Transition;

use super::state::{CredentialsPhase, CredentialsState};

#[derive(Debug, Clone, PartialEq)]
pub enum CredentialsTransition<E> {
    /// New email text, stamped against the email field.
    UpdateEmail { text: String, valid: bool, stamp: u64 },
    /// New password text, stamped against the password field.
    UpdatePassword { text: String, valid: bool, stamp: u64 },
    /// A submission started.
    Begin,
    /// The backend answered a submission.
    Complete(Result<UserInfo, E>),
}

impl<E: FailureCode> Transition<CredentialsState<E>> for CredentialsTransition<E> {
    fn valid_transformation(&self, state: &CredentialsState<E>) -> bool {
        match self {
            CredentialsTransition::UpdateEmail { stamp, .. } => {
                state.email.is_superseded_by(*stamp)
            }
            CredentialsTransition::UpdatePassword { stamp, .. } => {
                state.password.is_superseded_by(*stamp)
            }
            CredentialsTransition::Begin => state.is_idle(),
            CredentialsTransition::Complete(_) => state.is_loading(),
        }
    }

    fn apply(self, state: &CredentialsState<E>) -> CredentialsState<E> {
        match self {
            CredentialsTransition::UpdateEmail { text, valid, stamp } => CredentialsState {
                email: state.email.advance(text, stamp),
                email_valid: valid,
                ..state.clone()
            },
            CredentialsTransition::UpdatePassword { text, valid, stamp } => CredentialsState {
                password: state.password.advance(text, stamp),
                password_valid: valid,
                ..state.clone()
            },
            CredentialsTransition::Begin => CredentialsState {
                phase: CredentialsPhase::Loading,
                error: None,
                ..state.clone()
            },
            CredentialsTransition::Complete(Ok(user)) => CredentialsState {
                phase: CredentialsPhase::Successful(user),
                ..state.clone()
            },
            CredentialsTransition::Complete(Err(code)) => CredentialsState {
                phase: CredentialsPhase::Idle,
                error: Some(code),
                ..state.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SignInError;

    type State = CredentialsState<SignInError>;
    type Step = CredentialsTransition<SignInError>;

    fn idle() -> State {
        CredentialsState::new(String::new(), String::new(), false, false)
    }

    fn email(text: &str, stamp: u64) -> Step {
        CredentialsTransition::UpdateEmail {
            text: text.to_string(),
            valid: true,
            stamp,
        }
    }

    #[test]
    fn newest_email_stamp_wins_out_of_order() {
        let state = idle();
        let older = email("a@b.co", 1);
        let newer = email("a@b.com", 2);

        assert!(newer.valid_transformation(&state));
        let state = newer.apply(&state);
        assert!(!older.valid_transformation(&state));
        assert_eq!(state.email.value, "a@b.com");
        assert_eq!(state.email.stamp, 2);
    }

    #[test]
    fn stale_update_leaves_state_unchanged() {
        let state = email("x@y.com", 3).apply(&idle());
        let replay = email("x@y.com", 3);
        assert!(!replay.valid_transformation(&state));
    }

    #[test]
    fn field_stamps_are_independent() {
        let state = email("x@y.com", 5).apply(&idle());
        let password = CredentialsTransition::UpdatePassword {
            text: "pw".to_string(),
            valid: true,
            stamp: 1,
        };
        assert!(password.valid_transformation(&state));
        let state = password.apply(&state);
        assert_eq!(state.password.value, "pw");
        assert_eq!(state.email.value, "x@y.com");
    }

    #[test]
    fn begin_clears_error_and_enters_loading() {
        let failed = State {
            error: Some(SignInError::InvalidCredentials),
            ..idle()
        };
        assert!(Step::Begin.valid_transformation(&failed));
        let loading = Step::Begin.apply(&failed);
        assert!(loading.is_loading());
        assert!(loading.error.is_none());
        assert!(!Step::Begin.valid_transformation(&loading));
    }

    #[test]
    fn complete_only_applies_while_loading() {
        let done = Step::Complete(Ok(UserInfo::new("u1")));
        assert!(!done.valid_transformation(&idle()));

        let loading = Step::Begin.apply(&idle());
        assert!(done.valid_transformation(&loading));
        let finished = done.apply(&loading);
        assert_eq!(finished.user().map(|u| u.uid.as_str()), Some("u1"));

        let failed = Step::Complete(Err(SignInError::UserNotFound)).apply(&loading);
        assert!(failed.is_idle());
        assert_eq!(failed.error, Some(SignInError::UserNotFound));
    }
}
