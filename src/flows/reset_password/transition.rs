//! Transitions for the reset-password flow.

use crate::auth::ResetPasswordError;
use crate::mvi::Transition;

use super::state::ResetPasswordState;

#[derive(Debug, Clone, PartialEq)]
pub enum ResetPasswordTransition {
    SetOobCode(String),
    FailedToGetLink,
    UpdatePassword { text: String, stamp: u64 },
    UpdateConfirmPassword { text: String, stamp: u64 },
    Begin,
    Complete(Result<(), ResetPasswordError>),
}

impl Transition<ResetPasswordState> for ResetPasswordTransition {
    fn valid_transformation(&self, state: &ResetPasswordState) -> bool {
        match self {
            ResetPasswordTransition::SetOobCode(_) => !state.has_code() && state.loading,
            ResetPasswordTransition::FailedToGetLink => !state.has_code(),
            ResetPasswordTransition::UpdatePassword { stamp, .. } => {
                state.password.is_superseded_by(*stamp)
            }
            ResetPasswordTransition::UpdateConfirmPassword { stamp, .. } => {
                state.confirm_password.is_superseded_by(*stamp)
            }
            ResetPasswordTransition::Begin => !state.loading,
            ResetPasswordTransition::Complete(_) => state.loading,
        }
    }

    fn apply(self, state: &ResetPasswordState) -> ResetPasswordState {
        match self {
            ResetPasswordTransition::SetOobCode(code) => ResetPasswordState {
                oob_code: Some(code),
                failed_to_get_oob: false,
                loading: false,
                ..state.clone()
            },
            ResetPasswordTransition::FailedToGetLink => ResetPasswordState {
                oob_code: None,
                failed_to_get_oob: true,
                loading: false,
                ..state.clone()
            },
            ResetPasswordTransition::UpdatePassword { text, stamp } => ResetPasswordState {
                password: state.password.advance(text, stamp),
                ..state.clone()
            }
            .with_match_recomputed(),
            ResetPasswordTransition::UpdateConfirmPassword { text, stamp } => ResetPasswordState {
                confirm_password: state.confirm_password.advance(text, stamp),
                ..state.clone()
            }
            .with_match_recomputed(),
            ResetPasswordTransition::Begin => ResetPasswordState {
                loading: true,
                error: None,
                ..state.clone()
            },
            ResetPasswordTransition::Complete(Ok(())) => ResetPasswordState {
                loading: false,
                success: true,
                ..state.clone()
            },
            ResetPasswordTransition::Complete(Err(code)) => ResetPasswordState {
                loading: false,
                error: Some(code),
                ..state.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_code() -> ResetPasswordState {
        ResetPasswordTransition::SetOobCode("oob".to_string()).apply(&ResetPasswordState::default())
    }

    #[test]
    fn code_arrival_ends_initial_loading() {
        let initial = ResetPasswordState::default();
        assert!(initial.loading);
        assert!(!initial.is_editable());

        let ready = with_code();
        assert!(!ready.loading);
        assert!(ready.is_editable());
        assert!(!ResetPasswordTransition::SetOobCode("again".into()).valid_transformation(&ready));
        assert!(!ResetPasswordTransition::FailedToGetLink.valid_transformation(&ready));
    }

    #[test]
    fn failed_link_stops_loading_without_code() {
        let failed = ResetPasswordTransition::FailedToGetLink.apply(&ResetPasswordState::default());
        assert!(failed.failed_to_get_oob);
        assert!(!failed.loading);
        assert!(!failed.is_editable());
    }

    #[test]
    fn confirm_edit_does_not_stale_password_edit() {
        let state = with_code();
        let password = ResetPasswordTransition::UpdatePassword {
            text: "secret1".to_string(),
            stamp: state.password.next_stamp(),
        };
        let confirm = ResetPasswordTransition::UpdateConfirmPassword {
            text: "secret1".to_string(),
            stamp: state.confirm_password.next_stamp(),
        };

        let state = confirm.apply(&state);
        assert!(!state.passwords_match);
        assert!(password.valid_transformation(&state));
        let state = password.apply(&state);
        assert!(state.passwords_match);
        assert_eq!(state.password.value, "secret1");
        assert_eq!(state.confirm_password.value, "secret1");
    }

    #[test]
    fn match_follows_resulting_state() {
        let state = ResetPasswordTransition::UpdatePassword {
            text: "abc".to_string(),
            stamp: 1,
        }
        .apply(&with_code());
        assert!(!state.passwords_match);

        let state = ResetPasswordTransition::UpdateConfirmPassword {
            text: "abc".to_string(),
            stamp: 1,
        }
        .apply(&state);
        assert!(state.passwords_match);

        let state = ResetPasswordTransition::UpdatePassword {
            text: "abcd".to_string(),
            stamp: 2,
        }
        .apply(&state);
        assert!(!state.passwords_match);
    }
}
