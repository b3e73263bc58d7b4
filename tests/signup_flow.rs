mod common;

use authflow::auth::{AuthError, AuthProvider, InMemoryAuth, SignUpError, UserInfo};
use authflow::flows::{InitialCredentials, SignUpFlow, Validators};
use authflow::mvi::FaultPolicy;
use common::mock_auth::ScriptedAuth;
use common::{flows_config, next_value, settle};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn sign_up_goes_through_loading_to_success() {
    let auth = Arc::new(ScriptedAuth::new());
    let flow = SignUpFlow::new(auth.clone(), &flows_config(FaultPolicy::Reset));
    flow.email_input("new@example.com");
    flow.password_input("longenough");
    settle().await;

    let reply = auth.sign_up.defer();
    flow.submit();
    settle().await;
    assert!(flow.state().is_loading());
    assert_eq!(auth.sign_in.calls(), 0);
    assert_eq!(auth.sign_up.calls(), 1);

    reply.send(Ok(UserInfo::new("user-9"))).unwrap();
    let user = flow.completed().await.expect("flow completes");
    assert_eq!(user.uid, "user-9");
}

#[tokio::test(start_paused = true)]
async fn duplicate_account_is_reported() {
    let auth = Arc::new(ScriptedAuth::new());
    let flow = SignUpFlow::new(auth.clone(), &flows_config(FaultPolicy::Reset));
    auth.sign_up
        .reply(Err(AuthError::Rejected(SignUpError::UserAlreadyPresent)));

    let mut error = flow.error();
    assert_eq!(next_value(&mut error).await, None);

    flow.email_input("ada@example.com");
    flow.password_input("longenough");
    flow.submit();
    assert_eq!(
        next_value(&mut error).await,
        Some(SignUpError::UserAlreadyPresent)
    );
    assert!(flow.state().is_idle());
}

#[tokio::test(start_paused = true)]
async fn stricter_password_rule_blocks_submit() {
    let auth = Arc::new(ScriptedAuth::new());
    let provider: Arc<dyn AuthProvider> = auth.clone();
    let validators = Validators::from_provider(Arc::clone(&provider))
        .with_password(|p| p.chars().any(|c| c.is_ascii_digit()));
    let flow = SignUpFlow::with_validators(provider, validators, &flows_config(FaultPolicy::Reset));

    let mut valid = flow.password_valid();
    assert!(!next_value(&mut valid).await);

    flow.email_input("new@example.com");
    flow.password_input("nodigits");
    flow.submit();
    settle().await;
    assert_eq!(auth.sign_up.calls(), 0);

    flow.password_input("digits4u");
    assert!(next_value(&mut valid).await);
}

#[tokio::test(start_paused = true)]
async fn in_memory_backend_creates_account() {
    let backend = Arc::new(InMemoryAuth::new(6).with_latency(Duration::from_millis(200)));
    let flow = SignUpFlow::new(backend.clone(), &flows_config(FaultPolicy::Reset));

    flow.email_input("Grace@Example.com");
    flow.password_input("compiler");
    flow.submit();
    settle().await;
    assert!(flow.state().is_loading());

    let user = flow.completed().await.expect("flow completes");
    assert_eq!(user.email.as_deref(), Some("Grace@Example.com"));
    assert!(backend.has_account("grace@example.com"));
    assert!(!flow.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn initial_credentials_use_the_flow_validators() {
    let auth = Arc::new(ScriptedAuth::new());
    let provider: Arc<dyn AuthProvider> = auth.clone();
    let validators = Validators::from_provider(Arc::clone(&provider))
        .with_password(|p| p.chars().any(|c| c.is_ascii_digit()));
    let flow = SignUpFlow::with_initial(
        provider,
        validators,
        InitialCredentials::new("new@example.com", "nodigits"),
        &flows_config(FaultPolicy::Reset),
    );

    let state = flow.state();
    assert_eq!(state.password.value, "nodigits");
    assert!(state.email_valid);
    assert!(!state.password_valid);

    flow.password_input("digits4u");
    settle().await;
    assert!(flow.state().button_enabled());
}
