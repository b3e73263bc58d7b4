//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_auth;

use authflow::config::FlowsConfig;
use authflow::mvi::{FaultPolicy, Observable};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Let every spawned task run until it blocks.
///
/// Tests run with a paused clock, so the sleep only completes once the
/// runtime has nothing else to do.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Flow settings with the default debounce and the given fault policy.
pub fn flows_config(fault_policy: FaultPolicy) -> FlowsConfig {
    FlowsConfig {
        fault_policy,
        ..FlowsConfig::default()
    }
}

/// Next value of an observable, failing the test if none arrives.
pub async fn next_value<T>(observable: &mut Observable<T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), observable.next())
        .await
        .expect("observable did not emit in time")
        .expect("observable ended")
}

/// Whether the observable stays silent for `window`.
pub async fn stays_quiet<T>(observable: &mut Observable<T>, window: Duration) -> bool {
    tokio::time::timeout(window, observable.next()).await.is_err()
}

/// Create a temporary config file with the given contents.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
