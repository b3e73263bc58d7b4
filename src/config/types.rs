use serde::{Deserialize, Serialize};

use crate::mvi::FaultPolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub flows: FlowsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Behavior shared by every flow's reducer and observables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowsConfig {
    /// Quiet period before debounced text observables emit (default: 100).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Reaction to a failed result computation (default: reset).
    #[serde(default)]
    pub fault_policy: FaultPolicy,
}

/// Settings for the in-memory authentication backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shortest accepted password, in characters (default: 6).
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Simulated latency of every backend call in milliseconds (default: 0).
    #[serde(default)]
    pub latency_ms: u64,
    /// Accounts that exist before any sign-up.
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    /// Out-of-band reset codes that are already issued.
    #[serde(default)]
    pub reset_codes: Vec<ResetCodeConfig>,
}

/// A pre-registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub email: String,
    pub password: String,
}

/// A pre-issued password reset code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetCodeConfig {
    pub code: String,
    pub email: String,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_min_password_length() -> usize {
    6
}

impl Default for FlowsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            fault_policy: FaultPolicy::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            latency_ms: 0,
            accounts: Vec::new(),
            reset_codes: Vec::new(),
        }
    }
}
