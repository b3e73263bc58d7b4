//! Authentication screen flows driven by a generic action/transition reducer.
//!
//! - `mvi` - the reducer and its building blocks
//! - `auth` - the authentication capability and an in-memory backend
//! - `flows` - login, sign-up, forgotten password and password reset
//! - `config` - TOML configuration
//! - `logging` - tracing subscriber setup

pub mod auth;
pub mod config;
pub mod flows;
pub mod logging;
pub mod mvi;
