mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{AccountConfig, AuthConfig, Config, FlowsConfig, ResetCodeConfig};
