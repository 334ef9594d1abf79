//! Configuration layer.
//!
//! All environment reads go through this module; callers use the structured
//! configs instead of `std::env::var`.
//!
//! - `loader`: env_or, env_optional, env_bool, load_dotenv
//! - `schema`: RunnerConfig, StagingConfig, ObservabilityConfig
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv};
pub use schema::{ObservabilityConfig, RunnerConfig, StagingChoice, StagingConfig};
