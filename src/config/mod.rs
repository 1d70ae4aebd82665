#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, TestimonialCommand};
pub use env::EnvOverrides;
pub use toml_config::{BackendKind, RemoteConfig, TomlConfig};
