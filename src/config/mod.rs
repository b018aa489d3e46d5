//! Configuration module for the transform sandbox service.

mod app_config;
mod helpers;
mod identity;
mod sandbox;
mod server;

pub use app_config::{AppConfig, DEFAULT_CONFIG_DIR, ENV_PREFIX};
pub use helpers::{deserialize_optional_duration_from_ms, serialize_optional_duration_to_ms};
pub use identity::IdentityConfig;
pub use sandbox::SandboxConfig;
pub use server::ServerConfig;
