use crate::config::{AppConfig, ServerConfig};

/// An identity factory that rejects documents without an `id`, yields no
/// identity for `"none"`, and upper-cases every other id.
pub const UPPERCASE_ID_SCRIPT: &str = r#"
function build(data) {
    if (!data.id) fail("missing id");
    if (data.id === "none") return null;
    return data.id.toUpperCase();
}
"#;

/// Creates an `AppConfig` listening on `address`, with an optional identity
/// factory.
pub fn create_test_app_config(address: &str, identity_factory: Option<&str>) -> AppConfig {
    AppConfig {
        server: ServerConfig { listen_address: address.into(), ..Default::default() },
        identity_factory: identity_factory.map(str::to_string),
        ..Default::default()
    }
}
