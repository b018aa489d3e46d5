use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{deserialize_optional_duration_from_ms, serialize_optional_duration_to_ms};

/// Execution budget applied to every sandboxed script.
///
/// Both limits are off by default, in which case a script runs until it
/// finishes.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SandboxConfig {
    /// Wall-clock limit per invocation, in milliseconds.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_duration_from_ms",
        serialize_with = "serialize_optional_duration_to_ms"
    )]
    pub execution_timeout: Option<Duration>,

    /// Maximum V8 heap size per invocation, in bytes.
    #[serde(default)]
    pub max_heap_size: Option<usize>,
}
