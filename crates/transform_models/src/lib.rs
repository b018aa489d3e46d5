//! Wire models shared between the transform sandbox service, its CLI and its
//! clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for evaluating a transformation script.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransformRequest {
    /// The JavaScript source defining a `build(data)` entry point.
    pub script: String,
    /// The JSON value passed to `build`.
    #[serde(default)]
    pub input: Value,
}

/// Response payload for a successful transformation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransformResponse {
    /// The string produced by the script, or `None` when it returned `null`.
    pub result: Option<String>,
}

/// Request payload for deriving a document identity.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IdentityRequest {
    /// The document data handed to the configured identity factory.
    pub data: Value,
}

/// A derived document identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Identity {
    /// Hex-encoded SHA-256 of the factory output.
    pub number: String,
}

/// Response payload for an identity derivation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IdentityResponse {
    /// The derived identity, or `None` when the factory produced no value.
    pub identity: Option<Identity>,
}

/// A single error entry in an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Response payload for a rejected request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// A stable error code, e.g. `INVALID_DATA`.
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}
