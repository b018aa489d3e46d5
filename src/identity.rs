//! Document identity derivation.
//!
//! Runs the configured factory script against document data and hashes the
//! string it produces into a stable identity number.

use serde_json::Value;
use sha2::{Digest, Sha256};
use transform_models::Identity;

use crate::sandbox::{Sandbox, TransformError};

/// Derives document identities with a fixed factory script.
#[derive(Clone)]
pub struct IdentityService {
    sandbox: Sandbox,
    factory: String,
}

impl IdentityService {
    /// Creates a new `IdentityService` evaluating `factory` in `sandbox`.
    pub fn new(sandbox: Sandbox, factory: String) -> Self {
        Self { sandbox, factory }
    }

    /// Derives the identity of `data`.
    ///
    /// Returns `None` when the factory produces `null`.
    pub async fn derive(&self, data: Value) -> Result<Option<Identity>, TransformError> {
        let output = self.sandbox.transform_blocking(self.factory.clone(), data).await?;
        Ok(output.map(|value| Identity { number: hash_identity(&value) }))
    }
}

/// Hex-encoded SHA-256 of `value`.
pub fn hash_identity(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}
