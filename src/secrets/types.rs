//! Secret value handling and batch types.
//!
//! [`SecretString`] keeps payloads out of logs and error messages: Debug,
//! Display, and serialization all redact, and the backing memory is zeroed
//! when the value is dropped. The actual payload is only reachable through
//! an explicit [`SecretString::expose_secret`] call.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An opaque secret payload.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the underlying value. Never log or print the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns true if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Never serialize the actual value.
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept actual values on the way in (config files, env).
        Ok(SecretString(String::deserialize(deserializer)?))
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new("")
    }
}

/// A single named secret as it moves between stores.
///
/// Owned transiently during a sync pass; never persisted by this process.
#[derive(Debug, Clone)]
pub struct Secret {
    /// Secret name, unique within a store.
    pub name: String,

    /// Opaque payload (redacted in logs).
    pub value: SecretString,
}

impl Secret {
    /// Create a new secret.
    pub fn new(name: impl Into<String>, value: impl Into<SecretString>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// A per-secret read failure recorded during source enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    /// Name of the secret that could not be read.
    pub name: String,

    /// Human-readable reason.
    pub reason: String,
}

/// The result of one enumeration pass over the source store.
///
/// Holds the successfully fetched secrets in enumeration order plus the
/// per-secret read failures. Created at the start of a sync pass and dropped
/// at the end; no state survives across passes.
#[derive(Debug, Default)]
pub struct SecretBatch {
    /// Successfully fetched secrets, in enumeration order.
    pub secrets: Vec<Secret>,

    /// Per-secret read failures that did not abort enumeration.
    pub read_failures: Vec<ReadFailure>,
}

impl SecretBatch {
    /// Insert a fetched secret. If the batch already holds a secret with the
    /// same name, the later fetch replaces it in place.
    pub fn insert(&mut self, secret: Secret) {
        if let Some(existing) = self.secrets.iter_mut().find(|s| s.name == secret.name) {
            tracing::debug!(name = %secret.name, "Duplicate secret name in batch, keeping the later fetch");
            *existing = secret;
        } else {
            self.secrets.push(secret);
        }
    }

    /// Record a read failure without aborting enumeration.
    pub fn record_read_failure(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.read_failures.push(ReadFailure { name: name.into(), reason: reason.into() });
    }

    /// Number of successfully fetched secrets.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Returns true if no secret was fetched.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}
