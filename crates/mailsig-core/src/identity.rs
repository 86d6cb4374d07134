//! Mail identity model.

use serde::{Deserialize, Serialize};

/// Opaque identifier the host assigns to an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(pub String);

impl IdentityId {
    /// Create a new identity ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdentityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A mail account persona the host can send as.
///
/// Host records carry more fields; only these are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Host identifier.
    pub id: IdentityId,
    /// Display label, may be empty.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub label: String,
    /// Email address.
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub email: String,
}

impl Identity {
    /// Create an identity.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: IdentityId::new(id),
            label: label.into(),
            email: email.into(),
        }
    }

    /// Name shown in the identity selector: the label, or the email if unlabeled.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.email
        } else {
            &self.label
        }
    }
}

/// Serde helper mapping a JSON `null` string to empty.
mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
