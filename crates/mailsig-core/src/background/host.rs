//! Host mail application interfaces.

use async_trait::async_trait;
use serde::Serialize;

use crate::identity::{Identity, IdentityId};
use crate::protocol::IdentityUpdate;

/// Error reported by the host, carrying its message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    /// Host-provided message.
    pub message: String,
}

impl HostError {
    /// Create a host error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The host's identity API.
#[async_trait(?Send)]
pub trait IdentityApi {
    /// Lists every configured identity.
    async fn list(&self) -> Result<Vec<Identity>, HostError>;

    /// Updates one identity.
    async fn update(&self, id: &IdentityId, update: &IdentityUpdate) -> Result<(), HostError>;
}

/// The host's window API.
#[async_trait(?Send)]
pub trait WindowApi {
    /// Opens a window.
    async fn create(&self, spec: &WindowSpec) -> Result<(), HostError>;
}

/// Window type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Undecorated popup window.
    Popup,
}

/// Parameters for a new window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSpec {
    /// Document to load.
    pub url: String,
    /// Window type.
    #[serde(rename = "type")]
    pub kind: WindowKind,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl WindowSpec {
    /// A popup window of the given size.
    #[must_use]
    pub fn popup(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            kind: WindowKind::Popup,
            width,
            height,
        }
    }
}
