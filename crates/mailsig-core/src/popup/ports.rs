//! Services the popup session depends on.

use async_trait::async_trait;

use crate::Result;
use crate::protocol::{Request, Response};

/// Request/response channel to the background controller.
#[async_trait(?Send)]
pub trait BackgroundChannel {
    /// Sends a request and waits for its response.
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Persistent slot for the signature draft.
#[async_trait(?Send)]
pub trait DraftStore {
    /// Reads the stored draft.
    async fn load(&self) -> Result<Option<String>>;

    /// Overwrites the stored draft.
    async fn save(&self, html: &str) -> Result<()>;
}

/// System clipboard.
#[async_trait(?Send)]
pub trait Clipboard {
    /// Writes text to the clipboard.
    async fn write_text(&self, text: &str) -> Result<()>;
}
