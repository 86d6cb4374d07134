//! Background controller: the popup's bridge to the host.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::host::{IdentityApi, WindowApi, WindowSpec};
use crate::Result;
use crate::config::Settings;
use crate::identity::IdentityId;
use crate::popup::BackgroundChannel;
use crate::protocol::{IdentityUpdate, Request, Response};

/// Owns the privileged host API on behalf of the popup.
///
/// Host failures are returned as `{success: false}` responses; nothing
/// escapes the message boundary as an error.
pub struct BackgroundController<H> {
    host: H,
    settings: Settings,
}

impl<H> BackgroundController<H> {
    /// Create a controller over a host.
    #[must_use]
    pub const fn new(host: H, settings: Settings) -> Self {
        Self { host, settings }
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl<H: WindowApi> BackgroundController<H> {
    /// Opens the signature editor popup.
    ///
    /// Triggered by the toolbar icon, which has no observer, so a failure
    /// is only logged.
    pub async fn open_popup(&self) {
        let spec = WindowSpec::popup(
            &self.settings.popup_document,
            self.settings.popup_width,
            self.settings.popup_height,
        );

        match self.host.create(&spec).await {
            Ok(()) => debug!(url = %spec.url, "Opened signature popup"),
            Err(e) => warn!(error = %e, "Failed to open signature popup"),
        }
    }
}

impl<H: IdentityApi> BackgroundController<H> {
    /// Lists the host's identities.
    pub async fn get_identities(&self) -> Response {
        match self.host.list().await {
            Ok(identities) => {
                debug!(count = identities.len(), "Listed identities");
                Response::with_identities(identities)
            }
            Err(e) => {
                warn!(error = %e, "Identity listing failed");
                Response::failure(e.message)
            }
        }
    }

    /// Sets an identity's signature as rich text.
    ///
    /// The id is passed through unchecked; the host validates it.
    pub async fn update_signature(&self, id: &IdentityId, html: &str) -> Response {
        match self.host.update(id, &IdentityUpdate::html(html)).await {
            Ok(()) => {
                info!(identity = %id, "Signature updated");
                Response::ok()
            }
            Err(e) => {
                warn!(identity = %id, error = %e, "Signature update failed");
                Response::failure(e.message)
            }
        }
    }

    /// Routes a decoded request.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::GetIdentities => self.get_identities().await,
            Request::UpdateSignature { id, html } => self.update_signature(&id, &html).await,
        }
    }
}

/// In-process channel straight to the controller.
#[async_trait(?Send)]
impl<H: IdentityApi> BackgroundChannel for BackgroundController<H> {
    async fn send(&self, request: Request) -> Result<Response> {
        Ok(self.handle(request).await)
    }
}
