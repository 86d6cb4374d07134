//! Popup session controller.

use std::cell::RefCell;

use mailsig_html::prepare_signature;
use tracing::{debug, info, warn};

use super::editor::{Editor, FormatAttribute};
use super::image::validate_image_url;
use super::ports::{BackgroundChannel, Clipboard, DraftStore};
use super::status::{StatusKind, StatusLine, StatusMessage};
use crate::config::Settings;
use crate::identity::{Identity, IdentityId};
use crate::protocol::Request;
use crate::{Error, Result};

/// Shown after the host accepted a signature.
pub const APPLIED_MESSAGE: &str = "Signature successfully applied!";

/// Shown after the signature was copied.
pub const COPIED_MESSAGE: &str = "Signature copied!";

/// Shown instead of a selector when the host has no identities.
pub const NO_IDENTITIES_MESSAGE: &str = "No mail identities found.";

/// Mutable session state. Never borrowed across an `.await`.
#[derive(Debug, Default)]
struct SessionState {
    identities: Vec<Identity>,
    selected: Option<IdentityId>,
    status: StatusLine,
}

/// Orchestrates the popup: editor, identity selection and the actions bound
/// to its buttons.
///
/// Every action is its own error boundary: failures become an error status
/// and nothing propagates to the caller.
pub struct PopupSession<E, B, S, C> {
    editor: E,
    background: B,
    drafts: S,
    clipboard: C,
    settings: Settings,
    state: RefCell<SessionState>,
}

impl<E, B, S, C> PopupSession<E, B, S, C>
where
    E: Editor,
    B: BackgroundChannel,
    S: DraftStore,
    C: Clipboard,
{
    /// Create a session over its services.
    pub fn new(editor: E, background: B, drafts: S, clipboard: C, settings: Settings) -> Self {
        Self {
            editor,
            background,
            drafts,
            clipboard,
            settings,
            state: RefCell::new(SessionState::default()),
        }
    }

    /// Returns the editor.
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Startup sequence: identities first, then the saved draft.
    pub async fn start(&self) {
        self.load_identities().await;
        self.preload_draft().await;
    }

    /// Fetches identities from the background and preselects the first.
    pub async fn load_identities(&self) {
        match self.fetch_identities().await {
            Ok(identities) if identities.is_empty() => {
                info!("Host has no identities");
                self.replace_identities(identities);
                self.show(StatusKind::Info, NO_IDENTITIES_MESSAGE);
            }
            Ok(identities) => {
                debug!(count = identities.len(), "Loaded identities");
                self.replace_identities(identities);
            }
            Err(e) => {
                self.show(
                    StatusKind::Error,
                    format!("Error during account loading: {e}"),
                );
            }
        }
    }

    async fn fetch_identities(&self) -> Result<Vec<Identity>> {
        let response = self.background.send(Request::GetIdentities).await?;
        Ok(response.into_result()?.unwrap_or_default())
    }

    fn replace_identities(&self, identities: Vec<Identity>) {
        let mut state = self.state.borrow_mut();
        state.selected = identities.first().map(|i| i.id.clone());
        state.identities = identities;
    }

    /// Loads the stored draft into the editor, if there is one.
    pub async fn preload_draft(&self) {
        match self.drafts.load().await {
            Ok(Some(html)) if !html.is_empty() => {
                debug!(len = html.len(), "Restoring draft");
                self.editor.set_html(&html);
            }
            Ok(_) => {}
            Err(e) => {
                self.show(StatusKind::Error, format!("Error during draft loading: {e}"));
            }
        }
    }

    /// Known identities, in host order.
    pub fn identities(&self) -> Vec<Identity> {
        self.state.borrow().identities.clone()
    }

    /// Identity that will receive the signature.
    pub fn selected_identity(&self) -> Option<IdentityId> {
        self.state.borrow().selected.clone()
    }

    /// Records the selector's choice.
    pub fn select_identity(&self, id: IdentityId) {
        debug!(identity = %id, "Identity selected");
        self.state.borrow_mut().selected = Some(id);
    }

    /// Saves the raw editor content as the draft.
    ///
    /// Drafts are local, so the pipeline is skipped.
    pub async fn content_changed(&self) {
        if let Err(e) = self.drafts.save(&self.editor.html()).await {
            self.show(StatusKind::Error, format!("Draft save error: {e}"));
        }
    }

    /// Applies the editor content to the selected identity.
    pub async fn apply(&self) {
        if let Err(e) = self.try_apply().await {
            self.show(StatusKind::Error, format!("Apply error: {e}"));
        }
    }

    async fn try_apply(&self) -> Result<()> {
        let signature = prepare_signature(&self.editor.html())?;
        let id = self.selected_identity().ok_or(Error::NoIdentitySelected)?;

        self.background
            .send(Request::UpdateSignature {
                id,
                html: signature.as_str().to_string(),
            })
            .await?
            .into_result()?;

        self.show(StatusKind::Success, APPLIED_MESSAGE);
        self.drafts.save(signature.as_str()).await
    }

    /// Copies the prepared signature to the clipboard.
    pub async fn copy(&self) {
        match self.try_copy().await {
            Ok(()) => {
                self.show(StatusKind::Success, COPIED_MESSAGE);
            }
            Err(e) => {
                self.show(StatusKind::Error, format!("Copy error: {e}"));
            }
        }
    }

    async fn try_copy(&self) -> Result<()> {
        let signature = prepare_signature(&self.editor.html())?;
        self.clipboard.write_text(signature.as_str()).await
    }

    /// Clears the editor. The autosave listener persists the empty state.
    pub fn reset(&self) {
        self.editor.clear();
    }

    /// Inserts an image from the URL prompt's answer.
    pub fn insert_image(&self, input: Option<&str>) {
        match validate_image_url(input) {
            Ok(Some(url)) => {
                let index = self.editor.selection().map_or(0, |s| s.index);
                self.editor.insert_image(index, url);
            }
            Ok(None) => {}
            Err(e) => {
                self.show(StatusKind::Error, e.to_string());
            }
        }
    }

    /// Applies a picked colour to the selection; discarded without one.
    pub fn pick_color(&self, attribute: FormatAttribute, value: &str) {
        if self.editor.selection().is_some() {
            self.editor.format(attribute, value);
        } else {
            debug!(attribute = attribute.as_str(), "No selection, colour discarded");
        }
    }

    /// Visible status message.
    pub fn status(&self) -> Option<StatusMessage> {
        self.state.borrow().status.current().cloned()
    }

    /// Generation to start an expiry timer for, if the visible message has
    /// none running yet.
    pub fn claim_status_expiry(&self) -> Option<u64> {
        self.state.borrow_mut().status.claim_expiry()
    }

    /// Expires a status message once its lifetime has passed.
    pub fn dismiss_status(&self, generation: u64) -> bool {
        self.state.borrow_mut().status.dismiss(generation)
    }

    fn show(&self, kind: StatusKind, text: impl Into<String>) -> u64 {
        let text = text.into();
        match kind {
            StatusKind::Error => warn!(status = %text, "Action failed"),
            StatusKind::Info | StatusKind::Success => info!(status = %text, "Status"),
        }
        self.state.borrow_mut().status.show(kind, text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::background::{BackgroundController, HostError};
    use crate::popup::editor::Selection;
    use crate::protocol::IdentityUpdate;
    use crate::testing::{FakeEditor, FakeHost, MemoryClipboard, MemoryDrafts, init_tracing};

    type Session = PopupSession<
        FakeEditor,
        BackgroundController<FakeHost>,
        MemoryDrafts,
        MemoryClipboard,
    >;

    fn session(host: FakeHost) -> Session {
        init_tracing();
        PopupSession::new(
            FakeEditor::default(),
            BackgroundController::new(host, Settings::default()),
            MemoryDrafts::default(),
            MemoryClipboard::default(),
            Settings::default(),
        )
    }

    fn two_identities() -> FakeHost {
        FakeHost::with_identities(vec![
            Identity::new("id1", "Work", "work@example.com"),
            Identity::new("id2", "", "home@example.com"),
        ])
    }

    fn status_text(session: &Session) -> String {
        session.status().map(|s| s.text).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_start_loads_identities_and_draft() {
        let session = session(two_identities());
        *session.drafts.draft.borrow_mut() = Some("<p>draft</p>".to_string());

        session.start().await;

        assert_eq!(session.identities().len(), 2);
        assert_eq!(session.selected_identity(), Some(IdentityId::new("id1")));
        assert_eq!(session.editor().html(), "<p>draft</p>");
        assert!(session.status().is_none());
    }

    #[tokio::test]
    async fn test_zero_identities_shows_info_not_error() {
        let session = session(FakeHost::with_identities(vec![]));
        session.start().await;

        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.text, NO_IDENTITIES_MESSAGE);
        assert!(session.identities().is_empty());
        assert_eq!(session.selected_identity(), None);
    }

    #[tokio::test]
    async fn test_identity_listing_failure_surfaces_status() {
        let session = session(FakeHost::failing_list("access denied"));
        session.load_identities().await;

        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Error during account loading: access denied");
    }

    #[tokio::test]
    async fn test_empty_draft_not_restored() {
        let session = session(two_identities());
        *session.drafts.draft.borrow_mut() = Some(String::new());
        session.editor().set_html("<p>keep</p>");

        session.preload_draft().await;
        assert_eq!(session.editor().html(), "<p>keep</p>");
    }

    #[tokio::test]
    async fn test_apply_sends_prepared_signature_and_persists() {
        let session = session(two_identities());
        session.start().await;
        session.select_identity(IdentityId::new("id2"));
        session
            .editor()
            .set_html(r#"<p class="ql-size-huge">Hi</p>"#);

        session.apply().await;

        let expected = r#"<p style="font-size: 2.5em; margin: 0; line-height: 1.2;">Hi</p>"#;
        let host = session.background.host();
        assert_eq!(
            host.updates.borrow().as_slice(),
            &[(IdentityId::new("id2"), IdentityUpdate::html(expected))]
        );
        assert_eq!(session.drafts.draft.borrow().as_deref(), Some(expected));

        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, APPLIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_apply_rejects_script_without_contacting_host() {
        let session = session(two_identities());
        session.start().await;
        session
            .editor()
            .set_html("<p>ok</p><script>alert(1)</script>");

        session.apply().await;

        assert!(session.background.host().updates.borrow().is_empty());
        assert!(session.drafts.draft.borrow().is_none());
        assert_eq!(
            status_text(&session),
            "Apply error: <script> tags are not allowed"
        );
    }

    #[tokio::test]
    async fn test_apply_host_failure() {
        let host = two_identities();
        *host.update_error.borrow_mut() = Some(HostError::new("identity is locked"));
        let session = session(host);
        session.start().await;
        session.editor().set_html("<p>sig</p>");

        session.apply().await;

        assert_eq!(status_text(&session), "Apply error: identity is locked");
        assert!(session.drafts.draft.borrow().is_none());
    }

    #[tokio::test]
    async fn test_apply_without_identity() {
        let session = session(FakeHost::with_identities(vec![]));
        session.start().await;
        session.editor().set_html("<p>sig</p>");

        session.apply().await;

        assert_eq!(status_text(&session), "Apply error: No identity selected");
        assert!(session.background.host().updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_copy_writes_prepared_signature() {
        let session = session(two_identities());
        session
            .editor()
            .set_html(r#"<span class="ql-color-ff0000">x</span>"#);

        session.copy().await;

        assert_eq!(
            session.clipboard.text.borrow().as_deref(),
            Some(r#"<span style="color: #ff0000;">x</span>"#)
        );
        assert_eq!(status_text(&session), COPIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_copy_failure() {
        let session = session(two_identities());
        session.editor().set_html("<p>1 < 2</p>");

        session.copy().await;

        assert!(session.clipboard.text.borrow().is_none());
        let status = session.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("Copy error: Malformed HTML"));
    }

    #[tokio::test]
    async fn test_content_changed_saves_raw_html() {
        let session = session(two_identities());
        let raw = r#"<p class="ql-size-small">draft</p>"#;
        session.editor().set_html(raw);

        session.content_changed().await;

        assert_eq!(session.drafts.draft.borrow().as_deref(), Some(raw));
    }

    #[tokio::test]
    async fn test_draft_save_failure_surfaces_status() {
        let session = session(two_identities());
        session.drafts.fail.set(true);

        session.content_changed().await;

        assert_eq!(
            status_text(&session),
            "Draft save error: Storage error: quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_reset_then_autosave_persists_empty_state() {
        let session = session(two_identities());
        session.editor().set_html("<p>old</p>");

        session.reset();
        session.content_changed().await;

        assert_eq!(session.editor().html(), "<p><br></p>");
        assert_eq!(session.drafts.draft.borrow().as_deref(), Some("<p><br></p>"));
    }

    #[test]
    fn test_insert_image_at_selection() {
        let session = session(two_identities());
        session.editor().selection.set(Some(Selection {
            index: 4,
            length: 0,
        }));

        session.insert_image(Some("https://example.com/pic.png"));

        assert_eq!(
            session.editor().images.borrow().as_slice(),
            &[(4, "https://example.com/pic.png".to_string())]
        );
        assert!(session.status().is_none());
    }

    #[test]
    fn test_insert_image_without_selection_goes_to_start() {
        let session = session(two_identities());
        session.insert_image(Some("https://example.com/logo.svg"));
        assert_eq!(session.editor().images.borrow()[0].0, 0);
    }

    #[test]
    fn test_insert_image_invalid_and_cancelled() {
        let session = session(two_identities());

        session.insert_image(None);
        session.insert_image(Some(""));
        assert!(session.status().is_none());

        session.insert_image(Some("ftp://example.com/pic.png"));
        assert!(session.editor().images.borrow().is_empty());
        assert_eq!(
            status_text(&session),
            "Invalid picture URL: ftp://example.com/pic.png"
        );
    }

    #[test]
    fn test_pick_color_requires_selection() {
        let session = session(two_identities());

        session.pick_color(FormatAttribute::Color, "#ff0000");
        assert!(session.editor().formats.borrow().is_empty());

        session.editor().selection.set(Some(Selection {
            index: 0,
            length: 3,
        }));
        session.pick_color(FormatAttribute::Background, "#00ff00");
        assert_eq!(
            session.editor().formats.borrow().as_slice(),
            &[(FormatAttribute::Background, "#00ff00".to_string())]
        );
    }

    #[tokio::test]
    async fn test_status_dismissed_by_generation() {
        let session = session(two_identities());
        session.editor().set_html("<p>x</p>");

        session.copy().await;
        let first = session.status().unwrap().generation;
        session.copy().await;
        let second = session.status().unwrap().generation;

        assert!(!session.dismiss_status(first));
        assert!(session.status().is_some());
        assert!(session.dismiss_status(second));
        assert!(session.status().is_none());
    }

    #[tokio::test]
    async fn test_status_expiry_started_once_per_message() {
        let session = session(two_identities());
        session.editor().set_html("<p>x</p>");

        session.copy().await;
        let generation = session.status().unwrap().generation;
        assert_eq!(session.claim_status_expiry(), Some(generation));
        // Re-rendering the same status, e.g. on every keystroke.
        for _ in 0..10 {
            session.content_changed().await;
            assert_eq!(session.claim_status_expiry(), None);
        }

        session.copy().await;
        let next = session.status().unwrap().generation;
        assert_eq!(session.claim_status_expiry(), Some(next));
    }
}
