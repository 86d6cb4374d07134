//! In-memory fakes for the host, editor and browser services.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::background::{HostError, IdentityApi, WindowApi, WindowSpec};
use crate::identity::{Identity, IdentityId};
use crate::popup::{Clipboard, DraftStore, Editor, FormatAttribute, Selection};
use crate::protocol::IdentityUpdate;
use crate::{Error, Result};

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Host mail application with canned answers.
#[derive(Default)]
pub struct FakeHost {
    pub identities: RefCell<Vec<Identity>>,
    pub list_error: RefCell<Option<HostError>>,
    pub updates: RefCell<Vec<(IdentityId, IdentityUpdate)>>,
    pub update_error: RefCell<Option<HostError>>,
    pub windows: RefCell<Vec<WindowSpec>>,
    pub window_error: RefCell<Option<HostError>>,
}

impl FakeHost {
    pub fn with_identities(identities: Vec<Identity>) -> Self {
        Self {
            identities: RefCell::new(identities),
            ..Self::default()
        }
    }

    pub fn failing_list(message: &str) -> Self {
        Self {
            list_error: RefCell::new(Some(HostError::new(message))),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl IdentityApi for FakeHost {
    async fn list(&self) -> std::result::Result<Vec<Identity>, HostError> {
        if let Some(error) = self.list_error.borrow().clone() {
            return Err(error);
        }
        Ok(self.identities.borrow().clone())
    }

    async fn update(
        &self,
        id: &IdentityId,
        update: &IdentityUpdate,
    ) -> std::result::Result<(), HostError> {
        if let Some(error) = self.update_error.borrow().clone() {
            return Err(error);
        }
        self.updates.borrow_mut().push((id.clone(), update.clone()));
        Ok(())
    }
}

#[async_trait(?Send)]
impl WindowApi for FakeHost {
    async fn create(&self, spec: &WindowSpec) -> std::result::Result<(), HostError> {
        if let Some(error) = self.window_error.borrow().clone() {
            return Err(error);
        }
        self.windows.borrow_mut().push(spec.clone());
        Ok(())
    }
}

/// Editor holding its content as a string.
#[derive(Default)]
pub struct FakeEditor {
    pub html: RefCell<String>,
    pub selection: Cell<Option<Selection>>,
    pub images: RefCell<Vec<(usize, String)>>,
    pub formats: RefCell<Vec<(FormatAttribute, String)>>,
}

impl Editor for FakeEditor {
    fn html(&self) -> String {
        self.html.borrow().clone()
    }

    fn set_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
    }

    fn clear(&self) {
        self.set_html("<p><br></p>");
    }

    fn selection(&self) -> Option<Selection> {
        self.selection.get()
    }

    fn insert_image(&self, index: usize, url: &str) {
        self.images.borrow_mut().push((index, url.to_string()));
    }

    fn format(&self, attribute: FormatAttribute, value: &str) {
        self.formats.borrow_mut().push((attribute, value.to_string()));
    }
}

/// Draft slot in memory.
#[derive(Default)]
pub struct MemoryDrafts {
    pub draft: RefCell<Option<String>>,
    pub fail: Cell<bool>,
}

#[async_trait(?Send)]
impl DraftStore for MemoryDrafts {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.draft.borrow().clone())
    }

    async fn save(&self, html: &str) -> Result<()> {
        if self.fail.get() {
            return Err(Error::Storage("quota exceeded".to_string()));
        }
        *self.draft.borrow_mut() = Some(html.to_string());
        Ok(())
    }
}

/// Clipboard in memory.
#[derive(Default)]
pub struct MemoryClipboard {
    pub text: RefCell<Option<String>>,
}

#[async_trait(?Send)]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.text.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
