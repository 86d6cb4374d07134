//! Core service traits implemented over the `WebExtension` APIs.

use async_trait::async_trait;
use mailsig_core::{
    BackgroundChannel, Clipboard, DraftStore, Editor, Error, FormatAttribute, HostError, Identity,
    IdentityApi, IdentityId, IdentityUpdate, Request, Response, Result, Selection, WindowApi,
    WindowSpec,
};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;

use crate::bindings::{self, Quill};
use crate::js;

/// Thunderbird's `identities` and `windows` namespaces.
pub struct ThunderbirdHost;

#[async_trait(?Send)]
impl IdentityApi for ThunderbirdHost {
    async fn list(&self) -> std::result::Result<Vec<Identity>, HostError> {
        let value = js::settle(bindings::identities_list())
            .await
            .map_err(HostError::new)?;
        js::from_js(&value).map_err(|e| HostError::new(e.to_string()))
    }

    async fn update(
        &self,
        id: &IdentityId,
        update: &IdentityUpdate,
    ) -> std::result::Result<(), HostError> {
        let details = js::to_js(update).map_err(|e| HostError::new(e.to_string()))?;
        js::settle(bindings::identities_update(id.as_str(), &details))
            .await
            .map_err(HostError::new)?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl WindowApi for ThunderbirdHost {
    async fn create(&self, spec: &WindowSpec) -> std::result::Result<(), HostError> {
        let spec = WindowSpec {
            url: bindings::runtime_get_url(&spec.url),
            ..spec.clone()
        };
        let data = js::to_js(&spec).map_err(|e| HostError::new(e.to_string()))?;
        js::settle(bindings::windows_create(&data))
            .await
            .map_err(HostError::new)?;
        Ok(())
    }
}

/// `runtime.sendMessage` to the background page.
pub struct RuntimeChannel;

#[async_trait(?Send)]
impl BackgroundChannel for RuntimeChannel {
    async fn send(&self, request: Request) -> Result<Response> {
        let message = js::to_js(&request)?;
        let reply = js::settle(bindings::runtime_send_message(&message))
            .await
            .map_err(Error::HostApi)?;
        js::from_js(&reply)
    }
}

/// Single key in `storage.local`.
pub struct LocalDraftStore {
    key: String,
}

impl LocalDraftStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[async_trait(?Send)]
impl DraftStore for LocalDraftStore {
    async fn load(&self) -> Result<Option<String>> {
        let items = js::settle(bindings::storage_local_get(&JsValue::from_str(&self.key)))
            .await
            .map_err(Error::Storage)?;
        let items: Map<String, Value> = js::from_js(&items)?;
        Ok(items
            .get(&self.key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn save(&self, html: &str) -> Result<()> {
        let mut items = Map::new();
        items.insert(self.key.clone(), Value::String(html.to_string()));
        let items = js::to_js(&items)?;
        js::settle(bindings::storage_local_set(&items))
            .await
            .map_err(Error::Storage)?;
        Ok(())
    }
}

/// `navigator.clipboard`.
pub struct NavigatorClipboard;

#[async_trait(?Send)]
impl Clipboard for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        js::settle(bindings::clipboard_write_text(text))
            .await
            .map_err(Error::Clipboard)?;
        Ok(())
    }
}

/// Quill-backed editor.
pub struct QuillEditor {
    quill: Quill,
}

impl QuillEditor {
    pub const fn new(quill: Quill) -> Self {
        Self { quill }
    }

    pub const fn quill(&self) -> &Quill {
        &self.quill
    }
}

impl Editor for QuillEditor {
    fn html(&self) -> String {
        self.quill.root().inner_html()
    }

    fn set_html(&self, html: &str) {
        self.quill.root().set_inner_html(html);
    }

    fn clear(&self) {
        let insert = js_sys::Object::new();
        if js_sys::Reflect::set(&insert, &"insert".into(), &"\n".into()).is_ok() {
            self.quill
                .set_contents(&js_sys::Array::of1(&insert).into());
        }
    }

    // Quill reports offsets as JS numbers.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn selection(&self) -> Option<Selection> {
        let range = self.quill.get_selection();
        if range.is_null() || range.is_undefined() {
            return None;
        }
        let field = |name: &str| {
            js_sys::Reflect::get(&range, &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.as_f64())
        };
        Some(Selection {
            index: field("index")? as usize,
            length: field("length").unwrap_or(0.0) as usize,
        })
    }

    fn insert_image(&self, index: usize, url: &str) {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.quill.insert_embed(index, "image", url);
    }

    fn format(&self, attribute: FormatAttribute, value: &str) {
        self.quill.format(attribute.as_str(), value);
    }
}
