//! Raw bindings to the `WebExtension` globals and the Quill editor.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["browser", "identities"], js_name = list)]
    pub fn identities_list() -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["browser", "identities"], js_name = update)]
    pub fn identities_update(identity_id: &str, details: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["browser", "windows"], js_name = create)]
    pub fn windows_create(create_data: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["browser", "runtime"], js_name = getURL)]
    pub fn runtime_get_url(path: &str) -> String;

    #[wasm_bindgen(js_namespace = ["browser", "runtime"], js_name = sendMessage)]
    pub fn runtime_send_message(message: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["browser", "runtime", "onMessage"], js_name = addListener)]
    pub fn on_message_add_listener(listener: &js_sys::Function);

    #[wasm_bindgen(js_namespace = ["browser", "browserAction", "onClicked"], js_name = addListener)]
    pub fn on_action_clicked_add_listener(listener: &js_sys::Function);

    #[wasm_bindgen(js_namespace = ["browser", "storage", "local"], js_name = get)]
    pub fn storage_local_get(keys: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["browser", "storage", "local"], js_name = set)]
    pub fn storage_local_set(items: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    pub fn clipboard_write_text(text: &str) -> js_sys::Promise;
}

#[wasm_bindgen]
extern "C" {
    /// A Quill editor instance, loaded from `quill.js` as a page global.
    pub type Quill;

    #[wasm_bindgen(constructor)]
    pub fn new(container: &str, options: &JsValue) -> Quill;

    /// The editable root element.
    #[wasm_bindgen(method, getter)]
    pub fn root(this: &Quill) -> web_sys::HtmlElement;

    /// Current range, or `null` when the editor is unfocused.
    #[wasm_bindgen(method, js_name = getSelection)]
    pub fn get_selection(this: &Quill) -> JsValue;

    #[wasm_bindgen(method, js_name = setContents)]
    pub fn set_contents(this: &Quill, delta: &JsValue);

    #[wasm_bindgen(method, js_name = insertEmbed)]
    pub fn insert_embed(this: &Quill, index: u32, kind: &str, value: &str);

    #[wasm_bindgen(method)]
    pub fn format(this: &Quill, name: &str, value: &str);

    #[wasm_bindgen(method)]
    pub fn on(this: &Quill, event: &str, handler: &js_sys::Function);
}
