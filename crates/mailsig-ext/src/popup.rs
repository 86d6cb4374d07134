//! Popup page entry point and DOM wiring.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use mailsig_core::{FormatAttribute, IdentityId, PopupSession, Settings};
use serde_json::json;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement,
};

use crate::bindings::Quill;
use crate::browser::{LocalDraftStore, NavigatorClipboard, QuillEditor, RuntimeChannel};
use crate::{js, logging};

type Session = PopupSession<QuillEditor, RuntimeChannel, LocalDraftStore, NavigatorClipboard>;

const IMAGE_PROMPT: &str = "Enter picture URL (Recommended HTTPS):";

/// Mounts the editor, loads identities and the draft, then binds the popup
/// controls.
///
/// Called by `popup.js` once the DOM is ready.
#[wasm_bindgen]
pub async fn start_popup() -> Result<(), JsValue> {
    logging::init();
    let document = document()?;
    let settings = Settings::default();

    let quill = Quill::new("#editor", &editor_options()?);
    let drafts = LocalDraftStore::new(settings.draft_key.clone());
    let session = Rc::new(PopupSession::new(
        QuillEditor::new(quill),
        RuntimeChannel,
        drafts,
        NavigatorClipboard,
        settings,
    ));

    bind_color_picker(&document, "color-picker-btn", FormatAttribute::Color, &session)?;
    bind_color_picker(&document, "bgcolor-picker-btn", FormatAttribute::Background, &session)?;

    session.start().await;
    render_identities(&document, &session)?;
    render_status(&session);

    // Registered after the draft is restored so restoring does not re-save it.
    let on_change = {
        let session = Rc::clone(&session);
        Closure::wrap(Box::new(move || {
            let session = Rc::clone(&session);
            spawn_local(async move {
                session.content_changed().await;
                render_status(&session);
            });
        }) as Box<dyn FnMut()>)
    };
    session
        .editor()
        .quill()
        .on("text-change", on_change.as_ref().unchecked_ref());
    on_change.forget();

    on_click(&document, "apply", &session, |session| {
        spawn_local(async move {
            session.apply().await;
            render_status(&session);
        });
    })?;
    on_click(&document, "copy", &session, |session| {
        spawn_local(async move {
            session.copy().await;
            render_status(&session);
        });
    })?;
    on_click(&document, "reset", &session, |session| session.reset())?;
    on_click(&document, "add-image", &session, |session| {
        let answer = web_sys::window()
            .and_then(|window| window.prompt_with_message(IMAGE_PROMPT).ok())
            .flatten();
        session.insert_image(answer.as_deref());
        render_status(&session);
    })?;

    debug!("Popup ready");
    Ok(())
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn editor_options() -> Result<JsValue, JsValue> {
    let options = json!({
        "modules": { "toolbar": { "container": "#editor-toolbar" } },
        "formats": [
            "bold", "italic", "underline", "strike", "list", "color",
            "background", "font", "size", "link", "image"
        ],
        "theme": "snow"
    });
    js::to_js(&options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Binds a click handler that receives its own handle on the session.
fn on_click(
    document: &Document,
    id: &str,
    session: &Rc<Session>,
    handler: impl Fn(Rc<Session>) + 'static,
) -> Result<(), JsValue> {
    let session = Rc::clone(session);
    let callback =
        Closure::wrap(Box::new(move || handler(Rc::clone(&session))) as Box<dyn FnMut()>);
    element(document, id)?
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn bind_color_picker(
    document: &Document,
    id: &str,
    attribute: FormatAttribute,
    session: &Rc<Session>,
) -> Result<(), JsValue> {
    on_click(document, id, session, move |session| {
        if let Err(e) = open_color_input(&session, attribute) {
            warn!(error = %js::error_message(&e), "Colour picker unavailable");
        }
    })
}

/// Opens the native colour chooser through a throwaway hidden input.
fn open_color_input(session: &Rc<Session>, attribute: FormatAttribute) -> Result<(), JsValue> {
    let document = document()?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("color");
    input.style().set_property("display", "none")?;
    body.append_child(&input)?;
    input.click();

    // The chooser fires `input` repeatedly while dragging; only the first
    // one reaches the once-only closure.
    let options = AddEventListenerOptions::new();
    options.set_once(true);

    let session = Rc::clone(session);
    let target = input.clone();
    let on_input = Closure::once_into_js(move || {
        session.pick_color(attribute, &target.value());
        target.remove();
    });
    input.add_event_listener_with_callback_and_add_event_listener_options(
        "input",
        on_input.unchecked_ref(),
        &options,
    )?;
    Ok(())
}

fn render_identities(document: &Document, session: &Rc<Session>) -> Result<(), JsValue> {
    let select: HtmlSelectElement = element(document, "identities")?.dyn_into()?;
    let identities = session.identities();
    select.set_inner_html("");
    select.set_hidden(identities.is_empty());
    for identity in &identities {
        let option = HtmlOptionElement::new_with_text_and_value(
            identity.display_name(),
            identity.id.as_str(),
        )?;
        select.append_child(&option)?;
    }

    let session = Rc::clone(session);
    let on_change = Closure::wrap(Box::new(move |event: Event| {
        let select = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlSelectElement>().ok());
        if let Some(select) = select {
            session.select_identity(IdentityId::new(select.value()));
        }
    }) as Box<dyn FnMut(Event)>);
    select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

/// Shows the current status in `#errors`, starting its expiry timer the
/// first time a message is shown.
fn render_status(session: &Rc<Session>) {
    let Ok(line) = document().and_then(|document| element(&document, "errors")) else {
        return;
    };

    let Some(message) = session.status() else {
        line.set_class_name("");
        return;
    };
    line.set_text_content(Some(&message.text));
    line.set_class_name(&format!("visible {}", message.kind.css_class()));

    let Some(generation) = session.claim_status_expiry() else {
        return;
    };
    let lifetime = session.settings().status_lifetime().as_millis();
    let session = Rc::clone(session);
    spawn_local(async move {
        TimeoutFuture::new(u32::try_from(lifetime).unwrap_or(u32::MAX)).await;
        if session.dismiss_status(generation) {
            render_status(&session);
        }
    });
}
