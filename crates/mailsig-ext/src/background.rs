//! Background page entry point.

use std::rc::Rc;

use mailsig_core::{BackgroundController, Request, Settings};
use serde_json::Value;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::bindings;
use crate::browser::ThunderbirdHost;
use crate::{js, logging};

type Controller = BackgroundController<ThunderbirdHost>;

/// Registers the toolbar button and runtime message listeners.
///
/// Called once by `background.js` after the module loads.
#[wasm_bindgen]
pub fn start_background() {
    logging::init();
    let controller = Rc::new(BackgroundController::new(
        ThunderbirdHost,
        Settings::default(),
    ));

    let on_clicked = {
        let controller = Rc::clone(&controller);
        Closure::wrap(Box::new(move || {
            let controller = Rc::clone(&controller);
            spawn_local(async move { controller.open_popup().await });
        }) as Box<dyn FnMut()>)
    };
    bindings::on_action_clicked_add_listener(on_clicked.as_ref().unchecked_ref());
    on_clicked.forget();

    let on_message = Closure::wrap(Box::new(move |message: JsValue, _sender: JsValue| {
        respond(&controller, &message)
    }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>);
    bindings::on_message_add_listener(on_message.as_ref().unchecked_ref());
    on_message.forget();

    info!("Background listeners registered");
}

/// Answers one runtime message.
///
/// Returns a promise for the response envelope, or `undefined` for messages
/// this extension does not handle so other listeners may answer them.
fn respond(controller: &Rc<Controller>, message: &JsValue) -> JsValue {
    let request = js::from_js::<Value>(message)
        .ok()
        .and_then(|message| Request::from_message(&message));
    let Some(request) = request else {
        debug!("Ignoring unrecognised runtime message");
        return JsValue::UNDEFINED;
    };

    let controller = Rc::clone(controller);
    future_to_promise(async move {
        let response = controller.handle(request).await;
        js::to_js(&response).map_err(|e| JsValue::from_str(&e.to_string()))
    })
    .into()
}
