//! # mailsig-ext
//!
//! Thunderbird `WebExtension` front end for `MailSig`, compiled to
//! WebAssembly with `wasm-pack build --target no-modules`.
//!
//! Two entry points are exported to the page scripts in `extension/`:
//! - [`start_background`] - registers the toolbar and runtime message listeners
//! - [`start_popup`] - mounts the editor and wires the popup controls
//!
//! All behaviour lives in `mailsig-core`; this crate only implements its
//! host, editor, storage and clipboard traits over the browser APIs.

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod background;
mod bindings;
mod browser;
mod js;
mod logging;
mod popup;

pub use background::start_background;
pub use popup::start_popup;
