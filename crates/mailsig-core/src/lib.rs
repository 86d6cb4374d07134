//! # mailsig-core
//!
//! Core logic for the `MailSig` signature editor extension.
//!
//! This crate provides:
//! - **Identity model** - The host's mail identities
//! - **Message contract** - Popup ↔ background requests and response envelopes
//! - **Background controller** - Opens the popup and proxies identity calls to the host
//! - **Popup session** - Apply, copy, reset, image and colour actions over the editor
//! - **Settings** - Popup geometry, status lifetime and draft storage key
//!
//! Host, editor, storage and clipboard access go through traits, so
//! everything here runs natively under test; the `mailsig-ext` crate binds
//! them to the browser.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod background;
pub mod config;
mod error;
pub mod identity;
pub mod popup;
pub mod protocol;
#[cfg(test)]
mod testing;

pub use background::{
    BackgroundController, HostError, IdentityApi, WindowApi, WindowKind, WindowSpec,
};
pub use config::{DRAFT_KEY, Settings};
pub use error::{Error, Result};
pub use identity::{Identity, IdentityId};
pub use popup::{
    BackgroundChannel, Clipboard, DraftStore, Editor, FormatAttribute, PopupSession, Selection,
    StatusKind, StatusMessage,
};
pub use protocol::{IdentityUpdate, Request, Response};
