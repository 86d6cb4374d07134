//! Popup side of the extension.
//!
//! The session controller plus the interfaces it drives: the embedded
//! editor, the channel to the background, draft storage and the clipboard.

mod editor;
mod image;
mod ports;
mod session;
mod status;

pub use editor::{Editor, FormatAttribute, Selection};
pub use image::{is_valid_image_url, validate_image_url};
pub use ports::{BackgroundChannel, Clipboard, DraftStore};
pub use session::{APPLIED_MESSAGE, COPIED_MESSAGE, NO_IDENTITIES_MESSAGE, PopupSession};
pub use status::{StatusKind, StatusLine, StatusMessage};
