//! # mailsig-html
//!
//! Signature markup pipeline for rich-text email signatures.
//!
//! ## Features
//!
//! - **Fragment parsing**: A small, forgiving HTML lexer and tree builder
//! - **Style normalization**: Editor marker classes (`ql-size-*`, `ql-font-*`,
//!   `ql-color-*`, `ql-bg-*`) become inline styles
//! - **Sanitization**: `<script>`/`<iframe>` openers and malformed markup are rejected
//! - **Pipeline**: [`prepare_signature`] runs both stages and yields [`SanitizedHtml`]
//!
//! ## Quick Start
//!
//! ```
//! use mailsig_html::prepare_signature;
//!
//! let signature = prepare_signature(r#"<p class="ql-size-huge">Hi</p>"#)?;
//! assert_eq!(
//!     signature.as_str(),
//!     r#"<p style="font-size: 2.5em; margin: 0; line-height: 1.2;">Hi</p>"#
//! );
//! # Ok::<(), mailsig_html::Error>(())
//! ```
//!
//! ### Rejecting markup
//!
//! ```
//! use mailsig_html::{Error, sanitize};
//!
//! assert!(matches!(
//!     sanitize("<p>ok</p><script>alert(1)</script>"),
//!     Err(Error::ForbiddenTag { tag: "script" })
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod dom;
mod error;
pub mod lexer;
pub mod normalize;
mod pipeline;
pub mod sanitize;
pub mod style;

pub use dom::{Element, Fragment, Node};
pub use error::{Error, ParseError, Result};
pub use normalize::normalize_styles;
pub use pipeline::{SanitizedHtml, prepare_signature};
pub use sanitize::sanitize;
pub use style::StyleDeclarations;
