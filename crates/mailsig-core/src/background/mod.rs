//! Background side of the extension.
//!
//! Holds the host API interfaces and the controller that answers popup
//! requests with them.

mod controller;
pub mod host;

pub use controller::BackgroundController;
pub use host::{HostError, IdentityApi, WindowApi, WindowKind, WindowSpec};
