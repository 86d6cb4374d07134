//! Extension settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Storage key holding the last signature draft.
pub const DRAFT_KEY: &str = "lastSignature";

/// Extension settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Popup document, relative to the extension root.
    pub popup_document: String,
    /// Popup window width in pixels.
    pub popup_width: u32,
    /// Popup window height in pixels.
    pub popup_height: u32,
    /// How long a status message stays visible, in milliseconds.
    pub status_lifetime_ms: u64,
    /// Storage key for the signature draft.
    pub draft_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            popup_document: "popup.html".to_string(),
            popup_width: 600,
            popup_height: 500,
            status_lifetime_ms: 5_000,
            draft_key: DRAFT_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Status message lifetime.
    #[must_use]
    pub const fn status_lifetime(&self) -> Duration {
        Duration::from_millis(self.status_lifetime_ms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!((settings.popup_width, settings.popup_height), (600, 500));
        assert_eq!(settings.status_lifetime(), Duration::from_secs(5));
        assert_eq!(settings.draft_key, "lastSignature");
    }

    #[test]
    fn test_partial_override() {
        let settings: Settings = serde_json::from_str(r#"{"popupWidth": 800}"#).unwrap();
        assert_eq!(settings.popup_width, 800);
        assert_eq!(settings.popup_height, 500);
        assert_eq!(settings.popup_document, "popup.html");
    }
}
