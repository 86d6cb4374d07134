//! Transient status line.
//!
//! One message is visible at a time. Each message gets a generation number;
//! an expiry timer clears the line only if its message is still the one
//! shown, so a newer status is never cut short by an older timer.

/// How a status message is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral information.
    Info,
    /// A completed action.
    Success,
    /// A failed action.
    Error,
}

impl StatusKind {
    /// CSS class used to render this kind.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A visible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Styling.
    pub kind: StatusKind,
    /// Identifies this message for expiry.
    pub generation: u64,
}

/// The popup's status line.
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<StatusMessage>,
    generation: u64,
    /// Generation whose expiry timer has been started.
    expiry: Option<u64>,
}

impl StatusLine {
    /// Creates an empty status line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a message, replacing the current one. Returns its generation.
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.current = Some(StatusMessage {
            text: text.into(),
            kind,
            generation: self.generation,
        });
        self.generation
    }

    /// Returns the visible message.
    #[must_use]
    pub const fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    /// Claims the expiry timer for the visible message.
    ///
    /// Returns its generation the first time it is called for that message,
    /// `None` after that or when the line is empty.
    pub fn claim_expiry(&mut self) -> Option<u64> {
        let generation = self.current.as_ref()?.generation;
        if self.expiry == Some(generation) {
            return None;
        }
        self.expiry = Some(generation);
        Some(generation)
    }

    /// Clears the line if `generation` is still the visible message.
    ///
    /// Returns true if the message was cleared.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if self.current.as_ref().is_some_and(|m| m.generation == generation) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
