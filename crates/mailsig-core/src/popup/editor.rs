//! Rich-text editor interface.

/// The editor's current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Start offset.
    pub index: usize,
    /// Selected length, zero for a caret.
    pub length: usize,
}

/// Formatting attributes applied from the colour pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAttribute {
    /// Text colour.
    Color,
    /// Background colour.
    Background,
}

impl FormatAttribute {
    /// Editor format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Background => "background",
        }
    }
}

/// An embedded rich-text editor.
///
/// Methods take `&self`: the editor is a handle to widget state owned
/// elsewhere.
pub trait Editor {
    /// Current content as HTML.
    fn html(&self) -> String;

    /// Replaces the content with HTML.
    fn set_html(&self, html: &str);

    /// Resets to a single empty paragraph.
    fn clear(&self);

    /// Current selection, `None` when the editor is unfocused.
    fn selection(&self) -> Option<Selection>;

    /// Embeds an image at an offset.
    fn insert_image(&self, index: usize, url: &str);

    /// Formats the current selection.
    fn format(&self, attribute: FormatAttribute, value: &str);
}
