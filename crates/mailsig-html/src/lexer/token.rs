//! HTML token types.

/// A tag attribute with its decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Value with character references decoded, `None` for a bare boolean
    /// attribute.
    pub value: Option<String>,
}

impl Attribute {
    /// Creates an attribute with a value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// An opening tag such as `<p class="x">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lower-cased tag name.
    pub name: String,
    /// Attributes in source order, duplicates removed.
    pub attributes: Vec<Attribute>,
    /// Whether the tag ended with `/>`.
    pub self_closing: bool,
}

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opening tag.
    StartTag(StartTag),
    /// Closing tag, lower-cased name.
    EndTag(String),
    /// Character data, kept verbatim.
    Text(&'a str),
    /// Comment body between `<!--` and `-->`.
    Comment(&'a str),
    /// Doctype declaration body.
    Doctype(&'a str),
    /// End of input.
    Eof,
}
