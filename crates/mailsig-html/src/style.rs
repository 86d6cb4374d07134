//! Inline `style` attribute declarations.

use std::fmt;

/// Ordered list of CSS declarations from a `style` attribute.
///
/// Setting a property that is already declared replaces its value in place,
/// so repeated normalization keeps the declaration order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    declarations: Vec<(String, String)>,
}

impl StyleDeclarations {
    /// Creates an empty declaration list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the text of a `style` attribute.
    ///
    /// Declarations without a name or a value are dropped. Semicolons inside
    /// quotes or parentheses do not split declarations.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for declaration in split_declarations(text) {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if !name.is_empty() && !value.is_empty() {
                style.set(name, value);
            }
        }
        style
    }

    /// Returns the value of a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        let property = property.to_ascii_lowercase();
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Sets a property, replacing any existing value in place.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let property = property.to_ascii_lowercase();
        let value = value.into();
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property, value)),
        }
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over `(property, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

/// Splits declaration text on top-level semicolons.
fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    // An unterminated string invalidates the declaration it starts in.
    if quote.is_none() {
        parts.push(&text[start..]);
    }
    parts
}
