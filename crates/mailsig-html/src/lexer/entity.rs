//! Character references in attribute values.
//!
//! [`decode_attribute`] and [`escape_attribute`] are inverses: a value read
//! by the lexer and written by the serializer comes back unchanged on the
//! next parse.

use std::borrow::Cow;

/// Named references understood in attribute values.
const NAMED_REFERENCES: &[(&str, char)] = &[
    ("amp", '&'),
    ("quot", '"'),
    ("apos", '\''),
    ("lt", '<'),
    ("gt", '>'),
    ("nbsp", '\u{a0}'),
];

/// Decodes `&name;`, `&#NN;` and `&#xNN;` references.
///
/// Unknown or unterminated references are kept literally. Code points that
/// are not valid characters decode to U+FFFD.
#[must_use]
pub fn decode_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];
        match decode_reference(rest) {
            Some((c, len)) => {
                decoded.push(c);
                rest = &rest[len..];
            }
            None => decoded.push('&'),
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}

/// Decodes the reference following an `&`.
///
/// Returns the character and the number of bytes consumed, `;` included.
fn decode_reference(text: &str) -> Option<(char, usize)> {
    let end = text.find(';')?;
    let body = &text[..end];

    let c = match body.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                Some(_) => return None,
                None if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => {
                    number.parse().ok()?
                }
                None => return None,
            };
            char::from_u32(code)
                .filter(|&c| c != '\0')
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        }
        None => {
            NAMED_REFERENCES
                .iter()
                .find(|(name, _)| *name == body)?
                .1
        }
    };
    Some((c, end + 1))
}

/// Escapes a value for a double-quoted attribute.
#[must_use]
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '\u{a0}']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
