//! Conversion of editor marker classes into inline styles.
//!
//! The editor represents size, font and colour choices as `ql-*` classes
//! that only its own stylesheet understands. A signature leaves that
//! stylesheet behind, so every marker is rewritten into an equivalent inline
//! declaration on the same element and the class is dropped.

use crate::dom::{Element, Fragment};
use crate::style::StyleDeclarations;

/// Serif font family list.
pub const SERIF_FAMILY: &str = "Georgia, Times New Roman, serif";

/// Monospace font family list.
pub const MONOSPACE_FAMILY: &str = "Monaco, Courier New, monospace";

/// A marker-class rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRule {
    /// An exact class mapped to a fixed declaration.
    Fixed {
        /// Marker class.
        class: &'static str,
        /// CSS property set on the element.
        property: &'static str,
        /// CSS value.
        value: &'static str,
    },
    /// Classes `<prefix><hex>` mapped to `property: #<hex>`.
    HexColor {
        /// Class prefix including the trailing dash.
        prefix: &'static str,
        /// CSS property set on the element.
        property: &'static str,
    },
}

/// Marker classes, applied in this order.
pub const CLASS_RULES: &[ClassRule] = &[
    ClassRule::Fixed {
        class: "ql-size-small",
        property: "font-size",
        value: "0.75em",
    },
    ClassRule::Fixed {
        class: "ql-size-large",
        property: "font-size",
        value: "1.5em",
    },
    ClassRule::Fixed {
        class: "ql-size-huge",
        property: "font-size",
        value: "2.5em",
    },
    ClassRule::Fixed {
        class: "ql-font-serif",
        property: "font-family",
        value: SERIF_FAMILY,
    },
    ClassRule::Fixed {
        class: "ql-font-monospace",
        property: "font-family",
        value: MONOSPACE_FAMILY,
    },
    ClassRule::HexColor {
        prefix: "ql-color-",
        property: "color",
    },
    ClassRule::HexColor {
        prefix: "ql-bg-",
        property: "background-color",
    },
];

/// Declarations every paragraph receives, overriding editor spacing.
pub const PARAGRAPH_DECLARATIONS: &[(&str, &str)] = &[("margin", "0"), ("line-height", "1.2")];

/// Converts editor marker classes to inline styles.
///
/// Running the conversion on its own output changes nothing.
#[must_use]
pub fn normalize_styles(html: &str) -> String {
    let mut fragment = Fragment::parse(html);
    fragment.walk_mut(normalize_element);
    fragment.to_string()
}

/// Applies the rule table to one element.
fn normalize_element(element: &mut Element) {
    let mut classes: Vec<String> = element.classes().into_iter().map(String::from).collect();
    let class_count = classes.len();
    let mut style: Option<StyleDeclarations> = None;

    let set = |style: &mut Option<StyleDeclarations>, property: &str, value: String| {
        style
            .get_or_insert_with(|| {
                StyleDeclarations::parse(element.attribute("style").unwrap_or_default())
            })
            .set(property, value);
    };

    for rule in CLASS_RULES {
        match *rule {
            ClassRule::Fixed {
                class,
                property,
                value,
            } => {
                if classes.iter().any(|c| c == class) {
                    classes.retain(|c| c != class);
                    set(&mut style, property, value.to_string());
                }
            }
            ClassRule::HexColor { prefix, property } => {
                for class in classes.iter().filter(|c| c.starts_with(prefix)) {
                    // Invalid colours are dropped with their class
                    if let Some(hex) = class.strip_prefix(prefix).filter(|h| is_hex_color(h)) {
                        set(&mut style, property, format!("#{hex}"));
                    }
                }
                classes.retain(|c| !c.starts_with(prefix));
            }
        }
    }

    if element.name == "p" {
        for &(property, value) in PARAGRAPH_DECLARATIONS {
            set(&mut style, property, value.to_string());
        }
    }

    if classes.len() != class_count {
        if classes.is_empty() {
            element.remove_attribute("class");
        } else {
            element.set_attribute("class", classes.join(" "));
        }
    }

    if let Some(style) = style {
        element.set_attribute("style", style.to_string());
    }
}

/// Returns true for a 3, 4, 6 or 8 digit hex colour without `#`.
fn is_hex_color(hex: &str) -> bool {
    matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit())
}
