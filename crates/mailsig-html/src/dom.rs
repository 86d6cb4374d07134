//! Document fragment tree.
//!
//! A [`Fragment`] is the body content of a parsed document: `html`, `head`
//! and `body` wrappers and doctypes are dropped, so serializing a fragment
//! yields what a browser reports as `body.innerHTML`.

use std::fmt;

use crate::error::ParseError;
use crate::lexer::{Attribute, Lexer, StartTag, Token, escape_attribute};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose end tag may be omitted.
const OPTIONAL_END_ELEMENTS: &[&str] = &[
    "p", "li", "dt", "dd", "option", "tr", "td", "th", "thead", "tbody", "tfoot", "colgroup",
];

/// Deepest element nesting kept as a tree. Tags beyond it stay as text.
pub const MAX_DEPTH: usize = 256;

/// Document wrappers that are skipped when building a fragment.
const WRAPPER_ELEMENTS: &[&str] = &["html", "head", "body"];

/// Start tags that implicitly close an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "div",
    "dl",
    "fieldset",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Returns true if the element never has content.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// A node in the fragment tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with its children.
    Element(Element),
    /// Raw character data.
    Text(String),
    /// Comment body.
    Comment(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Child nodes.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the value of an attribute, `""` for a bare attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = Some(value),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Removes an attribute if present.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
    }

    /// Returns the whitespace-separated entries of the `class` attribute.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Visits this element and all descendant elements, parents first.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Self)) {
        visit(self);
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.walk_mut(visit);
            }
        }
    }
}

/// Parsed body content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Top-level nodes.
    pub children: Vec<Node>,
    errors: Vec<ParseError>,
}

impl Fragment {
    /// Parses markup into a fragment, recovering from errors.
    ///
    /// Parsing never fails; problems are available from [`Fragment::errors`].
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let mut lexer = Lexer::new(html);
        let mut builder = TreeBuilder::default();

        loop {
            let position = lexer.position();
            let token = lexer.next_token();
            let source = &html[position..lexer.position()];
            match token {
                Token::Eof => break,
                Token::StartTag(tag) => builder.start_tag(tag, position, source),
                Token::EndTag(name) => builder.end_tag(&name, position, source),
                Token::Text(text) => builder.append(Node::Text(text.to_string())),
                Token::Comment(body) => builder.append(Node::Comment(body.to_string())),
                Token::Doctype(_) => {}
            }
        }

        let position = lexer.position();
        let mut errors = lexer.into_errors();
        let (children, builder_errors) = builder.finish(position);
        errors.extend(builder_errors);
        errors.sort_by_key(|e| e.position);

        Self { children, errors }
    }

    /// Returns the problems recorded while parsing, in input order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns true if the input parsed without any error.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Visits every element in document order.
    pub fn walk_mut(&mut self, mut visit: impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.walk_mut(&mut visit);
            }
        }
    }
}

/// Builds the node tree from tokens.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
    /// Names of start tags kept as text past [`MAX_DEPTH`], awaiting their end tags.
    overflow: Vec<String>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn append(&mut self, node: Node) {
        if matches!(&node, Node::Text(text) if text.is_empty()) {
            return;
        }
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    fn current_is(&self, name: &str) -> bool {
        self.open.last().is_some_and(|e| e.name == name)
    }

    /// Pops the current element into its parent.
    fn close_current(&mut self) {
        if let Some(element) = self.open.pop() {
            self.append(Node::Element(element));
        }
    }

    fn start_tag(&mut self, tag: StartTag, position: usize, source: &str) {
        if WRAPPER_ELEMENTS.contains(&tag.name.as_str()) {
            return;
        }
        if !self.overflow.is_empty() {
            self.keep_as_text(tag.name, source);
            return;
        }

        if (self.current_is("p") && CLOSES_PARAGRAPH.contains(&tag.name.as_str()))
            || (tag.name == "li" && self.current_is("li"))
        {
            self.close_current();
        }

        let element = Element {
            name: tag.name,
            attributes: tag.attributes,
            children: Vec::new(),
        };

        if is_void_element(&element.name) {
            self.append(Node::Element(element));
            return;
        }

        if self.open.len() >= MAX_DEPTH {
            self.errors.push(ParseError {
                position,
                message: format!("Elements nested deeper than {MAX_DEPTH} levels"),
            });
            self.keep_as_text(element.name, source);
            return;
        }

        if tag.self_closing {
            // The slash is ignored on non-void elements
            self.errors.push(ParseError {
                position,
                message: format!("Self-closing non-void element <{}>", element.name),
            });
        }
        self.open.push(element);
    }

    fn end_tag(&mut self, name: &str, position: usize, source: &str) {
        if WRAPPER_ELEMENTS.contains(&name) {
            return;
        }

        if let Some(index) = self.overflow.iter().rposition(|n| n == name) {
            self.overflow.truncate(index);
            self.append(Node::Text(source.to_string()));
            return;
        }

        let Some(index) = self.open.iter().rposition(|e| e.name == name) else {
            self.errors.push(ParseError {
                position,
                message: format!("Unexpected </{name}> end tag"),
            });
            return;
        };

        // Overflowing tags belong to the element being closed
        self.overflow.clear();
        while self.open.len() > index + 1 {
            self.report_unclosed(position);
            self.close_current();
        }
        self.close_current();
    }

    /// Appends a tag's source as text, tracking it until its end tag.
    fn keep_as_text(&mut self, name: String, source: &str) {
        if !is_void_element(&name) {
            self.overflow.push(name);
        }
        self.append(Node::Text(source.to_string()));
    }

    /// Records an error if the current element requires an end tag.
    fn report_unclosed(&mut self, position: usize) {
        if let Some(element) = self.open.last()
            && !OPTIONAL_END_ELEMENTS.contains(&element.name.as_str())
        {
            self.errors.push(ParseError {
                position,
                message: format!("Unclosed <{}> element", element.name),
            });
        }
    }

    fn finish(mut self, position: usize) -> (Vec<Node>, Vec<ParseError>) {
        while !self.open.is_empty() {
            self.report_unclosed(position);
            self.close_current();
        }
        (self.root, self.errors)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => fmt::Display::fmt(element, f),
            Self::Text(text) => f.write_str(text),
            Self::Comment(body) => write!(f, "<!--{body}-->"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attribute in &self.attributes {
            match &attribute.value {
                Some(value) => {
                    write!(f, " {}=\"{}\"", attribute.name, escape_attribute(value))?;
                }
                None => write!(f, " {}", attribute.name)?,
            }
        }
        f.write_str(">")?;

        if is_void_element(&self.name) {
            return Ok(());
        }

        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.name)
    }
}
