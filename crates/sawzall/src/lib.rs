//! Parse HTML and query it with CSS selectors.
//!
//! # Scope
//!
//! This crate provides:
//! - **Parsing** - [`parse_document`] and [`parse_fragment`] never fail;
//!   malformed markup is repaired and recorded as parse issues
//! - **Selection** - [`Document::select`] and [`Element::select`] take a CSS
//!   selector list and return matches in document order
//! - **Element accessors** - name, attributes, classes, child elements,
//!   serialized HTML and plain text
//!
//! ```
//! let document = sawzall::parse_fragment("<ul><li>One</li><li>Two</li></ul>");
//! let items: Vec<String> = document
//!     .select("ul li")
//!     .unwrap()
//!     .iter()
//!     .map(|li| li.inner_html())
//!     .collect();
//! assert_eq!(items, ["One", "Two"]);
//! ```
//!
//! The lower layers are re-exported as [`dom`], [`html`] and [`css`].

mod document;
mod element;
mod inner_text;

pub use sawzall_css as css;
pub use sawzall_dom as dom;
pub use sawzall_html as html;

pub use document::Document;
pub use element::Element;
pub use sawzall_css::{SelectorError, SelectorErrorKind, SelectorList};
pub use sawzall_html::{ParseIssue, ParseIssueKind};

/// Parse a complete HTML document.
///
/// A missing `html`, `head` or `body` is synthesized.
#[must_use]
pub fn parse_document(html: &str) -> Document {
    Document::parse(html)
}

/// Parse an HTML fragment.
///
/// The root element is an `html` element holding the fragment's top-level
/// nodes; no `head` or `body` is synthesized.
#[must_use]
pub fn parse_fragment(html: &str) -> Document {
    Document::parse_fragment(html)
}

/// How [`Element::has_class`] compares class names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// Exact comparison.
    #[default]
    CaseSensitive,
    /// Compare after folding ASCII letters; other characters must match
    /// exactly.
    AsciiCaseInsensitive,
}
