//! Read-only element view.

use core::fmt;

use sawzall_css::{SelectorError, SelectorList, select};
use sawzall_dom::{ElementData, NodeId};
use serde::{Serialize, Serializer};

use crate::inner_text::inner_text;
use crate::{CaseSensitivity, Document};

/// A borrowed element of a [`Document`].
///
/// Cheap to copy. Two `Element`s are equal when they point at the same node
/// of the same document.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> Element<'a> {
    /// `id` must name an element node of `document`.
    pub(crate) const fn new(document: &'a Document, id: NodeId) -> Self {
        Self { document, id }
    }

    fn data(&self) -> Option<&'a ElementData> {
        self.document.tree().as_element(self.id)
    }

    /// Handle of the underlying node.
    #[must_use]
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// The document this element belongs to.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// Lowercased tag name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.data().map_or("", |data| data.tag_name.as_str())
    }

    /// Serialization of the element and its subtree.
    ///
    /// [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
    #[must_use]
    pub fn html(&self) -> String {
        sawzall_html::outer_html(self.document.tree(), self.id)
    }

    /// Serialization of the element's children. Empty for void elements.
    #[must_use]
    pub fn inner_html(&self) -> String {
        sawzall_html::inner_html(self.document.tree(), self.id)
    }

    /// Value of the attribute `key`, compared ASCII case-insensitively.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.data()?.get_attribute(&key.to_ascii_lowercase())
    }

    /// Every attribute as `(name, value)`, sorted by name.
    #[must_use]
    pub fn attrs(&self) -> Vec<(&'a str, &'a str)> {
        let mut attrs: Vec<(&str, &str)> = self
            .data()
            .map(|data| {
                data.attrs
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        // Names are unique within an element.
        attrs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        attrs
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&'a str> {
        self.data()?.id()
    }

    /// [§ 3.2.6 The class attribute](https://html.spec.whatwg.org/multipage/dom.html#classes)
    ///
    /// Whitespace-separated tokens of the `class` attribute, in source order.
    #[must_use]
    pub fn classes(&self) -> Vec<&'a str> {
        self.data().map(ElementData::classes).unwrap_or_default()
    }

    /// Whether `name` is one of [`Element::classes`].
    ///
    /// [`CaseSensitivity::AsciiCaseInsensitive`] folds ASCII letters only.
    #[must_use]
    pub fn has_class(&self, name: &str, case_sensitivity: CaseSensitivity) -> bool {
        self.classes().into_iter().any(|class| match case_sensitivity {
            CaseSensitivity::CaseSensitive => class == name,
            CaseSensitivity::AsciiCaseInsensitive => class.eq_ignore_ascii_case(name),
        })
    }

    /// Element children, in document order. Text and comments are skipped.
    #[must_use]
    pub fn child_elements(&self) -> Vec<Self> {
        self.document
            .elements(self.document.tree().element_children(self.id))
    }

    /// The nearest element ancestor. `None` for the root element.
    #[must_use]
    pub fn parent_element(&self) -> Option<Self> {
        let parent = self.document.tree().parent(self.id)?;
        self.document.element(parent)
    }

    /// Text content with line breaks around block elements.
    ///
    /// Text nodes that are only whitespace are dropped; `br` gives one
    /// newline, block elements one before and after, `p` two. Consecutive
    /// breaks collapse to the largest, and leading or trailing breaks are
    /// removed.
    #[must_use]
    pub fn text(&self) -> String {
        inner_text(self.document.tree(), self.id)
    }

    /// Descendants of this element matching `selector`, in document order.
    /// The element itself is never included, but combinators may match its
    /// ancestors.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if `selector` does not parse.
    pub fn select(&self, selector: &str) -> Result<Vec<Self>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.select_with(&list))
    }

    /// Like [`Element::select`] with an already parsed selector list.
    #[must_use]
    pub fn select_with(&self, list: &SelectorList) -> Vec<Self> {
        self.document
            .elements(select(self.document.tree(), self.id, list, false))
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for Element<'_> {}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<&str> = self
            .child_elements()
            .iter()
            .map(Element::name)
            .collect();
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("children", &children)
            .finish()
    }
}

#[derive(Serialize)]
struct ElementSnapshot<'a> {
    name: &'a str,
    attrs: Vec<(&'a str, &'a str)>,
    text: String,
    html: String,
}

impl Serialize for Element<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ElementSnapshot {
            name: self.name(),
            attrs: self.attrs(),
            text: self.text(),
            html: self.html(),
        }
        .serialize(serializer)
    }
}
