//! Parsed documents.

use sawzall_css::{SelectorError, SelectorList, select};
use sawzall_dom::{DomTree, ElementData, NodeId, NodeType};
use sawzall_html::ParseIssue;

use crate::Element;

/// A parsed HTML document or fragment.
///
/// Owns the whole node arena and the parse issues recorded while building it.
/// Immutable once constructed; [`Element`]s borrow from it.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    root: NodeId,
    issues: Vec<ParseIssue>,
}

impl Document {
    /// Parse a complete HTML document. Never fails.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let (tree, issues) = sawzall_html::parse_document(html);
        Self::from_parts(tree, issues)
    }

    /// Parse an HTML fragment in a `body` context. Never fails.
    ///
    /// The root element is an `html` element whose children are the
    /// fragment's top-level nodes.
    #[must_use]
    pub fn parse_fragment(html: &str) -> Self {
        let (tree, issues) = sawzall_html::parse_fragment(html);
        Self::from_parts(tree, issues)
    }

    /// Wrap an already built tree.
    ///
    /// A tree without a document element gets an empty `html` element so
    /// that [`Document::root_element`] always has something to return.
    #[must_use]
    pub fn from_parts(mut tree: DomTree, issues: Vec<ParseIssue>) -> Self {
        let root = match tree.document_element() {
            Some(root) => root,
            None => {
                let html = tree.alloc(NodeType::Element(ElementData::new("html", Vec::new())));
                tree.append_child(NodeId::ROOT, html);
                html
            }
        };
        Self { tree, root, issues }
    }

    /// The root element, `html` for anything produced by the parser.
    #[must_use]
    pub fn root_element(&self) -> Element<'_> {
        Element::new(self, self.root)
    }

    /// Every element matching `selector`, in document order. The root
    /// element itself is a candidate.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if `selector` does not parse.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok(self.select_with(&list))
    }

    /// Like [`Document::select`] with an already parsed selector list.
    #[must_use]
    pub fn select_with(&self, list: &SelectorList) -> Vec<Element<'_>> {
        self.elements(select(&self.tree, self.root, list, true))
    }

    /// Serialization of the root element.
    #[must_use]
    pub fn html(&self) -> String {
        self.root_element().html()
    }

    /// Parse errors recorded while building the tree, tokenizer issues first.
    #[must_use]
    pub fn parse_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The underlying node arena.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Wrap node ids as elements, dropping anything that is not an element.
    pub(crate) fn elements(&self, ids: impl IntoIterator<Item = NodeId>) -> Vec<Element<'_>> {
        ids.into_iter()
            .filter_map(|id| self.element(id))
            .collect()
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<Element<'_>> {
        self.tree
            .as_element(id)
            .map(|_| Element::new(self, id))
    }
}
