//! Plain-text extraction for [`Element::text`](crate::Element::text).
//!
//! Loosely follows the
//! [innerText getter](https://html.spec.whatwg.org/multipage/dom.html#the-innertext-idl-attribute)
//! without any CSS: block-level elements are recognised by name, and the
//! "required line break count" items are collapsed the same way.

use sawzall_dom::{DomTree, Edge, NodeId, NodeType};

/// Elements that start and end on their own line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// One piece of output before newline runs are collapsed.
#[derive(Debug, PartialEq, Eq)]
enum Item<'a> {
    Text(&'a str),
    /// "A required line break count is a non-negative integer"
    Newlines(usize),
}

/// Render the subtree rooted at `root` as plain text.
pub fn inner_text(tree: &DomTree, root: NodeId) -> String {
    let items = collect_items(tree, root);
    let mut out = String::new();
    let mut pending = 0;

    for item in items {
        match item {
            Item::Newlines(count) => pending = pending.max(count),
            Item::Text(text) => {
                // Runs at the very start are dropped; a run is only written
                // once something follows it.
                if !out.is_empty() {
                    out.extend(core::iter::repeat_n('\n', pending));
                }
                pending = 0;
                out.push_str(text);
            }
        }
    }
    out
}

fn collect_items(tree: &DomTree, root: NodeId) -> Vec<Item<'_>> {
    let mut items = Vec::new();
    for edge in tree.traverse(root) {
        match edge {
            Edge::Open(id) => match tree.get(id).map(|node| &node.node_type) {
                Some(NodeType::Text(text)) if !text.trim().is_empty() => {
                    items.push(Item::Text(text));
                }
                Some(NodeType::Element(data)) => {
                    if let Some(count) = open_line_breaks(&data.tag_name) {
                        items.push(Item::Newlines(count));
                    }
                }
                _ => {}
            },
            Edge::Close(id) => {
                if let Some(count) = tree.tag_name(id).and_then(close_line_breaks) {
                    items.push(Item::Newlines(count));
                }
            }
        }
    }
    items
}

fn open_line_breaks(tag_name: &str) -> Option<usize> {
    match tag_name {
        "br" => Some(1),
        other => close_line_breaks(other),
    }
}

fn close_line_breaks(tag_name: &str) -> Option<usize> {
    match tag_name {
        // "If node is a p element, then append 2 (a required line break
        // count) at the beginning and end of items."
        "p" => Some(2),
        name if BLOCK_ELEMENTS.contains(&name) => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sawzall_dom::ElementData;

    fn element(tree: &mut DomTree, parent: NodeId, name: &str) -> NodeId {
        let id = tree.alloc(NodeType::Element(ElementData::new(name, Vec::new())));
        tree.append_child(parent, id);
        id
    }

    fn text(tree: &mut DomTree, parent: NodeId, data: &str) {
        let id = tree.alloc(NodeType::Text(data.to_string()));
        tree.append_child(parent, id);
    }

    #[test]
    fn test_break_items() {
        assert_eq!(open_line_breaks("br"), Some(1));
        assert_eq!(close_line_breaks("br"), None);
        assert_eq!(open_line_breaks("p"), Some(2));
        assert_eq!(close_line_breaks("li"), Some(1));
        assert_eq!(open_line_breaks("span"), None);
    }

    #[test]
    fn test_newline_runs_collapse_to_largest() {
        // <div><div>a</div><p>b</p></div>
        let mut tree = DomTree::new();
        let outer = element(&mut tree, NodeId::ROOT, "div");
        let inner = element(&mut tree, outer, "div");
        text(&mut tree, inner, "a");
        let p = element(&mut tree, outer, "p");
        text(&mut tree, p, "b");
        assert_eq!(inner_text(&tree, outer), "a\n\nb");
    }

    #[test]
    fn test_whitespace_only_text_is_skipped() {
        let mut tree = DomTree::new();
        let ul = element(&mut tree, NodeId::ROOT, "ul");
        text(&mut tree, ul, "\n  ");
        let li = element(&mut tree, ul, "li");
        text(&mut tree, li, "One");
        text(&mut tree, ul, "\n");
        assert_eq!(inner_text(&tree, ul), "One");
    }

    #[test]
    fn test_inline_text_is_kept_verbatim() {
        let mut tree = DomTree::new();
        let span = element(&mut tree, NodeId::ROOT, "span");
        text(&mut tree, span, "  spaced  ");
        assert_eq!(inner_text(&tree, span), "  spaced  ");
    }
}
