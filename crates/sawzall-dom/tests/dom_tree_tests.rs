//! Tests for the arena tree: mutation, sibling links and traversal.

use sawzall_dom::{DomTree, Edge, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag, Vec::new())))
}

fn alloc_text(tree: &mut DomTree, text: &str) -> NodeId {
    tree.alloc(NodeType::Text(text.to_string()))
}

// ========== element data ==========

#[test]
fn test_element_data_lowercases_names() {
    let data = ElementData::new(
        "DIV",
        vec![("ID".to_string(), "Main".to_string())],
    );
    assert_eq!(data.tag_name, "div");
    assert_eq!(data.attrs, vec![("id".to_string(), "Main".to_string())]);
    assert_eq!(data.id(), Some("Main"));
}

#[test]
fn test_set_attribute_keeps_first_value() {
    let mut data = ElementData::new("p", Vec::new());
    assert!(data.set_attribute("class", "a"));
    assert!(!data.set_attribute("CLASS", "b"));
    assert_eq!(data.get_attribute("Class"), Some("a"));
    assert_eq!(data.attrs.len(), 1);
}

#[test]
fn test_new_drops_duplicate_attributes() {
    let data = ElementData::new(
        "a",
        vec![
            ("href".to_string(), "/one".to_string()),
            ("HREF".to_string(), "/two".to_string()),
            ("title".to_string(), "t".to_string()),
        ],
    );
    assert_eq!(data.attrs.len(), 2);
    assert_eq!(data.get_attribute("href"), Some("/one"));
    assert!(data.has_attribute("TITLE"));
}

#[test]
fn test_classes_split_on_ascii_whitespace() {
    let data = ElementData::new(
        "p",
        vec![("class".to_string(), " one\ttwo\n one  ".to_string())],
    );
    assert_eq!(data.classes(), vec!["one", "two", "one"]);

    let bare = ElementData::new("p", Vec::new());
    assert!(bare.classes().is_empty());
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);
    tree.remove_child(parent, child);

    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_of_wrong_parent_is_noop() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    let span = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, div);
    tree.append_child(NodeId::ROOT, span);

    tree.remove_child(div, span);

    assert_eq!(tree.children(NodeId::ROOT), &[div, span]);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_moves_attached_node() {
    let mut tree = DomTree::new();
    let table = alloc_element(&mut tree, "table");
    let text = alloc_text(&mut tree, "stray");
    tree.append_child(NodeId::ROOT, table);
    tree.append_child(table, text);

    tree.insert_before(NodeId::ROOT, text, table);

    assert_eq!(tree.children(NodeId::ROOT), &[text, table]);
    assert!(tree.children(table).is_empty());
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let from = alloc_element(&mut tree, "div");
    let to = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let existing = alloc_element(&mut tree, "x");
    tree.append_child(to, existing);
    let moved = alloc_element(&mut tree, "y");
    let moved_too = alloc_element(&mut tree, "z");
    tree.append_child(from, moved);
    tree.append_child(from, moved_too);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, moved, moved_too]);
    assert_eq!(tree.next_sibling(existing), Some(moved));
    assert_eq!(tree.prev_sibling(moved), Some(existing));
    assert_eq!(tree.parent(moved_too), Some(to));
}

// ========== traversal ==========

/// Builds `<html><body><p>hi</p><ul><li/></ul></body></html>`.
fn sample_tree() -> (DomTree, [NodeId; 6]) {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    let text = alloc_text(&mut tree, "hi");
    let ul = alloc_element(&mut tree, "ul");
    let li = alloc_element(&mut tree, "li");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, p);
    tree.append_child(p, text);
    tree.append_child(body, ul);
    tree.append_child(ul, li);
    (tree, [html, body, p, text, ul, li])
}

#[test]
fn test_traverse_emits_balanced_edges() {
    let (tree, [_, body, p, text, ul, li]) = sample_tree();

    let edges: Vec<Edge> = tree.traverse(body).collect();
    assert_eq!(
        edges,
        vec![
            Edge::Open(body),
            Edge::Open(p),
            Edge::Open(text),
            Edge::Close(text),
            Edge::Close(p),
            Edge::Open(ul),
            Edge::Open(li),
            Edge::Close(li),
            Edge::Close(ul),
            Edge::Close(body),
        ]
    );
}

#[test]
fn test_traverse_does_not_leave_subtree() {
    let (tree, [_, _, p, text, _, _]) = sample_tree();
    let edges: Vec<Edge> = tree.traverse(p).collect();
    assert_eq!(
        edges,
        vec![Edge::Open(p), Edge::Open(text), Edge::Close(text), Edge::Close(p)]
    );
}

#[test]
fn test_descendants_in_tree_order() {
    let (tree, [html, body, p, text, ul, li]) = sample_tree();
    let all: Vec<NodeId> = tree.descendants(html).collect();
    assert_eq!(all, vec![body, p, text, ul, li]);
}

#[test]
fn test_ancestors_and_siblings() {
    let (tree, [html, body, p, _, ul, li]) = sample_tree();

    let ancestors: Vec<NodeId> = tree.ancestors(li).collect();
    assert_eq!(ancestors, vec![ul, body, html, NodeId::ROOT]);
    assert!(tree.is_descendant_of(li, html));
    assert!(!tree.is_descendant_of(html, li));

    assert_eq!(tree.preceding_siblings(ul).collect::<Vec<_>>(), vec![p]);
    assert_eq!(tree.following_siblings(p).collect::<Vec<_>>(), vec![ul]);
}

#[test]
fn test_document_element_and_body() {
    let (tree, [html, body, p, _, ul, _]) = sample_tree();
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.element_children(body).collect::<Vec<_>>(), vec![p, ul]);
}
