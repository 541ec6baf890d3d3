//! HTML fragment serialization.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Every element is in the HTML namespace, so the algorithm never needs the
//! foreign-element branches.

use sawzall_dom::{DomTree, Edge, NodeId, NodeType};

/// Elements serialized without an end tag.
///
/// "If current node is an area, base, basefont, bgsound, br, col, embed,
/// frame, hr, img, input, keygen, link, meta, param, source, track or wbr
/// element, then continue on to the next child node at this point."
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Parents whose text children are written out literally.
///
/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element ... then append the value of current
/// node's data IDL attribute literally."
const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Returns true if `tag_name` is a void element.
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

/// Serialize `id` including its own start and end tag (`outerHTML`).
///
/// For the Document node this is the same as [`inner_html`].
#[must_use]
pub fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for edge in tree.traverse(id) {
        write_edge(tree, edge, &mut out);
    }
    out
}

/// Serialize the children of `id` (`innerHTML`).
///
/// "If the node serializes as void, return the empty string."
#[must_use]
pub fn inner_html(tree: &DomTree, id: NodeId) -> String {
    if tree.tag_name(id).is_some_and(is_void_element) {
        return String::new();
    }
    let mut out = String::new();
    for &child in tree.children(id) {
        for edge in tree.traverse(child) {
            write_edge(tree, edge, &mut out);
        }
    }
    out
}

fn write_edge(tree: &DomTree, edge: Edge, out: &mut String) {
    match edge {
        Edge::Open(id) => write_open(tree, id, out),
        Edge::Close(id) => {
            // "Append a U+003C LESS-THAN SIGN character (<), a U+002F SOLIDUS
            // character (/), tagname, and a U+003E GREATER-THAN SIGN
            // character (>)."
            if let Some(name) = tree.tag_name(id)
                && !is_void_element(name)
            {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn write_open(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {}

        // "If current node is an Element"
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            // "For each attribute that the element has, append a U+0020
            // SPACE character, the attribute's serialized name, a U+003D
            // EQUALS SIGN character (=), a U+0022 QUOTATION MARK character
            // ("), the attribute's value, escaped as described below in
            // attribute mode, and a second U+0022 QUOTATION MARK character."
            for (name, value) in &data.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');
            // The tree builder drops a newline right after these start tags,
            // so a leading newline in the content needs a second one.
            if matches!(data.tag_name.as_str(), "pre" | "textarea" | "listing")
                && tree
                    .first_child(id)
                    .and_then(|child| tree.as_text(child))
                    .is_some_and(|text| text.starts_with('\n'))
            {
                out.push('\n');
            }
        }

        // "If current node is a Text node"
        NodeType::Text(text) => {
            let raw = tree
                .parent(id)
                .and_then(|parent| tree.tag_name(parent))
                .is_some_and(|name| RAW_TEXT_PARENTS.contains(&name));
            if raw {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }

        // "If current node is a Comment"
        // "Append "<!--", the value of current node's data IDL attribute,
        // and "-->"."
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }

        // "If current node is a DocumentType"
        // "Append "<!DOCTYPE", a U+0020 SPACE, the value of current node's
        // name IDL attribute, and a U+003E GREATER-THAN SIGN character (>)."
        NodeType::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(&doctype.name);
            out.push('>');
        }
    }
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Replace any occurrence of the "&" character by the string "&amp;"."
/// "Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the
/// string "&nbsp;"."
/// "If the algorithm was invoked in the attribute mode, then replace any
/// occurrences of the """ character by the string "&quot;"."
/// "If the algorithm was not invoked in the attribute mode, then replace any
/// occurrences of the "<" character by the string "&lt;", and any
/// occurrences of the ">" character by the string "&gt;"."
fn escape_into(text: &str, attribute_mode: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_and_attribute_modes() {
        let mut text = String::new();
        escape_into("a < b & \"c\" > d\u{a0}", false, &mut text);
        assert_eq!(text, "a &lt; b &amp; \"c\" &gt; d&nbsp;");

        let mut attr = String::new();
        escape_into("a < b & \"c\"", true, &mut attr);
        assert_eq!(attr, "a < b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_leading_newline_is_doubled_in_pre_like_elements() {
        for name in ["pre", "textarea", "listing"] {
            let source = format!("<{name}>\n\nx</{name}>");
            let (tree, _) = crate::parse_fragment(&source);
            let root = tree.document_element().expect("fragment has a root");
            assert_eq!(inner_html(&tree, root), source);
        }

        let (tree, _) = crate::parse_fragment("<pre>x\n</pre><div>\nx</div>");
        let root = tree.document_element().expect("fragment has a root");
        assert_eq!(inner_html(&tree, root), "<pre>x\n</pre><div>\nx</div>");
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("keygen"));
        assert!(!is_void_element("p"));
    }
}
