//! Integration tests for the HTML parser.

use sawzall_dom::{DomTree, NodeId, NodeType};
use sawzall_html::{ParseIssueKind, inner_html, outer_html, parse_document, parse_fragment};

/// Helper to parse a document and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_document(html).0
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    tree.descendants(from)
        .find(|&id| tree.tag_name(id) == Some(tag))
}

/// Serialized children of the document's `body`.
fn body_html(html: &str) -> String {
    let tree = parse(html);
    let body = tree.body().expect("document has a body");
    inner_html(&tree, body)
}

/// Serialized children of a fragment's implied `html` root.
fn fragment_html(html: &str) -> String {
    let (tree, _) = parse_fragment(html);
    let root = tree.document_element().expect("fragment has a root");
    inner_html(&tree, root)
}

#[test]
fn test_document_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");

    let root = tree.get(NodeId::ROOT).expect("document node");
    assert!(matches!(root.node_type, NodeType::Document));

    let children = tree.children(NodeId::ROOT);
    assert_eq!(children.len(), 2);
    match &tree.get(children[0]).expect("doctype node").node_type {
        NodeType::Doctype(doctype) => assert_eq!(doctype.name, "html"),
        other => panic!("Expected doctype, got {other:?}"),
    }

    let html = tree.document_element().expect("html element");
    assert_eq!(tree.tag_name(html), Some("html"));
    let names: Vec<_> = tree
        .element_children(html)
        .filter_map(|id| tree.tag_name(id))
        .collect();
    assert_eq!(names, vec!["head", "body"]);
}

#[test]
fn test_empty_input_still_has_html_head_body() {
    let tree = parse("");
    assert_eq!(
        outer_html(&tree, NodeId::ROOT),
        "<html><head></head><body></body></html>"
    );
}

#[test]
fn test_head_elements_go_into_head() {
    let tree = parse("<title>T &amp; C</title><meta charset=utf-8><p>x");
    let head = find_element(&tree, NodeId::ROOT, "head").expect("head");
    assert_eq!(
        inner_html(&tree, head),
        "<title>T &amp; C</title><meta charset=\"utf-8\">"
    );
    assert_eq!(body_html("<title>T</title><p>x"), "<p>x</p>");
}

#[test]
fn test_comments_outside_html() {
    let tree = parse("<!--before--><html><body></body></html><!--after-->");
    let children = tree.children(NodeId::ROOT);
    assert!(matches!(
        &tree.get(children[0]).expect("comment").node_type,
        NodeType::Comment(data) if data == "before"
    ));
    let last = *children.last().expect("trailing comment");
    assert!(matches!(
        &tree.get(last).expect("comment").node_type,
        NodeType::Comment(data) if data == "after"
    ));
}

#[test]
fn test_text_after_body_end_goes_into_body() {
    assert_eq!(body_html("<p>a</p></body>b"), "<p>a</p>b");
}

#[test]
fn test_repeated_html_start_tag_merges_attributes() {
    let tree = parse("<html lang=en><body><html lang=fr class=x>");
    let html = tree.document_element().expect("html element");
    let data = tree.as_element(html).expect("element data");
    assert_eq!(data.get_attribute("lang"), Some("en"));
    assert_eq!(data.get_attribute("class"), Some("x"));
}

#[test]
fn test_block_closes_open_paragraph() {
    assert_eq!(body_html("<p>a<div>b</div>"), "<p>a</p><div>b</div>");
}

#[test]
fn test_stray_paragraph_end_tag_creates_empty_paragraph() {
    assert_eq!(body_html("</p>"), "<p></p>");
}

#[test]
fn test_list_items_close_each_other() {
    assert_eq!(
        body_html("<ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        body_html("<dl><dt>a<dd>b<dt>c</dl>"),
        "<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"
    );
}

#[test]
fn test_deeply_nested_lists_keep_their_depth() {
    let depth = 1_000;
    let source = "<ul><li>x".repeat(depth);
    let (tree, _) = parse_fragment(&source);

    let items = tree
        .descendants(NodeId::ROOT)
        .filter(|&id| tree.tag_name(id) == Some("li"))
        .collect::<Vec<_>>();
    assert_eq!(items.len(), depth);
    let deepest = items[depth - 1];
    // Every ul, every enclosing li, the html root and the Document.
    assert_eq!(tree.ancestors(deepest).count(), 2 * depth + 1);

    let expected = format!("{}{}", "<ul><li>x".repeat(depth), "</li></ul>".repeat(depth));
    assert_eq!(fragment_html(&source), expected);
}

#[test]
fn test_nested_headings_are_not_allowed() {
    assert_eq!(body_html("<h1><h2>x</h2></h1>"), "<h1></h1><h2>x</h2>");
}

#[test]
fn test_br_end_tag_and_image_alias() {
    assert_eq!(body_html("</br><image src=a>"), "<br><img src=\"a\">");
}

#[test]
fn test_nested_form_is_ignored() {
    assert_eq!(
        body_html("<form><form><input></form>"),
        "<form><input></form>"
    );
}

#[test]
fn test_adoption_agency_misnested_formatting() {
    assert_eq!(
        body_html("<p>1<b>2<i>3</b>4</i>5</p>"),
        "<p>1<b>2<i>3</i></b><i>4</i>5</p>"
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_eq!(
        body_html("<b>1<p>2</b>3</p>"),
        "<b>1</b><p><b>2</b>3</p>"
    );
    assert_eq!(
        body_html("<a>1<p>2</a>3</p>"),
        "<a>1</a><p><a>2</a>3</p>"
    );
}

#[test]
fn test_formatting_reconstructed_after_block() {
    assert_eq!(
        body_html("<i>a<div>b</div>c"),
        "<i>a<div>b</div>c</i>"
    );
    assert_eq!(body_html("<p><em>a</p><p>b"), "<p><em>a</em></p><p><em>b</em></p>");
}

#[test]
fn test_nested_anchor_closes_outer() {
    assert_eq!(body_html("<a href=1>x<a href=2>y"), "<a href=\"1\">x</a><a href=\"2\">y</a>");
}

#[test]
fn test_table_gets_implied_tbody() {
    assert_eq!(
        body_html("<table><tr><td>1</td></tr></table>"),
        "<table><tbody><tr><td>1</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_cells_and_rows_close_implicitly() {
    assert_eq!(
        body_html("<table><tr><td>a<td>b<tr><td>c</table>"),
        "<table><tbody><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></tbody></table>"
    );
}

#[test]
fn test_caption_and_colgroup() {
    assert_eq!(
        body_html("<table><caption>cap<col><tr><td>x</table>"),
        "<table><caption>cap</caption><colgroup><col></colgroup><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_foster_parenting_text() {
    assert_eq!(
        body_html("<table>foo<tr><td>bar</td></tr></table>"),
        "foo<table><tbody><tr><td>bar</td></tr></tbody></table>"
    );
}

#[test]
fn test_foster_parenting_element() {
    assert_eq!(
        body_html("<table><div>x</div><tr><td>y</table>"),
        "<div>x</div><table><tbody><tr><td>y</td></tr></tbody></table>"
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_eq!(
        body_html("<table> <tr><td>x</td></tr> </table>"),
        "<table> <tbody><tr><td>x</td></tr> </tbody></table>"
    );
}

#[test]
fn test_nested_table_start_closes_outer_table() {
    assert_eq!(
        body_html("<table><table></table>"),
        "<table></table><table></table>"
    );
}

#[test]
fn test_quirks_mode_keeps_table_inside_paragraph() {
    assert_eq!(body_html("<p><table></table>"), "<p><table></table></p>");
    assert_eq!(
        body_html("<!DOCTYPE html><p><table></table>"),
        "<p></p><table></table>"
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        body_html("<select><option>a<option>b<optgroup><option>c</select>"),
        "<select><option>a</option><option>b</option><optgroup><option>c</option></optgroup></select>"
    );
}

#[test]
fn test_select_in_table_closed_by_cell() {
    assert_eq!(
        body_html("<table><tr><td><select><option>a<td>b</table>"),
        "<table><tbody><tr><td><select><option>a</option></select></td><td>b</td></tr></tbody></table>"
    );
}

#[test]
fn test_template_contents_are_children() {
    let tree = parse("<template><td>x</td></template>");
    let head = find_element(&tree, NodeId::ROOT, "head").expect("head");
    assert_eq!(
        inner_html(&tree, head),
        "<template><td>x</td></template>"
    );
}

#[test]
fn test_frameset_document() {
    let tree = parse("<frameset><frame></frameset>");
    assert_eq!(
        outer_html(&tree, NodeId::ROOT),
        "<html><head></head><frameset><frame></frameset></html>"
    );
}

#[test]
fn test_raw_text_elements() {
    assert_eq!(
        body_html("<textarea>\n<b>x</b></textarea>"),
        "<textarea>&lt;b&gt;x&lt;/b&gt;</textarea>"
    );
    let tree = parse("<script>if (a < b) {}</script>");
    let head = find_element(&tree, NodeId::ROOT, "head").expect("head");
    assert_eq!(
        inner_html(&tree, head),
        "<script>if (a < b) {}</script>"
    );
}

#[test]
fn test_foreign_content_parsed_as_html() {
    assert_eq!(
        body_html("<svg viewBox='0 0 1 1'><circle/></svg><p>x"),
        "<svg viewbox=\"0 0 1 1\"><circle></circle></svg><p>x</p>"
    );
}

#[test]
fn test_fragment_has_no_head_or_body() {
    assert_eq!(fragment_html("<h1>Heading</h1>"), "<h1>Heading</h1>");
    let (tree, _) = parse_fragment("<h1>Heading</h1>");
    let root = tree.document_element().expect("root");
    assert_eq!(outer_html(&tree, root), "<html><h1>Heading</h1></html>");
}

#[test]
fn test_fragment_ignores_document_level_tags() {
    assert_eq!(fragment_html("<html><head><body><p>x"), "<p>x</p>");
}

#[test]
fn test_fragment_ignores_stray_cell() {
    assert_eq!(fragment_html("<td>x</td>"), "x");
}

#[test]
fn test_fragment_empty_input() {
    assert_eq!(fragment_html(""), "");
}

#[test]
fn test_parse_issues_are_recorded() {
    let (_, issues) = parse_document("<!DOCTYPE html><p id=a id=b></span>");
    assert!(
        issues
            .iter()
            .any(|issue| issue.kind == ParseIssueKind::Tokenizer)
    );
    assert!(
        issues
            .iter()
            .any(|issue| issue.kind == ParseIssueKind::TreeBuilder)
    );
    // Tokenizer issues are listed before tree builder issues.
    let first_builder = issues
        .iter()
        .position(|issue| issue.kind == ParseIssueKind::TreeBuilder)
        .expect("tree builder issue");
    assert!(
        issues[first_builder..]
            .iter()
            .all(|issue| issue.kind == ParseIssueKind::TreeBuilder)
    );
}

#[test]
fn test_well_formed_document_has_no_tree_builder_issues() {
    let (_, issues) = parse_document(
        "<!DOCTYPE html><html><head><title>x</title></head><body><p>y</p></body></html>",
    );
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}
