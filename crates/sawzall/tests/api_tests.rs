//! Tests for the public `Document` / `Element` API.

use sawzall::{CaseSensitivity, Document, Element, SelectorErrorKind, SelectorList, parse_document, parse_fragment};

const SAMPLE_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Sample</title>
</head>
<body>
  <h1>Heading</h1>
  <p>This is an HTML document</p>
</body>
</html>
"#;

fn names(elements: &[Element<'_>]) -> Vec<String> {
    elements.iter().map(|e| e.name().to_string()).collect()
}

fn ids(elements: &[Element<'_>]) -> Vec<String> {
    elements
        .iter()
        .map(|e| e.id().unwrap_or_default().to_string())
        .collect()
}

fn first<'a>(document: &'a Document, selector: &str) -> Element<'a> {
    document.select(selector).unwrap()[0]
}

// Parsing

#[test]
fn test_document_select_paragraph() {
    let document = parse_document(SAMPLE_DOCUMENT);
    let paragraphs = document.select("p").unwrap();
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].name(), "p");
    assert_eq!(paragraphs[0].inner_html(), "This is an HTML document");
}

#[test]
fn test_document_root_is_html() {
    let document = parse_document(SAMPLE_DOCUMENT);
    let root = document.root_element();
    assert_eq!(root.name(), "html");
    assert_eq!(root.attr("lang"), Some("en"));
    assert_eq!(names(&root.child_elements()), ["head", "body"]);
}

#[test]
fn test_document_synthesizes_missing_structure() {
    let document = parse_document("Hello");
    assert_eq!(
        document.html(),
        "<html><head></head><body>Hello</body></html>"
    );
}

#[test]
fn test_fragment_root_has_no_head_or_body() {
    let document = parse_fragment("<h1>Heading</h1>");
    assert_eq!(document.root_element().name(), "html");
    assert_eq!(document.root_element().html(), "<html><h1>Heading</h1></html>");
}

#[test]
fn test_empty_inputs() {
    assert_eq!(parse_fragment("").html(), "<html></html>");
    assert_eq!(
        parse_document("").html(),
        "<html><head></head><body></body></html>"
    );
}

#[test]
fn test_parse_issues_are_exposed() {
    assert!(parse_document(SAMPLE_DOCUMENT).parse_issues().is_empty());
    let document = parse_document("<p>unclosed <b>bold</p>");
    assert!(!document.parse_issues().is_empty());
}

// Selection

#[test]
fn test_fragment_select_in_order() {
    let document = parse_fragment("<ul><li>One</li><li>Two</li></ul>");
    let items = document.select("ul li").unwrap();
    assert_eq!(names(&items), ["li", "li"]);
    let inner: Vec<String> = items.iter().map(Element::inner_html).collect();
    assert_eq!(inner, ["One", "Two"]);
}

#[test]
fn test_select_without_matches_is_empty() {
    let document = parse_document(SAMPLE_DOCUMENT);
    assert!(document.select("table").unwrap().is_empty());
}

#[test]
fn test_select_invalid_selector() {
    let document = parse_document(SAMPLE_DOCUMENT);
    let err = document.select("div[]").unwrap_err();
    assert!(
        err.to_string()
            .contains("failed to parse selector \"div[]\"")
    );
    assert_eq!(err.kind, SelectorErrorKind::ExpectedAttributeName(4));
}

#[test]
fn test_document_select_includes_root() {
    let document = parse_document(SAMPLE_DOCUMENT);
    assert_eq!(document.select("html").unwrap(), [document.root_element()]);
}

#[test]
fn test_element_select_excludes_itself() {
    let document = parse_fragment(r#"<div id="a"><div id="b"><div id="c"></div></div></div>"#);
    let outer = first(&document, "#a");
    assert_eq!(ids(&outer.select("div").unwrap()), ["b", "c"]);
    // Combinators may reach outside the element.
    let middle = first(&document, "#b");
    assert_eq!(ids(&middle.select("#a div").unwrap()), ["c"]);
}

#[test]
fn test_select_with_reuses_parsed_selector() {
    let document = parse_fragment("<p class=x>1</p><p>2</p><p class=x>3</p>");
    let list: SelectorList = "p.x".parse().unwrap();
    let texts: Vec<String> = document
        .select_with(&list)
        .iter()
        .map(Element::text)
        .collect();
    assert_eq!(texts, ["1", "3"]);
}

// Accessors

#[test]
fn test_attr() {
    let document = parse_fragment(r#"<h1 id="heading" DATA-Foo="bar">Title</h1>"#);
    let heading = first(&document, "h1");
    assert_eq!(heading.attr("id"), Some("heading"));
    assert_eq!(heading.attr("data-foo"), Some("bar"));
    assert_eq!(heading.attr("Data-FOO"), Some("bar"));
    assert_eq!(heading.attr("class"), None);
}

#[test]
fn test_attrs_sorted_by_name() {
    let document = parse_fragment("<h1 id='heading' class='big' data-foo='bar'>Title</h1>");
    assert_eq!(
        first(&document, "h1").attrs(),
        [("class", "big"), ("data-foo", "bar"), ("id", "heading")]
    );
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let document = parse_fragment("<a href='/one' HREF='/two'>x</a>");
    assert_eq!(first(&document, "a").attrs(), [("href", "/one")]);
}

#[test]
fn test_child_elements() {
    let document = parse_fragment(concat!(
        r#"<div id="parent">text<div id="child1"></div><!-- note -->"#,
        r#"<div id="child2"><div id="grand-child1"></div></div></div>"#,
    ));
    let parent = first(&document, "#parent");
    let children = parent.child_elements();
    assert_eq!(ids(&children), ["child1", "child2"]);
    assert_eq!(ids(&children[1].child_elements()), ["grand-child1"]);
    assert!(children[0].child_elements().is_empty());
}

#[test]
fn test_parent_element() {
    let document = parse_fragment("<ul><li>x</li></ul>");
    let li = first(&document, "li");
    let ul = li.parent_element().unwrap();
    assert_eq!(ul.name(), "ul");
    assert_eq!(ul.parent_element(), Some(document.root_element()));
    assert_eq!(document.root_element().parent_element(), None);
}

#[test]
fn test_classes() {
    let document = parse_fragment("<p class='  one\ttwo one '>x</p><p>y</p><p class=''>z</p>");
    let paragraphs = document.select("p").unwrap();
    assert_eq!(paragraphs[0].classes(), ["one", "two", "one"]);
    assert!(paragraphs[1].classes().is_empty());
    assert!(paragraphs[2].classes().is_empty());
}

#[test]
fn test_has_class() {
    let document = parse_fragment("<div class='one two Élément'></div>");
    let div = first(&document, "div");
    assert!(div.has_class("one", CaseSensitivity::CaseSensitive));
    assert!(!div.has_class("OnE", CaseSensitivity::CaseSensitive));
    assert!(div.has_class("OnE", CaseSensitivity::AsciiCaseInsensitive));
    assert!(!div.has_class("three", CaseSensitivity::CaseSensitive));
    assert!(!div.has_class("élément", CaseSensitivity::AsciiCaseInsensitive));
    assert!(!div.has_class("éLÉMENT", CaseSensitivity::AsciiCaseInsensitive));
    assert!(div.has_class("Élément", CaseSensitivity::default()));
}

#[test]
fn test_html_and_inner_html() {
    let document = parse_fragment(r#"<p class="a">x &amp; y<br>z<img src="i.png"></p>"#);
    let p = first(&document, "p");
    assert_eq!(p.html(), r#"<p class="a">x &amp; y<br>z<img src="i.png"></p>"#);
    assert_eq!(p.inner_html(), r#"x &amp; y<br>z<img src="i.png">"#);
    assert_eq!(first(&document, "br").inner_html(), "");
}

#[test]
fn test_text_fragment() {
    let document = parse_fragment("<h1>Hello, world</h1>\n<p>This is an HTML fragment</p>");
    assert_eq!(
        document.root_element().text(),
        "Hello, world\n\nThis is an HTML fragment"
    );
}

#[test]
fn test_text_line_breaks() {
    assert_eq!(parse_fragment("").root_element().text(), "");
    assert_eq!(
        parse_fragment("line one<br>line two").root_element().text(),
        "line one\nline two"
    );
    assert_eq!(
        parse_fragment("<h1>malformed input</br><ul>🙌").root_element().text(),
        "malformed input\n🙌"
    );
    assert_eq!(
        parse_fragment("<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>")
            .root_element()
            .text(),
        "One\nTwo"
    );
}

#[test]
fn test_text_of_inline_element() {
    let document = parse_fragment("<p>a <b>bold</b> move</p>");
    assert_eq!(first(&document, "b").text(), "bold");
    assert_eq!(first(&document, "p").text(), "a bold move");
}

#[test]
fn test_element_debug_lists_children() {
    let document = parse_fragment("<ul><li>1</li>text<li>2</li></ul>");
    let debug = format!("{:?}", first(&document, "ul"));
    assert_eq!(debug, r#"Element { name: "ul", children: ["li", "li"] }"#);
}

#[test]
fn test_element_serializes_to_json() {
    let document = parse_fragment("<a href='/x' class='c'>link</a>");
    let json = serde_json::to_value(first(&document, "a")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "a",
            "attrs": [["class", "c"], ["href", "/x"]],
            "text": "link",
            "html": "<a href=\"/x\" class=\"c\">link</a>",
        })
    );
}

#[test]
fn test_reparsing_html_preserves_element() {
    let document = parse_document(concat!(
        "<div id='main' class='a b'><p>One &amp; two<br>three</p>",
        "<ul><li title='x \"y\"'>item</li></ul><pre>\n  code</pre></div>",
    ));
    for element in document.select("body *").unwrap() {
        let reparsed = parse_fragment(&element.html());
        let again = reparsed.root_element().child_elements()[0];
        assert_eq!(again.name(), element.name());
        assert_eq!(again.attrs(), element.attrs());
        assert_eq!(again.text(), element.text());
    }
}

#[test]
fn test_reparsing_keeps_leading_newline_in_pre() {
    for name in ["pre", "textarea", "listing"] {
        let document = parse_fragment(&format!("<{name}>\n\nx</{name}>"));
        let element = first(&document, name);
        assert_eq!(element.inner_html(), "\nx");
        assert_eq!(element.html(), format!("<{name}>\n\nx</{name}>"));

        let reparsed = parse_fragment(&element.html());
        let again = first(&reparsed, name);
        assert_eq!(again.inner_html(), "\nx");
        assert_eq!(again.text(), element.text());
    }
}

#[test]
fn test_document_and_elements_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();
    assert_send_sync::<Element<'static>>();
}
