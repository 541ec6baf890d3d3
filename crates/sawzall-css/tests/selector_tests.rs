//! Integration tests for CSS selector parsing and matching.

use sawzall_css::{
    AttributeOperator, AttributeSelector, Combinator, PseudoClass, SelectorErrorKind,
    SelectorList, SimpleSelector, parse_selector, select,
};
use sawzall_dom::{DomTree, NodeId};
use sawzall_html::parse_fragment;

/// Parse `html` as a fragment, run `selector` over the whole tree and
/// return the `id` attribute of every match.
fn ids(html: &str, selector: &str) -> Vec<String> {
    let (tree, _) = parse_fragment(html);
    let list = parse_selector(selector).unwrap();
    select(&tree, NodeId::ROOT, &list, false)
        .into_iter()
        .map(|id| id_of(&tree, id))
        .collect()
}

fn id_of(tree: &DomTree, id: NodeId) -> String {
    tree.as_element(id)
        .and_then(|e| e.id())
        .unwrap_or_default()
        .to_string()
}

fn subject(list: &SelectorList) -> &[SimpleSelector] {
    &list.selectors[0].subject.simple_selectors
}

// Parsing

#[test]
fn test_parse_type_selector_is_lowercased() {
    let list = parse_selector("BODY").unwrap();
    assert_eq!(list.selectors.len(), 1);
    assert!(list.selectors[0].combinators.is_empty());
    assert_eq!(subject(&list), [SimpleSelector::Type("body".to_string())]);
}

#[test]
fn test_parse_compound_selector() {
    let list = parse_selector("div.highlight#Main").unwrap();
    assert_eq!(
        subject(&list),
        [
            SimpleSelector::Type("div".to_string()),
            SimpleSelector::Class("highlight".to_string()),
            SimpleSelector::Id("Main".to_string()),
        ]
    );
}

#[test]
fn test_parse_universal_selector() {
    let list = parse_selector("*.a").unwrap();
    assert_eq!(
        subject(&list),
        [
            SimpleSelector::Universal,
            SimpleSelector::Class("a".to_string())
        ]
    );
}

#[test]
fn test_parse_combinators() {
    let list = parse_selector("a b>c+d ~ e").unwrap();
    let combinators: Vec<Combinator> = list.selectors[0]
        .combinators
        .iter()
        .map(|(combinator, _)| *combinator)
        .collect();
    assert_eq!(
        combinators,
        [
            Combinator::SubsequentSibling,
            Combinator::NextSibling,
            Combinator::Child,
            Combinator::Descendant,
        ]
    );
}

#[test]
fn test_parse_selector_list() {
    let list = parse_selector(" h1 , h2,h3 ").unwrap();
    assert_eq!(list.selectors.len(), 3);
}

#[test]
fn test_parse_attribute_selectors() {
    let list = parse_selector(r#"[HREF][type=text][lang|="en"][class~='a'][src$=".png" i]"#).unwrap();
    assert_eq!(
        subject(&list),
        [
            SimpleSelector::Attribute(AttributeSelector {
                name: "href".to_string(),
                operator: AttributeOperator::Exists,
                case_insensitive: false,
            }),
            SimpleSelector::Attribute(AttributeSelector {
                name: "type".to_string(),
                operator: AttributeOperator::Equals("text".to_string()),
                case_insensitive: false,
            }),
            SimpleSelector::Attribute(AttributeSelector {
                name: "lang".to_string(),
                operator: AttributeOperator::DashMatch("en".to_string()),
                case_insensitive: false,
            }),
            SimpleSelector::Attribute(AttributeSelector {
                name: "class".to_string(),
                operator: AttributeOperator::Includes("a".to_string()),
                case_insensitive: false,
            }),
            SimpleSelector::Attribute(AttributeSelector {
                name: "src".to_string(),
                operator: AttributeOperator::SuffixMatch(".png".to_string()),
                case_insensitive: true,
            }),
        ]
    );
}

#[test]
fn test_parse_pseudo_classes() {
    let list = parse_selector("li:First-Child:not(.a, #b)").unwrap();
    assert!(matches!(
        subject(&list)[1],
        SimpleSelector::PseudoClass(PseudoClass::FirstChild)
    ));
    assert!(matches!(&subject(&list)[2], SimpleSelector::Not(inner) if inner.len() == 2));
}

#[test]
fn test_selector_list_from_str() {
    let list: SelectorList = "ul > li".parse().unwrap();
    assert_eq!(list.selectors[0].combinators.len(), 1);
}

// Errors

#[test]
fn test_error_message_names_selector() {
    let err = parse_selector("div[]").unwrap_err();
    assert_eq!(err.selector, "div[]");
    assert_eq!(err.kind, SelectorErrorKind::ExpectedAttributeName(4));
    let message = err.to_string();
    assert!(message.starts_with("failed to parse selector \"div[]\"\n"));
}

#[test]
fn test_invalid_selectors() {
    let cases: &[(&str, SelectorErrorKind)] = &[
        ("", SelectorErrorKind::Empty),
        ("   ", SelectorErrorKind::Empty),
        ("a,,b", SelectorErrorKind::EmptyListEntry(2)),
        (",a", SelectorErrorKind::EmptyListEntry(0)),
        ("a,", SelectorErrorKind::EmptyListEntry(2)),
        ("> a", SelectorErrorKind::LeadingCombinator('>', 0)),
        ("a >", SelectorErrorKind::TrailingCombinator('>', 2)),
        ("a > > b", SelectorErrorKind::TrailingCombinator('>', 2)),
        ("#", SelectorErrorKind::ExpectedName('#', 0)),
        ("a.", SelectorErrorKind::ExpectedName('.', 1)),
        ("[a=]", SelectorErrorKind::ExpectedAttributeValue(3)),
        ("[a", SelectorErrorKind::UnexpectedEnd("']'")),
        ("[a='x", SelectorErrorKind::UnterminatedString(3)),
        ("a:hover", SelectorErrorKind::UnknownPseudoClass("hover".to_string())),
        (
            "li:nth-child(2)",
            SelectorErrorKind::UnknownPseudoClass("nth-child()".to_string()),
        ),
        ("p::before", SelectorErrorKind::PseudoElement("before".to_string())),
        (":not()", SelectorErrorKind::EmptyNegation),
        ("a{", SelectorErrorKind::UnexpectedCharacter('{', 1)),
        ("a|b", SelectorErrorKind::UnexpectedCharacter('|', 1)),
    ];
    for (selector, expected) in cases {
        let err = parse_selector(selector).unwrap_err();
        assert_eq!(&err.kind, expected, "selector {selector:?}");
    }
}

// Matching

#[test]
fn test_type_class_and_id_matching() {
    let html = r#"<div id="a" class="x y"></div><p id="b" class="x"></p><div id="c"></div>"#;
    assert_eq!(ids(html, "div"), ["a", "c"]);
    assert_eq!(ids(html, ".x"), ["a", "b"]);
    assert_eq!(ids(html, ".x.y"), ["a"]);
    assert_eq!(ids(html, "#b"), ["b"]);
    assert_eq!(ids(html, "DIV"), ["a", "c"]);
}

#[test]
fn test_class_and_id_are_case_sensitive() {
    let html = r#"<p id="Main" class="Big"></p>"#;
    assert!(ids(html, "#main").is_empty());
    assert!(ids(html, ".big").is_empty());
    assert_eq!(ids(html, ".Big"), ["Main"]);
}

#[test]
fn test_descendant_and_child() {
    let html = r#"<div id="outer"><section id="s"><p id="p1"></p></section><p id="p2"></p></div>"#;
    assert_eq!(ids(html, "div p"), ["p1", "p2"]);
    assert_eq!(ids(html, "div > p"), ["p2"]);
    assert_eq!(ids(html, "section > p"), ["p1"]);
}

#[test]
fn test_descendant_backtracking() {
    // The nearest `em` ancestor of the span is not a child of the div, but
    // the outer one is.
    let html = r#"<div><em id="e1"><b><em id="e2"><span id="target"></span></em></b></em></div>"#;
    assert_eq!(ids(html, "div > em span"), ["target"]);
}

#[test]
fn test_sibling_combinators() {
    let html = r#"<h1 id="h"></h1>text<p id="a"></p><!--c--><p id="b"></p><div id="d"></div><p id="e"></p>"#;
    assert_eq!(ids(html, "h1 + p"), ["a"]);
    assert_eq!(ids(html, "p + p"), ["b"]);
    assert_eq!(ids(html, "h1 ~ p"), ["a", "b", "e"]);
    assert_eq!(ids(html, "div ~ p"), ["e"]);
}

#[test]
fn test_selector_list_results_are_deduplicated_in_document_order() {
    let html = r#"<p id="one" class="a"></p><div id="two" class="a"></div>"#;
    assert_eq!(ids(html, "div, .a, p"), ["one", "two"]);
}

#[test]
fn test_attribute_operators() {
    let html = concat!(
        r#"<a id="1" href="https://example.com/x.PNG" lang="en-US" class="btn primary"></a>"#,
        r#"<a id="2" href="/local" lang="en"></a>"#,
        r#"<a id="3"></a>"#,
    );
    assert_eq!(ids(html, "[href]"), ["1", "2"]);
    assert_eq!(ids(html, "[href='/local']"), ["2"]);
    assert_eq!(ids(html, "[lang|=en]"), ["1", "2"]);
    assert_eq!(ids(html, "[class~=primary]"), ["1"]);
    assert_eq!(ids(html, "[href^=https]"), ["1"]);
    assert_eq!(ids(html, "[href$='.png']"), Vec::<String>::new());
    assert_eq!(ids(html, "[href$='.png' i]"), ["1"]);
    assert_eq!(ids(html, "[href*=example]"), ["1"]);
    assert!(ids(html, "[href^='']").is_empty());
}

#[test]
fn test_structural_pseudo_classes() {
    let html = r#"<ul id="list"><li id="a"></li><li id="b">x</li><li id="c"> </li></ul><p id="solo"></p>"#;
    assert_eq!(ids(html, "li:first-child"), ["a"]);
    assert_eq!(ids(html, "li:last-child"), ["c"]);
    assert_eq!(ids(html, "li:empty"), ["a", "c"]);
    assert_eq!(ids(html, "p:only-of-type"), ["solo"]);
    assert_eq!(ids(html, "li:not(:first-child):not(#c)"), ["b"]);
    assert!(ids(html, "li:only-child").is_empty());
}

#[test]
fn test_root_pseudo_class() {
    let (tree, _) = parse_fragment("<p></p>");
    let list = parse_selector(":root").unwrap();
    let root = tree.document_element().unwrap();
    assert_eq!(select(&tree, NodeId::ROOT, &list, false), vec![root]);
}

#[test]
fn test_form_pseudo_classes() {
    let html = concat!(
        r#"<input id="c1" type="checkbox" checked>"#,
        r#"<input id="c2" type="text" checked>"#,
        r#"<input id="d" disabled>"#,
        r#"<a id="l" href="/">x</a><a id="n">y</a>"#,
    );
    assert_eq!(ids(html, ":checked"), ["c1"]);
    assert_eq!(ids(html, ":disabled"), ["d"]);
    assert_eq!(ids(html, "input:enabled"), ["c1", "c2"]);
    assert_eq!(ids(html, ":link"), ["l"]);
    assert_eq!(ids(html, "a:any-link"), ["l"]);
}

#[test]
fn test_escaped_id_selector() {
    assert_eq!(ids(r#"<p id="10"></p>"#, r"#\31 0"), ["10"]);
}

#[test]
fn test_scope_exclusion_and_outside_combinators() {
    let (tree, _) = parse_fragment(r#"<div id="d"><section id="s"><p id="p"></p></section></div>"#);
    let section = tree
        .descendants(NodeId::ROOT)
        .find(|&id| tree.tag_name(id) == Some("section"))
        .unwrap();

    // `div p` matches through an ancestor outside the scope.
    let list = parse_selector("div p").unwrap();
    let found: Vec<String> = select(&tree, section, &list, false)
        .into_iter()
        .map(|id| id_of(&tree, id))
        .collect();
    assert_eq!(found, ["p"]);

    // The scope element itself is excluded.
    let list = parse_selector("section").unwrap();
    assert!(select(&tree, section, &list, false).is_empty());
}
