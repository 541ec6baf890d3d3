//! Property tests: parsing is total and serialization is stable.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sawzall::{Document, parse_document, parse_fragment};

/// Pieces of broken markup that exercise the tree construction recovery
/// paths when shuffled together.
const SOUP: &[&str] = &[
    "<p>",
    "</p>",
    "<div class=a>",
    "</div>",
    "<b>",
    "</b>",
    "<i>",
    "</i>",
    "<a href='/x'>",
    "</a>",
    "<table>",
    "</table>",
    "<tr>",
    "<td>",
    "</td>",
    "<caption>",
    "<colgroup><col>",
    "<select>",
    "<option>",
    "</select>",
    "<ul>",
    "<li>",
    "<dd>",
    "<h1>",
    "</h2>",
    "<form>",
    "</form>",
    "<template>",
    "</template>",
    "<frameset>",
    "<html lang=en>",
    "<head>",
    "<body id=b>",
    "</body>",
    "</html>",
    "<script>",
    "</script>",
    "<textarea>",
    "<plaintext>",
    "<svg/>",
    "<br/>",
    "</br>",
    "<img src=x>",
    "<!-- c -->",
    "<!--",
    "<!DOCTYPE html>",
    "<![CDATA[x]]>",
    "&amp;",
    "&notin",
    "&#x1F600;",
    "&#0;",
    "\r\n",
    "\0",
    "text",
    " ",
    "<",
    "</",
    "=\"",
];

/// A random concatenation of [`SOUP`] pieces.
#[derive(Debug, Clone)]
struct TagSoup(String);

impl Arbitrary for TagSoup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() + 1);
        let mut soup = String::new();
        for _ in 0..len {
            if let Some(piece) = g.choose(SOUP) {
                soup.push_str(piece);
            }
        }
        Self(soup)
    }
}

const ELEMENTS: &[&str] = &["div", "span", "section", "ul", "li", "b", "em", "pre"];
const WORDS: &[&str] = &["alpha", "beta gamma", "x & y", "1 < 2", "café", "  ", "\nword"];
const ATTRIBUTES: &[&str] = &["", " class=\"a b\"", " id=\"main\"", " title='say \"hi\"'"];

/// Well-formed markup over a small vocabulary.
#[derive(Debug, Clone)]
struct Markup(String);

impl Markup {
    fn build(g: &mut Gen, depth: usize, out: &mut String) {
        let count = usize::arbitrary(g) % 4;
        for _ in 0..count {
            if depth == 0 || bool::arbitrary(g) {
                out.push_str(g.choose(WORDS).copied().unwrap_or_default());
                continue;
            }
            let name = g.choose(ELEMENTS).copied().unwrap_or("div");
            let attributes = g.choose(ATTRIBUTES).copied().unwrap_or_default();
            out.push_str(&format!("<{name}{attributes}>"));
            Self::build(g, depth - 1, out);
            out.push_str(&format!("</{name}>"));
        }
    }
}

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut out = String::new();
        Self::build(g, 3, &mut out);
        Self(out)
    }
}

fn exercise(document: &Document) -> bool {
    let root = document.root_element();
    let _ = root.html();
    let _ = root.text();
    document
        .select("*")
        .is_ok_and(|all| all.iter().all(|e| !e.name().is_empty()))
}

#[quickcheck]
fn prop_parse_never_panics(input: String) -> bool {
    exercise(&parse_document(&input)) && exercise(&parse_fragment(&input))
}

#[quickcheck]
fn prop_tag_soup_never_panics(soup: TagSoup) -> bool {
    let input = soup.0;
    exercise(&parse_document(&input)) && exercise(&parse_fragment(&input))
}

#[quickcheck]
fn prop_fragment_root_is_html(input: String) -> bool {
    let document = parse_fragment(&input);
    let root = document.root_element();
    root.name() == "html"
        && root
            .child_elements()
            .iter()
            .all(|child| !matches!(child.name(), "head" | "body"))
}

#[quickcheck]
fn prop_document_has_head_and_body(soup: TagSoup) -> bool {
    let document = parse_document(&soup.0);
    let root = document.root_element();
    let children = root.child_elements();
    root.name() == "html"
        && children.first().is_some_and(|head| head.name() == "head")
        && children
            .iter()
            .any(|child| matches!(child.name(), "body" | "frameset"))
}

#[quickcheck]
fn prop_reparse_is_stable(markup: Markup) -> bool {
    let document = parse_fragment(&markup.0);
    let elements = document.select("*").unwrap_or_default();
    elements.iter().all(|element| {
        let reparsed = parse_fragment(&element.html());
        let again = if element.name() == "html" {
            Some(reparsed.root_element())
        } else {
            reparsed.root_element().child_elements().first().copied()
        };
        again.is_some_and(|again| {
            again.name() == element.name()
                && again.attrs() == element.attrs()
                && again.text() == element.text()
        })
    })
}
