//! Integration tests for the HTML tokenizer.

use sawzall_html::tokenizer::{Attribute, Doctype, Tag};
use sawzall_html::{HTMLTokenizer, ParseIssueKind, Token};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::tokenize(input)
}

/// Helper to collapse character tokens into one string
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character(c) => Some(*c),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert_eq!(tokens[0], Token::Character('H'));
    assert_eq!(tokens[4], Token::Character('o'));
    assert!(tokens[5].is_eof());
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_tokenizer_is_lazy_and_fused() {
    let mut tokenizer = HTMLTokenizer::new("<p>");
    assert!(matches!(tokenizer.next(), Some(Token::StartTag(tag)) if tag.name == "p"));
    assert_eq!(tokenizer.next(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype(Doctype {
            name, force_quirks, ..
        }) => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_public_and_system_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype(doctype) => {
            assert_eq!(doctype.name.as_deref(), Some("html"));
            assert_eq!(
                doctype.public_identifier.as_deref(),
                Some("-//W3C//DTD HTML 4.01//EN")
            );
            assert_eq!(
                doctype.system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!doctype.force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype(doctype) => {
            assert_eq!(doctype.name, None);
            assert!(doctype.force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens, vec![Token::StartTag(Tag::new("div")), Token::EndOfFile]);
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert!(matches!(tokens[0], Token::EndTag(_)));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(tag.name, "br");
            assert!(tag.self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV CLASS=x></DIV>");
    assert_eq!(
        tokens[0],
        Token::StartTag(Tag::new("div").with_attribute("class", "x"))
    );
    assert_eq!(tokens[1].tag_name(), Some("div"));
}

#[test]
fn test_attribute_value_forms() {
    let tokens = tokenize(r#"<input a="double" b='single' c=unquoted d>"#);
    match &tokens[0] {
        Token::StartTag(tag) => {
            assert_eq!(
                tag.attributes,
                vec![
                    Attribute::new("a", "double"),
                    Attribute::new("b", "single"),
                    Attribute::new("c", "unquoted"),
                    Attribute::new("d", ""),
                ]
            );
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let mut tokenizer = HTMLTokenizer::new(r#"<p id="first" ID="second">"#);
    let first = tokenizer.next();
    match first {
        Some(Token::StartTag(tag)) => {
            assert_eq!(tag.attributes.len(), 1);
            assert_eq!(tag.attribute("id"), Some("first"));
        }
        other => panic!("Expected StartTag token, got {other:?}"),
    }
    let _rest: Vec<Token> = tokenizer.by_ref().collect();
    assert!(
        tokenizer
            .issues()
            .iter()
            .any(|issue| issue.message == "duplicate-attribute")
    );
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens[0], Token::Comment(" hello ".to_string()));
}

#[test]
fn test_bogus_comment_from_processing_instruction() {
    let tokens = tokenize("<?xml version=\"1.0\"?>");
    assert_eq!(
        tokens[0],
        Token::Comment("?xml version=\"1.0\"?".to_string())
    );
}

#[test]
fn test_cdata_outside_foreign_content_is_a_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(tokens[0], Token::Comment("[CDATA[x]]".to_string()));
}

#[test]
fn test_lone_less_than_is_text() {
    let tokens = tokenize("a < b");
    assert_eq!(text_of(&tokens), "a < b");
}

#[test]
fn test_named_character_references() {
    assert_eq!(text_of(&tokenize("&amp;&lt;&gt;&quot;")), "&<>\"");
    assert_eq!(text_of(&tokenize("&copy 2024")), "\u{a9} 2024");
    assert_eq!(text_of(&tokenize("&notanentity;")), "&notanentity;");
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X43;")), "ABC");
    // C1 controls are remapped through the windows-1252 table.
    assert_eq!(text_of(&tokenize("&#128;")), "\u{20AC}");
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
}

#[test]
fn test_character_reference_in_attribute_followed_by_equals() {
    let tokens = tokenize(r#"<a href="?x=1&copy=2">"#);
    match &tokens[0] {
        Token::StartTag(tag) => assert_eq!(tag.attribute("href"), Some("?x=1&copy=2")),
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_newlines_are_normalized() {
    assert_eq!(text_of(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

#[test]
fn test_rcdata_title_keeps_tags_as_text() {
    let tokens = tokenize("<title>a <b> &amp; c</title>");
    assert_eq!(text_of(&tokens), "a <b> & c");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag(tag) if tag.name == "title"));
}

#[test]
fn test_rawtext_style_does_not_decode_references() {
    let tokens = tokenize("<style>p > a { content: '&amp;' }</style>");
    assert_eq!(text_of(&tokens), "p > a { content: '&amp;' }");
}

#[test]
fn test_script_data_escaped_comment() {
    let tokens = tokenize("<script><!-- if (a</b) {} --></script>");
    assert_eq!(text_of(&tokens), "<!-- if (a</b) {} -->");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag(tag) if tag.name == "script"));
}

#[test]
fn test_script_data_double_escaped() {
    let input = "<script><!--<script></script>--></script>";
    let tokens = tokenize(input);
    assert_eq!(text_of(&tokens), "<!--<script></script>-->");
}

#[test]
fn test_plaintext_consumes_everything() {
    let tokens = tokenize("<plaintext></plaintext><b>");
    assert_eq!(text_of(&tokens), "</plaintext><b>");
}

#[test]
fn test_issue_positions_are_input_offsets() {
    let mut tokenizer = HTMLTokenizer::new("ab</>");
    let _tokens: Vec<Token> = tokenizer.by_ref().collect();
    let issues = tokenizer.take_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, ParseIssueKind::Tokenizer);
    assert_eq!(issues[0].message, "missing-end-tag-name");
    assert!(issues[0].position >= 2);
    assert!(tokenizer.issues().is_empty());
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("<div class=\"a");
    assert_eq!(tokens, vec![Token::EndOfFile]);
}
