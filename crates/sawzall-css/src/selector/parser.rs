//! Selector text to [`SelectorList`].
//!
//! [§ 18 Grammar](https://www.w3.org/TR/selectors-4/#grammar)
//!
//! ```text
//! <selector-list>  = <complex-selector>#
//! <complex-selector> = <compound-selector> [ <combinator>? <compound-selector> ]*
//! <compound-selector> = [ <type-selector>? <subclass-selector>* ]!
//! <combinator> = '>' | '+' | '~' | whitespace
//! ```
//!
//! Identifiers follow [CSS Syntax § 4.3](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms),
//! escapes included. Parsing works directly on characters; there is no
//! separate token stream.

use sawzall_common::warning::warn_once;

use super::{
    AttributeOperator, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    PseudoClass, SelectorList, SimpleSelector,
};
use crate::error::{SelectorError, SelectorErrorKind};

type ParseResult<T> = Result<T, SelectorErrorKind>;

/// Parse a comma-separated selector list.
///
/// Type selectors and attribute names are lowercased; class names, ids and
/// attribute values keep their case.
///
/// # Errors
///
/// Returns a [`SelectorError`] carrying `text` and the first grammar
/// violation found.
pub fn parse_selector(text: &str) -> Result<SelectorList, SelectorError> {
    SelectorParser::new(text)
        .parse_list()
        .map_err(|kind| SelectorError::new(text, kind))
}

/// [§ 4.3.8 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_name_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.3.8 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-'
}

struct SelectorParser {
    input: Vec<char>,
    pos: usize,
}

impl SelectorParser {
    fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Skips whitespace and reports whether there was any.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> ParseResult<SelectorList> {
        let _ = self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorErrorKind::Empty);
        }

        let mut selectors = Vec::new();
        loop {
            let _ = self.skip_whitespace();
            if matches!(self.peek(), None | Some(',')) {
                return Err(SelectorErrorKind::EmptyListEntry(self.pos));
            }
            selectors.push(self.parse_complex()?);

            // parse_complex stops in front of ',' or at the end.
            match self.advance() {
                None => return Ok(SelectorList { selectors }),
                Some(',') => {}
                Some(c) => return Err(SelectorErrorKind::UnexpectedCharacter(c, self.pos - 1)),
            }
        }
    }

    fn parse_complex(&mut self) -> ParseResult<ComplexSelector> {
        if let Some(c @ ('>' | '+' | '~')) = self.peek() {
            return Err(SelectorErrorKind::LeadingCombinator(c, self.pos));
        }

        let mut subject = self.parse_compound()?;
        // Left-to-right (compound, combinator-after-it) pairs.
        let mut chain = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some(c @ ('>' | '+' | '~')) => {
                    let at = self.pos;
                    self.pos += 1;
                    let _ = self.skip_whitespace();
                    if matches!(self.peek(), None | Some(',' | '>' | '+' | '~')) {
                        return Err(SelectorErrorKind::TrailingCombinator(c, at));
                    }
                    match c {
                        '>' => Combinator::Child,
                        '+' => Combinator::NextSibling,
                        _ => Combinator::SubsequentSibling,
                    }
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(SelectorErrorKind::UnexpectedCharacter(c, self.pos)),
            };
            let next = self.parse_compound()?;
            chain.push((std::mem::replace(&mut subject, next), combinator));
        }

        Ok(ComplexSelector {
            subject,
            combinators: chain
                .into_iter()
                .rev()
                .map(|(compound, combinator)| (combinator, compound))
                .collect(),
        })
    }

    fn parse_compound(&mut self) -> ParseResult<CompoundSelector> {
        let mut simple_selectors = Vec::new();

        // [§ 5.1] "A type selector ... or the universal selector" comes first.
        if self.peek() == Some('*') {
            self.pos += 1;
            simple_selectors.push(SimpleSelector::Universal);
        } else if self.would_start_identifier() {
            let name = self.consume_name().to_ascii_lowercase();
            simple_selectors.push(SimpleSelector::Type(name));
        }

        loop {
            let simple = match self.peek() {
                Some(marker @ ('#' | '.')) => {
                    let at = self.pos;
                    self.pos += 1;
                    if !self.would_start_identifier() {
                        return Err(SelectorErrorKind::ExpectedName(marker, at));
                    }
                    let name = self.consume_name();
                    if marker == '#' {
                        SimpleSelector::Id(name)
                    } else {
                        SimpleSelector::Class(name)
                    }
                }
                Some('[') => SimpleSelector::Attribute(self.parse_attribute()?),
                Some(':') => self.parse_pseudo_class()?,
                _ => break,
            };
            simple_selectors.push(simple);
        }

        if simple_selectors.is_empty() {
            return Err(match self.peek() {
                Some(c) => SelectorErrorKind::UnexpectedCharacter(c, self.pos),
                None => SelectorErrorKind::UnexpectedEnd("a selector"),
            });
        }
        Ok(CompoundSelector { simple_selectors })
    }

    /// `[name]`, `[name op value]` or `[name op value i]`.
    fn parse_attribute(&mut self) -> ParseResult<AttributeSelector> {
        self.pos += 1; // '['
        let _ = self.skip_whitespace();
        if !self.would_start_identifier() {
            return Err(match self.peek() {
                None => SelectorErrorKind::UnexpectedEnd("an attribute name"),
                Some(_) => SelectorErrorKind::ExpectedAttributeName(self.pos),
            });
        }
        let name = self.consume_name().to_ascii_lowercase();
        let _ = self.skip_whitespace();

        let operator = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector {
                    name,
                    operator: AttributeOperator::Exists,
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) if self.peek_at(1) == Some('=') => {
                self.pos += 2;
                c
            }
            Some(c) => return Err(SelectorErrorKind::UnexpectedCharacter(c, self.pos)),
            None => return Err(SelectorErrorKind::UnexpectedEnd("']'")),
        };

        let _ = self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote)?,
            Some(_) => {
                let at = self.pos;
                let value = self.consume_name();
                if value.is_empty() {
                    return Err(SelectorErrorKind::ExpectedAttributeValue(at));
                }
                value
            }
            None => return Err(SelectorErrorKind::UnexpectedEnd("an attribute value")),
        };

        // [§ 6.3] "[att=val i]" / "[att=val s]"
        let _ = self.skip_whitespace();
        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.pos += 1;
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            let _ = self.skip_whitespace();
        }

        match self.advance() {
            Some(']') => {}
            Some(c) => return Err(SelectorErrorKind::UnexpectedCharacter(c, self.pos - 1)),
            None => return Err(SelectorErrorKind::UnexpectedEnd("']'")),
        }

        let operator = match operator {
            '~' => AttributeOperator::Includes(value),
            '|' => AttributeOperator::DashMatch(value),
            '^' => AttributeOperator::PrefixMatch(value),
            '$' => AttributeOperator::SuffixMatch(value),
            '*' => AttributeOperator::SubstringMatch(value),
            _ => AttributeOperator::Equals(value),
        };
        Ok(AttributeSelector {
            name,
            operator,
            case_insensitive,
        })
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn parse_string(&mut self, quote: char) -> ParseResult<String> {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(value),
                // "newline: This is a parse error."
                None | Some('\n') => return Err(SelectorErrorKind::UnterminatedString(start)),
                Some('\\') => match self.peek() {
                    None => {}
                    // "Otherwise, if the next input code point is a newline,
                    // consume it."
                    Some('\n') => self.pos += 1,
                    Some(_) => value.push(self.consume_escape()),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn parse_pseudo_class(&mut self) -> ParseResult<SimpleSelector> {
        let at = self.pos;
        self.pos += 1; // ':'
        if self.peek() == Some(':') {
            self.pos += 1;
            return Err(SelectorErrorKind::PseudoElement(self.consume_name()));
        }
        if !self.would_start_identifier() {
            return Err(SelectorErrorKind::ExpectedName(':', at));
        }
        let name = self.consume_name().to_ascii_lowercase();

        if self.peek() == Some('(') {
            self.pos += 1;
            if name == "not" {
                return self.parse_negation();
            }
            return Err(SelectorErrorKind::UnknownPseudoClass(format!("{name}()")));
        }

        if name == "link" {
            warn_once(
                "Selectors",
                "':link' matches every hyperlink; visited state is not tracked",
            );
        }
        PseudoClass::from_name(&name)
            .map(SimpleSelector::PseudoClass)
            .ok_or(SelectorErrorKind::UnknownPseudoClass(name))
    }

    /// The argument of `:not(`, up to and including the closing `)`.
    fn parse_negation(&mut self) -> ParseResult<SimpleSelector> {
        let mut compounds = Vec::new();
        loop {
            let _ = self.skip_whitespace();
            match self.peek() {
                Some(')') if compounds.is_empty() => return Err(SelectorErrorKind::EmptyNegation),
                Some(',' | ')') => return Err(SelectorErrorKind::EmptyListEntry(self.pos)),
                None => return Err(SelectorErrorKind::UnexpectedEnd("')'")),
                _ => {}
            }
            compounds.push(self.parse_compound()?);
            let _ = self.skip_whitespace();
            match self.advance() {
                Some(')') => return Ok(SimpleSelector::Not(compounds)),
                Some(',') => {}
                Some(c) => return Err(SelectorErrorKind::UnexpectedCharacter(c, self.pos - 1)),
                None => return Err(SelectorErrorKind::UnexpectedEnd("')'")),
            }
        }
    }

    /// [§ 4.3.10 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_identifier(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_at(1) {
                Some(c) if is_name_start_char(c) || c == '-' => true,
                Some('\\') => self.is_valid_escape(1),
                _ => false,
            },
            Some(c) if is_name_start_char(c) => true,
            Some('\\') => self.is_valid_escape(0),
            _ => false,
        }
    }

    /// [§ 4.3.9 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
    fn is_valid_escape(&self, offset: usize) -> bool {
        self.peek_at(offset) == Some('\\') && self.peek_at(offset + 1).is_some_and(|c| c != '\n')
    }

    /// [§ 4.3.12 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(c) if is_name_char(c) => {
                    name.push(c);
                    self.pos += 1;
                }
                Some('\\') if self.is_valid_escape(0) => {
                    self.pos += 1;
                    name.push(self.consume_escape());
                }
                _ => return name,
            }
        }
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the backslash already consumed.
    fn consume_escape(&mut self) -> char {
        let Some(c) = self.advance() else {
            // "EOF: This is a parse error. Return U+FFFD REPLACEMENT CHARACTER."
            return '\u{FFFD}';
        };
        let Some(mut value) = c.to_digit(16) else {
            // "anything else: Return the current input code point."
            return c;
        };

        // "Consume as many hex digits as possible, but no more than 5."
        for _ in 0..5 {
            match self.peek().and_then(|d| d.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.pos += 1;
                }
                None => break,
            }
        }
        // "If the next input code point is whitespace, consume it as well."
        if self.peek().is_some_and(|w| w.is_ascii_whitespace()) {
            self.pos += 1;
        }
        // "If this number is zero, or is for a surrogate, or is greater than
        // the maximum allowed code point, return U+FFFD REPLACEMENT CHARACTER."
        if value == 0 {
            return '\u{FFFD}';
        }
        char::from_u32(value).unwrap_or('\u{FFFD}')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(list: &SelectorList) -> &[SimpleSelector] {
        &list.selectors[0].subject.simple_selectors
    }

    #[test]
    fn test_escaped_identifier() {
        let list = parse_selector(r"#\31 0").expect("valid selector");
        assert_eq!(compound(&list), [SimpleSelector::Id("10".to_string())]);

        let list = parse_selector(r".a\.b").expect("valid selector");
        assert_eq!(compound(&list), [SimpleSelector::Class("a.b".to_string())]);
    }

    #[test]
    fn test_escape_of_zero_is_replacement_character() {
        let list = parse_selector(r".\0").expect("valid selector");
        assert_eq!(compound(&list), [SimpleSelector::Class("\u{FFFD}".to_string())]);
    }

    #[test]
    fn test_chain_is_stored_right_to_left() {
        let list = parse_selector("a > b c").expect("valid selector");
        let complex = &list.selectors[0];
        assert_eq!(
            complex.subject.simple_selectors,
            [SimpleSelector::Type("c".to_string())]
        );
        let combinators: Vec<_> = complex.combinators.iter().map(|(c, _)| *c).collect();
        assert_eq!(combinators, [Combinator::Descendant, Combinator::Child]);
        assert_eq!(
            complex.combinators[1].1.simple_selectors,
            [SimpleSelector::Type("a".to_string())]
        );
    }

    #[test]
    fn test_custom_property_style_identifier() {
        let list = parse_selector(".--x").expect("valid selector");
        assert_eq!(compound(&list), [SimpleSelector::Class("--x".to_string())]);
        assert!(parse_selector(".-1").is_err());
    }
}
