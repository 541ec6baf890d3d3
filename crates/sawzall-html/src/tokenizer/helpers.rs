//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token construction and emission ("Emit the current token")

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Tag, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns `None` at the end of input without advancing.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Peek at the code point `offset` positions past the next input
    /// character without consuming anything.
    #[must_use]
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// "If the next few characters are..."
    ///
    /// Checks the unconsumed input at the current position, optionally using
    /// ASCII case-insensitive comparison.
    #[must_use]
    pub(super) fn next_few_characters_are(&self, target: &str, case_insensitive: bool) -> bool {
        self.characters_at_are(self.pos, target, case_insensitive)
    }

    /// Compare the input starting at `start` against `target`.
    pub(super) fn characters_at_are(
        &self,
        start: usize,
        target: &str,
        case_insensitive: bool,
    ) -> bool {
        for (index, expected) in (start..).zip(target.chars()) {
            let Some(&actual) = self.input.get(index) else {
                return false;
            };
            let equal = if case_insensitive {
                actual.eq_ignore_ascii_case(&expected)
            } else {
                actual == expected
            };
            if !equal {
                return false;
            }
        }
        true
    }

    /// Skip `count` characters that a lookahead already matched.
    pub(super) fn skip(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.input.len());
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// NOTE: the tokenizer never sees CR because newlines are normalized first.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Construction Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Create a new start tag token" / "Create a new end tag token"
    pub(super) fn start_new_tag(&mut self, is_end: bool) {
        self.current_tag = Tag::default();
        self.current_tag_is_end = is_end;
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.current_tag
            .attributes
            .push(Attribute::new(String::new(), String::new()));
    }

    /// "Append the current input character to the current attribute's name."
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_tag.attributes.last_mut() {
            attr.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_tag.attributes.last_mut() {
            attr.value.push(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    ///
    /// Runs once per tag, right before emission. The first occurrence wins.
    fn remove_duplicate_attributes(&mut self) {
        let attributes = std::mem::take(&mut self.current_tag.attributes);
        let mut kept: Vec<Attribute> = Vec::with_capacity(attributes.len());
        for attr in attributes {
            if kept.iter().any(|existing| existing.name == attr.name) {
                self.parse_error("duplicate-attribute");
            } else {
                kept.push(attr);
            }
        }
        self.current_tag.attributes = kept;
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        self.current_tag_is_end
            && self
                .last_start_tag_name
                .as_deref()
                .is_some_and(|last| last == self.current_tag.name)
    }

    /// "Anything else" branch of the raw text end tag name states:
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
    /// character token, and a character token for each of the characters in
    /// the temporary buffer (in the order they were added to the buffer).
    /// Reconsume in the RCDATA state."
    pub(super) fn flush_end_tag_as_text(&mut self, text_state: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.temporary_buffer = buffer;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current tag token."
    ///
    /// Start tags of raw text elements also switch the tokenizer into the
    /// matching content model, as the tree construction stage would:
    /// - [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
    ///   `title`, `textarea`: "Switch the tokenizer to the RCDATA state."
    /// - [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///   `style`, `xmp`, `iframe`, `noembed`, `noframes`: "Switch the tokenizer to the RAWTEXT state."
    /// - `script`: "Switch the tokenizer to the script data state."
    /// - `plaintext`: "Switch the tokenizer to the PLAINTEXT state."
    ///
    /// `noscript` stays in the data state because scripting is disabled.
    pub(super) fn emit_current_tag(&mut self) {
        self.remove_duplicate_attributes();
        let tag = std::mem::take(&mut self.current_tag);

        if self.current_tag_is_end {
            if !tag.attributes.is_empty() {
                self.parse_error("end-tag-with-attributes");
            }
            if tag.self_closing {
                self.parse_error("end-tag-with-trailing-solidus");
            }
            self.pending.push_back(Token::EndTag(tag));
            return;
        }

        match tag.name.as_str() {
            "title" | "textarea" => self.switch_to(TokenizerState::RCDATA),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                self.switch_to(TokenizerState::RAWTEXT);
            }
            "script" => self.switch_to(TokenizerState::ScriptData),
            "plaintext" => self.switch_to(TokenizerState::PLAINTEXT),
            _ => {}
        }
        self.last_start_tag_name = Some(tag.name.clone());
        self.pending.push_back(Token::StartTag(tag));
    }

    /// "Emit the comment token."
    pub(super) fn emit_current_comment(&mut self) {
        let data = std::mem::take(&mut self.current_comment);
        self.pending.push_back(Token::Comment(data));
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_current_doctype(&mut self) {
        let doctype = std::mem::take(&mut self.current_doctype);
        self.pending.push_back(Token::Doctype(doctype));
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending.push_back(Token::Character(c));
    }

    /// "Emit an end-of-file token."
    ///
    /// Nothing is tokenized after this.
    pub(super) fn emit_eof_token(&mut self) {
        self.pending.push_back(Token::EndOfFile);
        self.finished = true;
    }
}
