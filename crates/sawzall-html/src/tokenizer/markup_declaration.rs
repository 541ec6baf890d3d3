//! Comment, bogus comment and DOCTYPE states.
//!
//! [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Doctype;

impl HTMLTokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => {
                self.emit_current_comment();
                self.emit_eof_token();
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.current_comment.push('\u{FFFD}');
            }
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Unlike the other states this one looks ahead without consuming first.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-)"
        // "Consume those two characters, create a comment token whose data is
        // the empty string, and switch to the comment start state."
        if self.next_few_characters_are("--", false) {
            self.skip(2);
            self.current_comment.clear();
            self.switch_to(TokenizerState::CommentStart);
        }
        // "ASCII case-insensitive match for the word "DOCTYPE""
        else if self.next_few_characters_are("DOCTYPE", true) {
            self.skip(7);
            self.switch_to(TokenizerState::DOCTYPE);
        }
        // "The string "[CDATA[" (the five uppercase letters "CDATA" with a
        // U+005B LEFT SQUARE BRACKET character before and after)"
        //
        // Every element is in the HTML namespace here, so this is always the
        // cdata-in-html-content branch: "Create a comment token whose data is
        // the "[CDATA[" string. Switch to the bogus comment state."
        else if self.next_few_characters_are("[CDATA[", false) {
            self.skip(7);
            self.parse_error("cdata-in-html-content");
            self.current_comment.clear();
            self.current_comment.push_str("[CDATA[");
            self.switch_to(TokenizerState::BogusComment);
        }
        // "Anything else"
        // "This is an incorrectly-opened-comment parse error. Create a comment
        // token whose data is the empty string. Switch to the bogus comment
        // state (don't consume anything in the current state)."
        else {
            self.parse_error("incorrectly-opened-comment");
            self.current_comment.clear();
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            Some('>') => {
                self.parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.current_comment.push('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.current_comment.push('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(c) => self.current_comment.push(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.current_comment.push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.current_comment.push('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.current_input_character == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        if !matches!(self.current_input_character, Some('>') | None) {
            self.parse_error("nested-comment");
        }
        self.reconsume_in(TokenizerState::CommentEnd);
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            Some('-') => self.current_comment.push('-'),
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.current_comment.push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.parse_error("incorrectly-closed-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.current_comment.push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    fn eof_in_comment(&mut self) {
        self.parse_error("eof-in-comment");
        self.emit_current_comment();
        self.emit_eof_token();
    }

    // ===== DOCTYPE =====

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            None => {
                self.parse_error("eof-in-doctype");
                self.current_doctype = Doctype {
                    force_quirks: true,
                    ..Doctype::default()
                };
                self.emit_current_doctype();
                self.emit_eof_token();
            }
            Some(_) => {
                self.parse_error("missing-whitespace-before-doctype-name");
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        self.current_doctype = Doctype::default();
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.parse_error("missing-doctype-name");
                self.current_doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => {
                self.parse_error("eof-in-doctype");
                self.current_doctype.force_quirks = true;
                self.emit_current_doctype();
                self.emit_eof_token();
            }
            Some(c) => {
                let first = if c == '\0' {
                    self.parse_error("unexpected-null-character");
                    '\u{FFFD}'
                } else {
                    c.to_ascii_lowercase()
                };
                self.current_doctype.name = Some(first.to_string());
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDOCTYPEName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                let c = if c == '\0' {
                    self.parse_error("unexpected-null-character");
                    '\u{FFFD}'
                } else {
                    c.to_ascii_lowercase()
                };
                self.current_doctype
                    .name
                    .get_or_insert_with(String::new)
                    .push(c);
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                // "If the six characters starting from the current input
                // character are an ASCII case-insensitive match for the word
                // "PUBLIC", then consume those characters and switch to the
                // after DOCTYPE public keyword state."
                let start = self.pos - 1;
                if self.characters_at_are(start, "PUBLIC", true) {
                    self.skip(5);
                    self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                } else if self.characters_at_are(start, "SYSTEM", true) {
                    self.skip(5);
                    self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                } else {
                    self.parse_error("invalid-character-sequence-after-doctype-name");
                    self.current_doctype.force_quirks = true;
                    self.reconsume_in(TokenizerState::BogusDOCTYPE);
                }
            }
        }
    }

    /// After DOCTYPE public/system keyword states
    /// ([§ 13.2.5.57](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state),
    /// [§ 13.2.5.63](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)).
    pub(super) fn handle_after_doctype_keyword_state(&mut self, public: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(if public {
                    TokenizerState::BeforeDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::BeforeDOCTYPESystemIdentifier
                });
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(if public {
                    "missing-whitespace-after-doctype-public-keyword"
                } else {
                    "missing-whitespace-after-doctype-system-keyword"
                });
                self.begin_doctype_identifier(public, quote);
            }
            _ => self.handle_doctype_identifier_missing(public),
        }
    }

    /// Before DOCTYPE public/system identifier states
    /// ([§ 13.2.5.58](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state),
    /// [§ 13.2.5.64](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)).
    pub(super) fn handle_before_doctype_identifier_state(&mut self, public: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(public, quote),
            _ => self.handle_doctype_identifier_missing(public),
        }
    }

    /// The `>`, EOF and "anything else" entries shared by the keyword and
    /// before-identifier states.
    fn handle_doctype_identifier_missing(&mut self, public: bool) {
        match self.current_input_character {
            Some('>') => {
                self.parse_error(if public {
                    "missing-doctype-public-identifier"
                } else {
                    "missing-doctype-system-identifier"
                });
                self.current_doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error(if public {
                    "missing-quote-before-doctype-public-identifier"
                } else {
                    "missing-quote-before-doctype-system-identifier"
                });
                self.current_doctype.force_quirks = true;
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// "Set the current DOCTYPE token's public identifier to the empty string
    /// (not missing), then switch to the DOCTYPE public identifier
    /// (double-quoted) state."
    fn begin_doctype_identifier(&mut self, public: bool, quote: char) {
        let next = match (public, quote) {
            (true, '"') => {
                self.current_doctype.public_identifier = Some(String::new());
                TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted
            }
            (true, _) => {
                self.current_doctype.public_identifier = Some(String::new());
                TokenizerState::DOCTYPEPublicIdentifierSingleQuoted
            }
            (false, '"') => {
                self.current_doctype.system_identifier = Some(String::new());
                TokenizerState::DOCTYPESystemIdentifierDoubleQuoted
            }
            (false, _) => {
                self.current_doctype.system_identifier = Some(String::new());
                TokenizerState::DOCTYPESystemIdentifierSingleQuoted
            }
        };
        self.switch_to(next);
    }

    /// DOCTYPE public/system identifier (double/single-quoted) states
    /// ([§ 13.2.5.59](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// through [§ 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)).
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, public: bool, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(if public {
                TokenizerState::AfterDOCTYPEPublicIdentifier
            } else {
                TokenizerState::AfterDOCTYPESystemIdentifier
            }),
            Some('>') => {
                self.parse_error("abrupt-doctype-identifier");
                self.current_doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                let c = if c == '\0' {
                    self.parse_error("unexpected-null-character");
                    '\u{FFFD}'
                } else {
                    c
                };
                let identifier = if public {
                    &mut self.current_doctype.public_identifier
                } else {
                    &mut self.current_doctype.system_identifier
                };
                identifier.get_or_insert_with(String::new).push(c);
            }
        }
    }

    /// After DOCTYPE public identifier state and the between public and
    /// system identifiers state
    /// ([§ 13.2.5.61](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state),
    /// [§ 13.2.5.62](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)).
    ///
    /// They differ only in how whitespace is handled and whether a quote
    /// directly after the public identifier is an error.
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self, directly_after: bool) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                if directly_after {
                    self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
                }
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some(quote @ ('"' | '\'')) => {
                if directly_after {
                    self.parse_error(
                        "missing-whitespace-between-doctype-public-and-system-identifiers",
                    );
                }
                self.begin_doctype_identifier(false, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.parse_error("missing-quote-before-doctype-system-identifier");
                self.current_doctype.force_quirks = true;
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            None => self.eof_in_doctype(),
            // "This does not set the current DOCTYPE token's force-quirks flag to on."
            Some(_) => {
                self.parse_error("unexpected-character-after-doctype-system-identifier");
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype();
            }
            Some('\0') => self.parse_error("unexpected-null-character"),
            None => {
                self.emit_current_doctype();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error("eof-in-doctype");
        self.current_doctype.force_quirks = true;
        self.emit_current_doctype();
        self.emit_eof_token();
    }
}
