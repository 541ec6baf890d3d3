//! Character reference states of the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::named_character_references::{any_entity_has_prefix, lookup_entity};

/// [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: [(u32, u32); 27] = [
    (0x80, 0x20AC),
    (0x82, 0x201A),
    (0x83, 0x0192),
    (0x84, 0x201E),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02C6),
    (0x89, 0x2030),
    (0x8A, 0x0160),
    (0x8B, 0x2039),
    (0x8C, 0x0152),
    (0x8E, 0x017D),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201C),
    (0x94, 0x201D),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02DC),
    (0x99, 0x2122),
    (0x9A, 0x0161),
    (0x9B, 0x203A),
    (0x9C, 0x0153),
    (0x9E, 0x017E),
    (0x9F, 0x0178),
];

impl HTMLTokenizer {
    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_attribute_value(c);
            }
        } else {
            for c in buffer.chars() {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table."
    ///
    /// Entered by reconsuming, so the current input character (the first
    /// alphanumeric) sits at `pos - 1`. The longest match is found by
    /// lookahead and only the matched characters are consumed.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let start = self.pos.saturating_sub(1);
        let mut candidate = String::new();
        let mut longest_match: Option<(usize, &'static str)> = None;

        for (offset, &c) in self.input[start..].iter().enumerate() {
            if !(c.is_ascii_alphanumeric() || c == ';') {
                break;
            }
            candidate.push(c);
            if !any_entity_has_prefix(&candidate) {
                break;
            }
            if let Some(replacement) = lookup_entity(&candidate) {
                longest_match = Some((offset + 1, replacement));
            }
            if c == ';' {
                break;
            }
        }

        let Some((length, replacement)) = longest_match else {
            // "Otherwise: Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            //
            // Nothing past the ampersand is consumed; the ambiguous ampersand
            // state re-reads the alphanumerics one at a time.
            self.pos = start;
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.temporary_buffer.extend(&self.input[start..start + length]);
        self.pos = start + length;
        let ends_with_semicolon = self.input[start + length - 1] == ';';

        // "If the character reference was consumed as part of an attribute,
        // and the last character matched is not a U+003B SEMICOLON character
        // (;), and the next input character is either a U+003D EQUALS SIGN
        // character (=) or an ASCII alphanumeric, then, for historical
        // reasons, flush code points consumed as a character reference and
        // switch to the return state."
        if self.is_consumed_as_part_of_attribute()
            && !ends_with_semicolon
            && self
                .peek_codepoint(0)
                .is_some_and(|next| next == '=' || next.is_ascii_alphanumeric())
        {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
            return;
        }

        if !ends_with_semicolon {
            self.parse_error("missing-semicolon-after-character-reference");
        }

        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name (as given
        // by the second column of the named character references table) to
        // the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(replacement);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_attribute_value(c);
                } else {
                    self.emit_character_token(c);
                }
            }
            Some(';') => {
                self.parse_error("unknown-named-character-reference");
                self.reconsume_in(self.return_state);
            }
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// Hexadecimal and decimal character reference start states
    /// ([§ 13.2.5.76](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state),
    /// [§ 13.2.5.77](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)).
    pub(super) fn handle_numeric_character_reference_start_state(&mut self, radix: u32) {
        match self.current_input_character {
            Some(c) if c.is_digit(radix) => self.reconsume_in(if radix == 16 {
                TokenizerState::HexadecimalCharacterReference
            } else {
                TokenizerState::DecimalCharacterReference
            }),
            // "This is an absence-of-digits-in-numeric-character-reference parse
            // error. Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.parse_error("absence-of-digits-in-numeric-character-reference");
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// Hexadecimal and decimal character reference states
    /// ([§ 13.2.5.78](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state),
    /// [§ 13.2.5.79](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)).
    pub(super) fn handle_numeric_character_reference_digits_state(&mut self, radix: u32) {
        match self.current_input_character {
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                // Saturate well above the code point range; the end state
                // rejects anything over 0x10FFFF anyway.
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit)
                    .min(0x0011_0000);
            }
            Some(';') => {
                self.finish_numeric_character_reference();
                self.switch_to(self.return_state);
            }
            _ => {
                self.parse_error("missing-semicolon-after-character-reference");
                self.finish_numeric_character_reference();
                self.reconsume_in(self.return_state);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// "Check the character reference code", map it, and flush the result.
    fn finish_numeric_character_reference(&mut self) {
        let code = self.character_reference_code;
        let resolved = match code {
            0 => {
                self.parse_error("null-character-reference");
                0xFFFD
            }
            0x0011_0000.. => {
                self.parse_error("character-reference-outside-unicode-range");
                0xFFFD
            }
            0xD800..=0xDFFF => {
                self.parse_error("surrogate-character-reference");
                0xFFFD
            }
            _ => {
                if is_noncharacter(code) {
                    self.parse_error("noncharacter-character-reference");
                }
                let is_control = (0x7F..=0x9F).contains(&code)
                    || (code < 0x20 && !matches!(code, 0x09 | 0x0A | 0x0C));
                if is_control {
                    self.parse_error("control-character-reference");
                }
                C1_REPLACEMENTS
                    .iter()
                    .find(|(from, _)| *from == code)
                    .map_or(code, |(_, to)| *to)
            }
        };

        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(resolved).unwrap_or('\u{FFFD}'));
        self.flush_code_points_consumed_as_character_reference();
    }
}

/// [Infra § 4.5](https://infra.spec.whatwg.org/#noncharacter)
///
/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
const fn is_noncharacter(code: u32) -> bool {
    (code >= 0xFDD0 && code <= 0xFDEF) || (code & 0xFFFE) == 0xFFFE
}
