//! The table family of insertion modes, plus select and template.
//!
//! [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
//! through [§ 13.2.6.4.18](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate).

use super::core::{HTMLParser, InsertionMode};
use crate::tokenizer::{Tag, Token};

/// Sections that open a new table body context.
const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl HTMLParser {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            // tokens."
            // "Let the original insertion mode be the current insertion mode."
            // "Switch the insertion mode to "in table text" and reprocess the
            // token."
            Token::Character(_)
                if self.current_node_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.reprocess_in(InsertionMode::InTableText, token);
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment(data) => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            Token::StartTag(tag) => match tag.name.as_str() {
                // "A start tag whose tag name is "caption""
                // "Clear the stack back to a table context."
                // "Insert a marker at the end of the list of active formatting
                // elements."
                // "Insert an HTML element for the token, then switch the
                // insertion mode to "in caption"."
                "caption" => {
                    self.clear_stack_back_to_table_context();
                    self.push_active_formatting_marker();
                    let _ = self.insert_html_element(tag);
                    self.insertion_mode = InsertionMode::InCaption;
                }

                // "A start tag whose tag name is "colgroup""
                "colgroup" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(tag);
                    self.insertion_mode = InsertionMode::InColumnGroup;
                }

                // "A start tag whose tag name is "col""
                // "Insert an HTML element for a "colgroup" start tag token
                // with no attributes, then switch the insertion mode to "in
                // column group"."
                // "Reprocess the current token."
                "col" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element_named("colgroup");
                    self.reprocess_in(InsertionMode::InColumnGroup, token);
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
                name if TABLE_SECTIONS.contains(&name) => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(tag);
                    self.insertion_mode = InsertionMode::InTableBody;
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                // "Insert an HTML element for a "tbody" start tag token with
                // no attributes, then switch the insertion mode to "in table
                // body"."
                // "Reprocess the current token."
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element_named("tbody");
                    self.reprocess_in(InsertionMode::InTableBody, token);
                }

                // "A start tag whose tag name is "table""
                "table" => {
                    self.parse_error("nested-table");
                    // "If the stack of open elements does not have a table
                    // element in table scope, ignore the token."
                    if !self.has_element_in_table_scope("table") {
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately. Reprocess the token."
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                    self.process_token(token);
                }

                // "A start tag whose tag name is one of: "style", "script",
                // "template""
                // "Process the token using the rules for the "in head"
                // insertion mode."
                "style" | "script" | "template" => self.handle_in_head_mode(token),

                // "A start tag whose tag name is "input""
                "input" => {
                    // "If the token does not have an attribute with the name
                    // "type", or if it does, but that attribute's value is not
                    // an ASCII case-insensitive match for the string "hidden",
                    // then: act as described in the "anything else" entry
                    // below."
                    let hidden = tag
                        .attribute("type")
                        .is_some_and(|value| value.eq_ignore_ascii_case("hidden"));
                    if !hidden {
                        self.handle_in_table_anything_else(token);
                        return;
                    }
                    // "Otherwise: Parse error. Insert an HTML element for the
                    // token. Pop that input element off the stack of open
                    // elements."
                    self.parse_error("hidden-input-in-table");
                    let _ = self.insert_html_element(tag);
                    let _ = self.stack_of_open_elements.pop();
                }

                // "A start tag whose tag name is "form""
                "form" => {
                    self.parse_error("form-in-table");
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null,
                    // ignore the token."
                    if self.stack_contains("template") || self.form_element_pointer.is_some() {
                        return;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set
                    // the form element pointer to point to the element
                    // created. Pop that form element off the stack of open
                    // elements."
                    let form = self.insert_html_element(tag);
                    self.form_element_pointer = Some(form);
                    let _ = self.stack_of_open_elements.pop();
                }

                _ => self.handle_in_table_anything_else(token),
            },

            Token::EndTag(tag) => match tag.name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    // "If the stack of open elements does not have a table
                    // element in table scope, this is a parse error; ignore
                    // the token."
                    if !self.has_element_in_table_scope("table") {
                        self.parse_error("unexpected-table-end-tag");
                        return;
                    }
                    // "Otherwise: Pop elements from this stack until a table
                    // element has been popped from the stack. Reset the
                    // insertion mode appropriately."
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                }

                // "An end tag whose tag name is one of: "body", "caption",
                // "col", "colgroup", "html", "tbody", "td", "tfoot", "th",
                // "thead", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => self.parse_error("unexpected-end-tag-in-table"),

                // "An end tag whose tag name is "template""
                "template" => self.handle_in_head_mode(token),

                _ => self.handle_in_table_anything_else(token),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),

            Token::Character(_) => self.handle_in_table_anything_else(token),
        }
    }

    /// "Anything else"
    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn handle_in_table_anything_else(&mut self, token: &Token) {
        self.parse_error("foster-parented-content");
        self.foster_parenting = true;
        self.handle_in_body_mode(token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character('\0') => self.parse_error("unexpected-null-character"),

            // "Any other character token"
            // "Append the character token to the pending table character
            // tokens list."
            Token::Character(c) => self.pending_table_character_tokens.push(*c),

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);

                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace,
                // then this is a parse error: reprocess the character tokens
                // in the pending table character tokens list using the rules
                // given in the "anything else" entry in the "in table"
                // insertion mode."
                if pending.iter().any(|c| !c.is_ascii_whitespace()) {
                    self.parse_error("foster-parented-character");
                    self.foster_parenting = true;
                    for c in pending {
                        self.handle_in_body_mode(&Token::Character(c));
                    }
                    self.foster_parenting = false;
                } else {
                    // "Otherwise, insert the characters given by the pending
                    // table character tokens list."
                    for c in pending {
                        self.insert_character(c);
                    }
                }

                // "Switch the insertion mode to the original insertion mode
                // and reprocess the token."
                let mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InTable);
                self.reprocess_in(mode, token);
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag(tag) if tag.name == "caption" => {
                let _ = self.close_caption();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a caption element
            // in table scope, this is a parse error; ignore the token.
            // (fragment case)"
            // "Otherwise: ... Reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if self.close_caption() {
                    self.process_token(token);
                }
            }
            Token::EndTag(tag) if tag.name == "table" => {
                if self.close_caption() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead"
                        | "tr"
                ) =>
            {
                self.parse_error("unexpected-end-tag-in-caption");
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// The shared steps of "An end tag whose tag name is "caption"". Returns
    /// false when the token was ignored.
    fn close_caption(&mut self) -> bool {
        // "If the stack of open elements does not have a caption element in
        // table scope, this is a parse error; ignore the token. (fragment
        // case)"
        if !self.has_element_in_table_scope("caption") {
            self.parse_error("unexpected-caption-end");
            return false;
        }
        // "Generate implied end tags."
        self.generate_implied_end_tags();
        // "Now, if the current node is not a caption element, then this is a
        // parse error."
        if self.current_node_name() != Some("caption") {
            self.parse_error("end-tag-closes-unclosed-elements");
        }
        // "Pop elements from this stack until a caption element has been
        // popped from the stack."
        self.pop_until_tag("caption");
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "Switch the insertion mode to "in table"."
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(super) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if token.is_whitespace_character() => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            Token::StartTag(tag) if tag.name == "col" => {
                let _ = self.insert_html_element(tag);
                let _ = self.stack_of_open_elements.pop();
            }

            // "An end tag whose tag name is "colgroup""
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token."
            // "Otherwise, pop the current node from the stack of open
            // elements. Switch the insertion mode to "in table"."
            Token::EndTag(tag) if tag.name == "colgroup" => {
                if self.current_node_name() == Some("colgroup") {
                    let _ = self.stack_of_open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                } else {
                    self.parse_error("unexpected-colgroup-end-tag");
                }
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag(tag) if tag.name == "col" => self.parse_error("unexpected-col-end-tag"),

            // "A start tag whose tag name is "template""
            // "An end tag whose tag name is "template""
            Token::StartTag(tag) | Token::EndTag(tag) if tag.name == "template" => {
                self.handle_in_head_mode(token);
            }

            // "An end-of-file token"
            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token."
            // "Otherwise, pop the current node from the stack of open
            // elements." "Switch the insertion mode to "in table"."
            // "Reprocess the token."
            _ => {
                if self.current_node_name() == Some("colgroup") {
                    let _ = self.stack_of_open_elements.pop();
                    self.reprocess_in(InsertionMode::InTable, token);
                } else {
                    self.parse_error("unexpected-token-in-column-group");
                }
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(super) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context."
            // "Insert an HTML element for the token, then switch the insertion
            // mode to "in row"."
            Token::StartTag(tag) if tag.name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error."
            // "Clear the stack back to a table body context."
            // "Insert an HTML element for a "tr" start tag token with no
            // attributes, then switch the insertion mode to "in row"."
            // "Reprocess the current token."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "th" | "td") => {
                self.parse_error("cell-outside-row");
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element_named("tr");
                self.reprocess_in(InsertionMode::InRow, token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as the
            // token, this is a parse error; ignore the token."
            // "Otherwise: Clear the stack back to a table body context. Pop
            // the current node from the stack of open elements. Switch the
            // insertion mode to "in table"."
            Token::EndTag(tag) if TABLE_SECTIONS.contains(&tag.name.as_str()) => {
                if self.has_element_in_table_scope(&tag.name) {
                    self.clear_stack_back_to_table_body_context();
                    let _ = self.stack_of_open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                } else {
                    self.parse_error("unexpected-table-section-end-tag");
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a tbody, thead, or
            // tfoot element in table scope, this is a parse error; ignore the
            // token."
            // "Otherwise: Clear the stack back to a table body context. Pop
            // the current node from the stack of open elements. Switch the
            // insertion mode to "in table". Reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_section_and_reprocess(token);
            }
            Token::EndTag(tag) if tag.name == "table" => {
                self.close_table_section_and_reprocess(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.parse_error("unexpected-end-tag-in-table-body");
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    fn close_table_section_and_reprocess(&mut self, token: &Token) {
        if !self.has_any_element_in_table_scope(TABLE_SECTIONS) {
            self.parse_error("unexpected-token-in-table-body");
            return;
        }
        self.clear_stack_back_to_table_body_context();
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::InTable, token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(super) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context."
            // "Insert an HTML element for the token, then switch the insertion
            // mode to "in cell"."
            // "Insert a marker at the end of the list of active formatting elements."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "th" | "td") => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InCell;
                self.push_active_formatting_marker();
            }

            // "An end tag whose tag name is "tr""
            // "If the stack of open elements does not have a tr element in
            // table scope, this is a parse error; ignore the token."
            // "Otherwise: Clear the stack back to a table row context. Pop the
            // current node (which will be a tr element) from the stack of open
            // elements. Switch the insertion mode to "in table body"."
            Token::EndTag(tag) if tag.name == "tr" => {
                let _ = self.close_table_row();
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "tfoot", "thead", "tr""
            // "An end tag whose tag name is "table""
            // Close the row as above, then "Reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_table_row() {
                    self.process_token(token);
                }
            }
            Token::EndTag(tag) if tag.name == "table" => {
                if self.close_table_row() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as the
            // token, this is a parse error; ignore the token."
            // "If the stack of open elements does not have a tr element in
            // table scope, ignore the token."
            // "Otherwise: ... Reprocess the token."
            Token::EndTag(tag) if TABLE_SECTIONS.contains(&tag.name.as_str()) => {
                if !self.has_element_in_table_scope(&tag.name) {
                    self.parse_error("unexpected-table-section-end-tag");
                    return;
                }
                if self.close_table_row() {
                    self.process_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.parse_error("unexpected-end-tag-in-row");
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    /// The shared steps of "An end tag whose tag name is "tr"". Returns
    /// false when the token was ignored.
    fn close_table_row(&mut self) -> bool {
        if !self.has_element_in_table_scope("tr") {
            self.parse_error("unexpected-tr-end-tag");
            return false;
        }
        self.clear_stack_back_to_table_row_context();
        let _ = self.stack_of_open_elements.pop();
        self.insertion_mode = InsertionMode::InTableBody;
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    pub(super) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag(tag) if matches!(tag.name.as_str(), "td" | "th") => {
                // "If the stack of open elements does not have an element in
                // table scope that is an HTML element with the same tag name
                // as that of the token, then this is a parse error; ignore the
                // token."
                if !self.has_element_in_table_scope(&tag.name) {
                    self.parse_error("unexpected-cell-end-tag");
                    return;
                }
                // "Generate implied end tags."
                self.generate_implied_end_tags();
                // "Now, if the current node is not an HTML element with the
                // same tag name as the token, then this is a parse error."
                if self.current_node_name() != Some(tag.name.as_str()) {
                    self.parse_error("end-tag-closes-unclosed-elements");
                }
                // "Pop elements from the stack of open elements stack until an
                // HTML element with the same tag name as the token has been
                // popped from the stack."
                self.pop_until_tag(&tag.name);
                // "Clear the list of active formatting elements up to the last marker."
                self.clear_active_formatting_elements_to_last_marker();
                // "Switch the insertion mode to "in row"."
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Assert: The stack of open elements has a td or th element in
            // table scope."
            // "Close the cell (see below) and reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if !self.has_any_element_in_table_scope(&["td", "th"]) {
                    self.parse_error("unexpected-start-tag-in-cell");
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html"
                ) =>
            {
                self.parse_error("unexpected-end-tag-in-cell");
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then this is a parse error; ignore the token."
            // "Otherwise, close the cell (see below) and reprocess the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "table" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if !self.has_element_in_table_scope(&tag.name) {
                    self.parse_error("unexpected-end-tag-in-cell");
                    return;
                }
                self.close_the_cell();
                self.process_token(token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character('\0') => self.parse_error("unexpected-null-character"),

            // "Any other character token"
            // "Insert the token's character."
            Token::Character(c) => self.insert_character(*c),

            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            Token::StartTag(tag) => self.handle_in_select_start_tag(token, tag),

            // "An end tag whose tag name is "optgroup""
            Token::EndTag(tag) if tag.name == "optgroup" => {
                // "First, if the current node is an option element, and the
                // node immediately before it in the stack of open elements is
                // an optgroup element, then pop the current node from the
                // stack of open elements."
                let len = self.stack_of_open_elements.len();
                if self.current_node_name() == Some("option")
                    && len >= 2
                    && self.tag_name_of(self.stack_of_open_elements[len - 2]) == Some("optgroup")
                {
                    let _ = self.stack_of_open_elements.pop();
                }
                // "If the current node is an optgroup element, then pop that
                // node from the stack of open elements. Otherwise, this is a
                // parse error; ignore the token."
                if self.current_node_name() == Some("optgroup") {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.parse_error("unexpected-optgroup-end-tag");
                }
            }

            // "An end tag whose tag name is "option""
            // "If the current node is an option element, then pop that node
            // from the stack of open elements. Otherwise, this is a parse
            // error; ignore the token."
            Token::EndTag(tag) if tag.name == "option" => {
                if self.current_node_name() == Some("option") {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.parse_error("unexpected-option-end-tag");
                }
            }

            // "An end tag whose tag name is "select""
            Token::EndTag(tag) if tag.name == "select" => {
                let _ = self.close_select();
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else"
            // "Parse error. Ignore the token."
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-in-select"),
        }
    }

    fn handle_in_select_start_tag(&mut self, token: &Token, tag: &Tag) {
        match tag.name.as_str() {
            "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "option""
            // "If the current node is an option element, pop that node from
            // the stack of open elements."
            // "Insert an HTML element for the token."
            "option" => {
                if self.current_node_name() == Some("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "optgroup""
            // "A start tag whose tag name is "hr""
            "optgroup" | "hr" => {
                if self.current_node_name() == Some("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                if self.current_node_name() == Some("optgroup") {
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(tag);
                if tag.name == "hr" {
                    let _ = self.stack_of_open_elements.pop();
                }
            }

            // "A start tag whose tag name is "select""
            // "Parse error."
            // "If the stack of open elements does not have a select element in
            // select scope, ignore the token. (fragment case)"
            // "Otherwise: Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the
            // insertion mode appropriately."
            "select" => {
                self.parse_error("nested-select");
                let _ = self.close_select();
            }

            // "A start tag whose tag name is one of: "input", "keygen", "textarea""
            // "Parse error."
            // "If the stack of open elements does not have a select element in
            // select scope, ignore the token. (fragment case)"
            // "Otherwise: ... Reprocess the token."
            "input" | "keygen" | "textarea" => {
                self.parse_error("unexpected-start-tag-in-select");
                if self.close_select() {
                    self.process_token(token);
                }
            }

            // "A start tag whose tag name is one of: "script", "template""
            // "Process the token using the rules for the "in head" insertion mode."
            "script" | "template" => self.handle_in_head_mode(token),

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error("unexpected-start-tag-in-select"),
        }
    }

    /// "Pop elements from the stack of open elements until a select element
    /// has been popped from the stack. Reset the insertion mode
    /// appropriately." Returns false when there was no select in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_element_in_select_scope("select") {
            self.parse_error("unexpected-select-end-tag");
            return false;
        }
        self.pop_until_tag("select");
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        const TABLE_TAGS: &[&str] = &[
            "caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th",
        ];
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error."
            // "Pop elements from the stack of open elements until a select
            // element has been popped from the stack."
            // "Reset the insertion mode appropriately."
            // "Reprocess the token."
            Token::StartTag(tag) if TABLE_TAGS.contains(&tag.name.as_str()) => {
                self.parse_error("table-start-tag-in-select");
                self.pop_until_tag("select");
                self.reset_insertion_mode_appropriately();
                self.process_token(token);
            }

            // "An end tag whose tag name is one of: "caption", "table",
            // "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error."
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then ignore the token."
            // "Otherwise: ... Reprocess the token."
            Token::EndTag(tag) if TABLE_TAGS.contains(&tag.name.as_str()) => {
                self.parse_error("table-end-tag-in-select");
                if !self.has_element_in_table_scope(&tag.name) {
                    return;
                }
                self.pop_until_tag("select");
                self.reset_insertion_mode_appropriately();
                self.process_token(token);
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.handle_in_select_mode(token),
        }
    }

    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(super) fn handle_in_template_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "A comment token"
            // "A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character(_) | Token::Comment(_) | Token::Doctype(_) => {
                self.handle_in_body_mode(token);
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.handle_in_head_mode(token);
            }
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is one of: "caption", "colgroup",
            // "tbody", "tfoot", "thead""        -> "in table"
            // "A start tag whose tag name is "col""   -> "in column group"
            // "A start tag whose tag name is "tr""    -> "in table body"
            // "A start tag whose tag name is one of: "td", "th"" -> "in row"
            // "Any other start tag"                   -> "in body"
            //
            // Each entry: "Pop the current template insertion mode off the
            // stack of template insertion modes. Push X onto the stack of
            // template insertion modes so that it is the new current template
            // insertion mode. Switch the insertion mode to X, and reprocess
            // the token."
            Token::StartTag(tag) => {
                let mode = match tag.name.as_str() {
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => InsertionMode::InTable,
                    "col" => InsertionMode::InColumnGroup,
                    "tr" => InsertionMode::InTableBody,
                    "td" | "th" => InsertionMode::InRow,
                    _ => InsertionMode::InBody,
                };
                let _ = self.template_insertion_modes.pop();
                self.template_insertion_modes.push(mode);
                self.reprocess_in(mode, token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-in-template"),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if !self.stack_contains("template") {
                    self.stop_parsing();
                    return;
                }
                // "Otherwise, this is a parse error."
                self.parse_error("eof-in-template");
                // "Pop elements from the stack of open elements until a
                // template element has been popped from the stack."
                self.pop_until_tag("template");
                // "Clear the list of active formatting elements up to the last marker."
                self.clear_active_formatting_elements_to_last_marker();
                // "Pop the current template insertion mode off the stack of
                // template insertion modes."
                let _ = self.template_insertion_modes.pop();
                // "Reset the insertion mode appropriately."
                self.reset_insertion_mode_appropriately();
                // "Reprocess the token."
                self.process_token(token);
            }
        }
    }
}
