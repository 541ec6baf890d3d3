//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use super::algorithms::{HEADINGS, is_formatting_element, is_special_element};
use super::core::{HTMLParser, InsertionMode};
use crate::tokenizer::{Tag, Token};

/// "A start tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "center", "details", "dialog", "dir", "div", "dl",
/// "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main",
/// "menu", "nav", "ol", "p", "search", "section", "summary", "ul""
const BLOCK_START_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// "An end tag whose tag name is one of: "address", "article", "aside",
/// "blockquote", "button", "center", "details", "dialog", "dir", "div",
/// "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
/// "listing", "main", "menu", "nav", "ol", "pre", "search", "section",
/// "summary", "ul""
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

/// Start tags processed "using the rules for the "in head" insertion mode".
const IN_HEAD_START_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "noframes", "script", "style", "template",
    "title",
];

/// Table structure start tags that are a parse error in body.
const IGNORED_TABLE_START_TAGS: &[&str] = &[
    "caption", "col", "colgroup", "frame", "head", "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// Elements whose open presence at EOF or `</body>` is not a parse error.
const CLOSABLE_AT_BODY_END: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

impl HTMLParser {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(super) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character('\0') => self.parse_error("unexpected-null-character"),

            // Whitespace: "Reconstruct the active formatting elements, if any.
            // Insert the token's character."
            Token::Character(c) if token.is_whitespace_character() => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*c);
            }

            // "Any other character token"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character(c) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*c);
                self.frameset_ok = false;
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment(data) => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            Token::StartTag(tag) => self.handle_in_body_start_tag(token, tag),
            Token::EndTag(tag) => self.handle_in_body_end_tag(token, tag),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty,
                // then process the token using the rules for the "in
                // template" insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    self.handle_in_template_mode(token);
                    return;
                }
                // "Otherwise, follow these steps: If there is a node in the
                // stack of open elements that is not either a dd element, a
                // dt element, an li element, ... then this is a parse error."
                if !self.stack_is_closable_at_body_end() {
                    self.parse_error("eof-with-unclosed-elements");
                }
                // "Stop parsing."
                self.stop_parsing();
            }
        }
    }

    fn stack_is_closable_at_body_end(&self) -> bool {
        self.stack_of_open_elements.iter().all(|&id| {
            self.tag_name_of(id)
                .is_some_and(|name| CLOSABLE_AT_BODY_END.contains(&name))
        })
    }

    fn handle_in_body_start_tag(&mut self, token: &Token, tag: &Tag) {
        match tag.name.as_str() {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.parse_error("unexpected-html-start-tag");
                // "If there is a template element on the stack of open
                // elements, then ignore the token."
                if self.stack_contains("template") {
                    return;
                }
                // "Otherwise, for each attribute on the token, check to see if
                // the attribute is already present on the top element of the
                // stack of open elements. If it is not, add the attribute and
                // its corresponding value to that element."
                if let Some(&html) = self.stack_of_open_elements.first() {
                    self.merge_attributes(html, tag);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Process the token using the rules for the "in head" insertion mode."
            name if IN_HEAD_START_TAGS.contains(&name) => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.parse_error("unexpected-body-start-tag");
                // "If the second element on the stack of open elements is not
                // a body element, if the stack of open elements has only one
                // node on it, or if there is a template element on the stack
                // of open elements, then ignore the token. (fragment case or
                // there is a template element on the stack)"
                let Some(&body) = self.stack_of_open_elements.get(1) else {
                    return;
                };
                if self.tag_name_of(body) != Some("body") || self.stack_contains("template") {
                    return;
                }
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                // each attribute on the token, check to see if the attribute
                // is already present on the body element (the second element)
                // on the stack of open elements, and if it is not, add the
                // attribute and its corresponding value to that element."
                self.frameset_ok = false;
                self.merge_attributes(body, tag);
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.parse_error("unexpected-frameset-start-tag");
                // "If the stack of open elements has only one node on it, or
                // if the second element on the stack of open elements is not
                // a body element, then ignore the token. (fragment case or
                // there is a template element on the stack)"
                let Some(&body) = self.stack_of_open_elements.get(1) else {
                    return;
                };
                if self.tag_name_of(body) != Some("body") {
                    return;
                }
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                if !self.frameset_ok {
                    return;
                }
                // "Otherwise, run the following steps:"
                // 1. "Remove the second element on the stack of open elements
                //    from its parent node, if it has one."
                self.tree.detach(body);
                // 2. "Pop all the nodes from the bottom of the stack of open
                //    elements, from the current node up to, but not including,
                //    the root html element."
                self.stack_of_open_elements.truncate(1);
                // 3. "Insert an HTML element for the token."
                let _ = self.insert_html_element(tag);
                // 4. "Switch the insertion mode to "in frameset"."
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "address", "article",
            // "aside", ..."
            // "If the stack of open elements has a p element in button scope,
            // then close a p element."
            // "Insert an HTML element for the token."
            name if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            name if HEADINGS.contains(&name) => {
                self.close_p_element_if_in_button_scope();
                // "If the current node is an HTML element whose tag name is
                // one of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a
                // parse error; pop the current node off the stack of open
                // elements."
                if self.current_node_is_one_of(HEADINGS) {
                    self.parse_error("nested-heading");
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one.
                // (Newlines at the start of pre blocks are ignored as an
                // authoring convenience.)"
                self.ignore_next_line_feed = true;
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                let template_open = self.stack_contains("template");
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is
                // a parse error; ignore the token."
                if self.form_element_pointer.is_some() && !template_open {
                    self.parse_error("nested-form");
                    return;
                }
                self.close_p_element_if_in_button_scope();
                let form = self.insert_html_element(tag);
                // "If there is no template element on the stack of open
                // elements, set the form element pointer to point to the
                // element created."
                if !template_open {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            // "A start tag whose tag name is one of: "dd", "dt""
            "li" | "dd" | "dt" => self.handle_list_item_start_tag(tag),

            // "A start tag whose tag name is "plaintext""
            // "If the stack of open elements has a p element in button scope,
            // then close a p element."
            // "Insert an HTML element for the token."
            // "Switch the tokenizer to the PLAINTEXT state." (already done by
            // the tokenizer itself)
            "plaintext" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "If the stack of open elements has a button element in
                // scope, then run these substeps: Parse error. Generate
                // implied end tags. Pop elements from the stack of open
                // elements until a button element has been popped from the
                // stack."
                if self.has_element_in_scope("button") {
                    self.parse_error("nested-button");
                    self.generate_implied_end_tags();
                    self.pop_until_tag("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption
                // agency algorithm for the token, then remove that element
                // from the list of active formatting elements and the stack of
                // open elements if the adoption agency algorithm didn't
                // already remove it (it might not have if the element is not
                // in table scope)."
                if let Some((_, existing)) = self.active_formatting_element_after_last_marker("a")
                {
                    self.parse_error("nested-anchor");
                    self.run_adoption_agency("a");
                    self.remove_active_formatting_element(existing);
                    self.remove_from_stack(existing);
                }
                // "Reconstruct the active formatting elements, if any."
                self.reconstruct_active_formatting_elements();
                // "Insert an HTML element for the token. Push onto the list of
                // active formatting elements that element."
                let element = self.insert_html_element(tag);
                self.push_active_formatting_element(element, tag);
            }

            // "A start tag whose tag name is one of: "b", "big", "code",
            // "em", "font", "i", "s", "small", "strike", "strong", "tt", "u""
            "b" | "big" | "code" | "em" | "font" | "i" | "s" | "small" | "strike" | "strong"
            | "tt" | "u" => {
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(tag);
                self.push_active_formatting_element(element, tag);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                // then this is a parse error; run the adoption agency
                // algorithm for the token, then once again reconstruct the
                // active formatting elements, if any."
                if self.has_element_in_scope("nobr") {
                    self.parse_error("nested-nobr");
                    self.run_adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                let element = self.insert_html_element(tag);
                self.push_active_formatting_element(element, tag);
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Insert a marker at the end of the list of active formatting elements."
            // "Set the frameset-ok flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                self.push_active_formatting_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a
                // p element."
                if !self.quirks_mode {
                    self.close_p_element_if_in_button_scope();
                }
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            // "img", "keygen", "wbr""
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(tag);
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // set the frameset-ok flag to "not ok"."
                let hidden = tag
                    .attribute("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden"));
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            "param" | "source" | "track" => self.insert_void_element(tag),

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_element_if_in_button_scope();
                self.insert_void_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            "image" => {
                self.parse_error("image-start-tag");
                let renamed = Tag {
                    name: "img".to_string(),
                    ..tag.clone()
                };
                self.process_token(&Token::StartTag(renamed));
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                let _ = self.insert_html_element(tag);
                self.ignore_next_line_feed = true;
                self.original_insertion_mode = Some(self.insertion_mode);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::Text;
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_element_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_only_element(tag);
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_only_element(tag);
            }

            // "A start tag whose tag name is "noembed""
            // "Follow the generic raw text element parsing algorithm."
            //
            // `noscript` is not listed: scripting is disabled, so it falls
            // through to "any other start tag".
            "noembed" => self.parse_text_only_element(tag),

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption",
                // "in table body", "in row", or "in cell", then switch the
                // insertion mode to "in select in table". Otherwise, switch
                // the insertion mode to "in select"."
                self.insertion_mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            "optgroup" | "option" => {
                if self.current_node_name() == Some("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags();
                    if self.current_node_name() != Some("ruby") {
                        self.parse_error("misnested-ruby-annotation");
                    }
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags_excluding(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.parse_error("misnested-ruby-annotation");
                    }
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "math"" / "svg""
            //
            // Foreign content is not modelled; the subtree is kept as HTML
            // elements with lowercased names.
            "math" | "svg" => {
                self.parse_warning(&format!(
                    "<{}> is parsed as HTML; foreign content is not supported",
                    tag.name
                ));
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                if tag.self_closing {
                    let _ = self.stack_of_open_elements.pop();
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            // "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            // "thead", "tr""
            // "Parse error. Ignore the token."
            name if IGNORED_TABLE_START_TAGS.contains(&name) => {
                self.parse_error("unexpected-start-tag-in-body");
            }

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                if tag.self_closing && self.in_foreign_subtree() {
                    let _ = self.stack_of_open_elements.pop();
                }
            }
        }
    }

    /// "Insert an HTML element for the token. Immediately pop the current
    /// node off the stack of open elements. Acknowledge the token's
    /// self-closing flag, if it is set."
    fn insert_void_element(&mut self, tag: &Tag) {
        let _ = self.insert_html_element(tag);
        let _ = self.stack_of_open_elements.pop();
    }

    /// "A start tag whose tag name is "li"" and
    /// "A start tag whose tag name is one of: "dd", "dt""
    fn handle_list_item_start_tag(&mut self, tag: &Tag) {
        // 1. "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // An li closes an open li; dd and dt close either one.
        let closes: &[&str] = if tag.name == "li" {
            &["li"]
        } else {
            &["dd", "dt"]
        };

        // 2. "Initialize node to be the current node (the bottommost node of
        //    the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let Some(name) = self.tag_name_of(self.stack_of_open_elements[index]) else {
                continue;
            };
            // 3. "Loop: If node is an li element, then run these substeps:
            //    Generate implied end tags, except for li elements. If the
            //    current node is not an li element, then this is a parse
            //    error. Pop elements from the stack of open elements until an
            //    li element has been popped from the stack. Jump to the step
            //    below labeled done."
            if closes.contains(&name) {
                let name = name.to_string();
                self.generate_implied_end_tags_excluding(Some(&name));
                if self.current_node_name() != Some(name.as_str()) {
                    self.parse_error("unclosed-list-item");
                }
                self.pop_until_tag(&name);
                break;
            }
            // 4. "If node is in the special category, but is not an address,
            //    div, or p element, then jump to the step below labeled done."
            if is_special_element(name) && !matches!(name, "address" | "div" | "p") {
                break;
            }
            // 5. "Otherwise, set node to the previous entry in the stack of
            //    open elements and return to the step labeled loop."
        }

        // 6. "Done: If the stack of open elements has a p element in button
        //    scope, then close a p element."
        self.close_p_element_if_in_button_scope();
        // 7. "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(tag);
    }

    fn handle_in_body_end_tag(&mut self, token: &Token, tag: &Tag) {
        match tag.name.as_str() {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            "template" => self.handle_in_head_mode(token),

            // "An end tag whose tag name is "body""
            "body" => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body") {
                    self.parse_error("unexpected-body-end-tag");
                    return;
                }
                if !self.stack_is_closable_at_body_end() {
                    self.parse_error("body-end-with-unclosed-elements");
                }
                // "Switch the insertion mode to "after body"."
                self.insertion_mode = InsertionMode::AfterBody;
            }

            // "An end tag whose tag name is "html""
            "html" => {
                // "If the stack of open elements does not have a body element
                // in scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body") {
                    self.parse_error("unexpected-html-end-tag");
                    return;
                }
                // "Switch the insertion mode to "after body"."
                // "Reprocess the token."
                self.reprocess_in(InsertionMode::AfterBody, token);
            }

            // "An end tag whose tag name is one of: "address", "article", ..."
            name if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element with the same tag name as that
                // of the token, then this is a parse error; ignore the token."
                if !self.has_element_in_scope(name) {
                    self.parse_error("unexpected-end-tag");
                    return;
                }
                // "Generate implied end tags."
                self.generate_implied_end_tags();
                // "If the current node is not an HTML element with the same
                // tag name as that of the token, then this is a parse error."
                if self.current_node_name() != Some(name) {
                    self.parse_error("end-tag-closes-unclosed-elements");
                }
                // "Pop elements from the stack of open elements until an HTML
                // element with the same tag name as the token has been popped
                // from the stack."
                self.pop_until_tag(name);
            }

            // "An end tag whose tag name is "form""
            "form" => self.handle_form_end_tag(),

            // "An end tag whose tag name is "p""
            // "If the stack of open elements does not have a p element in
            // button scope, then this is a parse error; insert an HTML element
            // for a "p" start tag token with no attributes."
            // "Close a p element."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error("unexpected-p-end-tag");
                    let _ = self.insert_html_element_named("p");
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                if !self.has_element_in_list_item_scope("li") {
                    self.parse_error("unexpected-li-end-tag");
                    return;
                }
                self.close_element_with_implied_end_tags("li");
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if !self.has_element_in_scope(&tag.name) {
                    self.parse_error("unexpected-end-tag");
                    return;
                }
                self.close_element_with_implied_end_tags(&tag.name);
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            // "h5", "h6""
            name if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.has_any_element_in_scope(HEADINGS) {
                    self.parse_error("unexpected-heading-end-tag");
                    return;
                }
                self.generate_implied_end_tags();
                if self.current_node_name() != Some(name) {
                    self.parse_error("end-tag-closes-unclosed-elements");
                }
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            // "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            // "tt", "u""
            // "Run the adoption agency algorithm for the token."
            name if is_formatting_element(name) => self.run_adoption_agency(name),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            // "object""
            "applet" | "marquee" | "object" => {
                if !self.has_element_in_scope(&tag.name) {
                    self.parse_error("unexpected-end-tag");
                    return;
                }
                self.generate_implied_end_tags();
                if self.current_node_name() != Some(tag.name.as_str()) {
                    self.parse_error("end-tag-closes-unclosed-elements");
                }
                self.pop_until_tag(&tag.name);
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br"
            // start tag token with no attributes, rather than the end tag
            // token that it actually is."
            "br" => {
                self.parse_error("unexpected-br-end-tag");
                self.handle_in_body_start_tag(token, &Tag::new("br"));
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(&tag.name),
        }
    }

    /// "An end tag whose tag name is "form""
    fn handle_form_end_tag(&mut self) {
        // "If there is no template element on the stack of open elements,
        // then run these substeps:"
        if !self.stack_contains("template") {
            // 1. "Let node be the element that the form element pointer is set to, or null."
            // 2. "Set the form element pointer to null."
            let node = self.form_element_pointer.take();
            // 3. "If node is null or if the stack of open elements does not
            //    have node in scope, then this is a parse error; return and
            //    ignore the token."
            let Some(node) = node else {
                self.parse_error("unexpected-form-end-tag");
                return;
            };
            if !self.has_node_in_scope(node) {
                self.parse_error("unexpected-form-end-tag");
                return;
            }
            // 4. "Generate implied end tags."
            self.generate_implied_end_tags();
            // 5. "If the current node is not node, then this is a parse error."
            if self.current_node() != Some(node) {
                self.parse_error("end-tag-closes-unclosed-elements");
            }
            // 6. "Remove node from the stack of open elements."
            self.remove_from_stack(node);
            return;
        }

        // "If there is a template element on the stack of open elements,
        // then run these substeps instead:"
        if !self.has_element_in_scope("form") {
            self.parse_error("unexpected-form-end-tag");
            return;
        }
        self.generate_implied_end_tags();
        if self.current_node_name() != Some("form") {
            self.parse_error("end-tag-closes-unclosed-elements");
        }
        self.pop_until_tag("form");
    }

    /// "Generate implied end tags, except for HTML elements with the same tag
    /// name as the token. If the current node is not an HTML element with the
    /// same tag name as that of the token, then this is a parse error. Pop
    /// elements from the stack of open elements until an HTML element with
    /// the same tag name as the token has been popped from the stack."
    fn close_element_with_implied_end_tags(&mut self, tag_name: &str) {
        self.generate_implied_end_tags_excluding(Some(tag_name));
        if self.current_node_name() != Some(tag_name) {
            self.parse_error("end-tag-closes-unclosed-elements");
        }
        self.pop_until_tag(tag_name);
    }
}
