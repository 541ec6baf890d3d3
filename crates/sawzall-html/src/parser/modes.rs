//! The document-level insertion modes: everything outside "in body" and the
//! table/select/template families.

use sawzall_dom::{DoctypeData, NodeId, NodeType};

use super::core::{HTMLParser, InsertionMode};
use crate::tokenizer::{Doctype, Tag, Token};

/// [§ 13.2.6.4.1](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
///
/// A coarse version of the quirks mode test: a missing DOCTYPE, a DOCTYPE
/// with the force-quirks flag, or a name other than `html`. The public
/// identifier prefix tables are not consulted.
fn doctype_triggers_quirks(doctype: &Doctype) -> bool {
    doctype.force_quirks || doctype.name.as_deref() != Some("html")
}

impl HTMLParser {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            t if t.is_whitespace_character() => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment(data) => self.insert_comment_into(NodeId::ROOT, data),

            // "A DOCTYPE token"
            // "Append a DocumentType node to the Document node, with its name
            // set to the name given in the DOCTYPE token, or the empty string
            // if the name was missing; its public ID set to the public
            // identifier given in the DOCTYPE token, or the empty string if
            // the public identifier was missing; and its system ID set to the
            // system identifier given in the DOCTYPE token, or the empty
            // string if the system identifier was missing."
            Token::Doctype(doctype) => {
                if doctype.name.as_deref() != Some("html")
                    || doctype.public_identifier.is_some()
                    || doctype
                        .system_identifier
                        .as_deref()
                        .is_some_and(|id| id != "about:legacy-compat")
                {
                    self.parse_error("unexpected-doctype");
                }
                let node = self.tree.alloc(NodeType::Doctype(DoctypeData {
                    name: doctype.name.clone().unwrap_or_default(),
                    public_id: doctype.public_identifier.clone().unwrap_or_default(),
                    system_id: doctype.system_identifier.clone().unwrap_or_default(),
                }));
                self.tree.append_child(NodeId::ROOT, node);
                self.quirks_mode = doctype_triggers_quirks(doctype);
                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is
            // a parse error; if the parser cannot change the mode flag is
            // false, set the Document to quirks mode."
            // "In any case, switch the insertion mode to "before html", then
            // reprocess the token."
            _ => {
                self.parse_error("missing-doctype");
                self.quirks_mode = true;
                self.reprocess_in(InsertionMode::BeforeHtml, token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment(data) => self.insert_comment_into(NodeId::ROOT, data),

            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            t if t.is_whitespace_character() => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document
            // object. Put this element in the stack of open elements."
            // "Switch the insertion mode to "before head"."
            Token::StartTag(tag) if tag.name == "html" => {
                let html = self.create_element_for_tag(tag);
                self.tree.append_child(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html);
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag(tag) if matches!(tag.name.as_str(), "head" | "body" | "html" | "br") => {
                self.handle_before_html_anything_else(token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-before-html"),

            // "Anything else"
            _ => self.handle_before_html_anything_else(token),
        }
    }

    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of
    /// open elements."
    /// "Switch the insertion mode to "before head", then reprocess the token."
    fn handle_before_html_anything_else(&mut self, token: &Token) {
        let html = self.create_element_for_tag(&Tag::new("html"));
        self.tree.append_child(NodeId::ROOT, html);
        self.stack_of_open_elements.push(html);
        self.reprocess_in(InsertionMode::BeforeHead, token);
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            // Whitespace: "Ignore the token."
            t if t.is_whitespace_character() => {}

            // "A comment token"
            // "Insert a comment."
            Token::Comment(data) => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag(tag) if tag.name == "head" => {
                let head = self.insert_html_element(tag);
                self.head_element_pointer = Some(head);
                self.insertion_mode = InsertionMode::InHead;
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag(tag) if matches!(tag.name.as_str(), "head" | "body" | "html" | "br") => {
                self.handle_before_head_anything_else(token);
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-before-head"),

            // "Anything else"
            _ => self.handle_before_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "head" start tag token with no attributes."
    /// "Set the head element pointer to the newly created head element."
    /// "Switch the insertion mode to "in head"."
    /// "Reprocess the current token."
    fn handle_before_head_anything_else(&mut self, token: &Token) {
        let head = self.insert_html_element_named("head");
        self.head_element_pointer = Some(head);
        self.reprocess_in(InsertionMode::InHead, token);
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "Insert the character."
            Token::Character(c) if token.is_whitespace_character() => self.insert_character(*c),

            // "A comment token"
            // "Insert a comment."
            Token::Comment(data) => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            // "A start tag whose tag name is "meta""
            // Same, plus encoding sniffing which does not apply to strings.
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "base" | "basefont" | "bgsound" | "link" | "meta"
                ) =>
            {
                let _ = self.insert_html_element(tag);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            //
            // "A start tag whose tag name is "noframes", "style""
            // "Follow the generic raw text element parsing algorithm."
            //
            // "A start tag whose tag name is "script""
            // The script element is inserted like any other and the parser
            // waits in the "text" insertion mode for its end tag.
            Token::StartTag(tag)
                if matches!(tag.name.as_str(), "title" | "noframes" | "style" | "script") =>
            {
                self.parse_text_only_element(tag);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            // is disabled"
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in head noscript"."
            Token::StartTag(tag) if tag.name == "noscript" => {
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InHeadNoscript;
            }

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the
            // stack of open elements."
            // "Switch the insertion mode to "after head"."
            Token::EndTag(tag) if tag.name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
            }

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag(tag) if matches!(tag.name.as_str(), "body" | "html" | "br") => {
                self.handle_in_head_anything_else(token);
            }

            // "A start tag whose tag name is "template""
            Token::StartTag(tag) if tag.name == "template" => {
                // "Insert an HTML element for the token."
                let _ = self.insert_html_element(tag);
                // "Insert a marker at the end of the list of active
                // formatting elements."
                self.push_active_formatting_marker();
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // "Switch the insertion mode to "in template"."
                // "Push "in template" onto the stack of template insertion
                // modes so that it is the new current template insertion mode."
                self.insertion_mode = InsertionMode::InTemplate;
                self.template_insertion_modes
                    .push(InsertionMode::InTemplate);
            }

            // "An end tag whose tag name is "template""
            Token::EndTag(tag) if tag.name == "template" => {
                // "If there is no template element on the stack of open
                // elements, then this is a parse error; ignore the token."
                if !self.stack_contains("template") {
                    self.parse_error("unexpected-template-end-tag");
                    return;
                }
                // "Generate all implied end tags thoroughly."
                self.generate_all_implied_end_tags_thoroughly();
                // "If the current node is not a template element, then this
                // is a parse error."
                if self.current_node_name() != Some("template") {
                    self.parse_error("unclosed-elements-in-template");
                }
                // "Pop elements from the stack of open elements until a
                // template element has been popped from the stack."
                self.pop_until_tag("template");
                // "Clear the list of active formatting elements up to the
                // last marker."
                self.clear_active_formatting_elements_to_last_marker();
                // "Pop the current template insertion mode off the stack of
                // template insertion modes."
                let _ = self.template_insertion_modes.pop();
                // "Reset the insertion mode appropriately."
                self.reset_insertion_mode_appropriately();
            }

            // "A start tag whose tag name is "head""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag(tag) if tag.name == "head" => {
                self.parse_error("unexpected-head-start-tag");
            }
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-in-head"),

            // "Anything else"
            _ => self.handle_in_head_anything_else(token),
        }
    }

    /// "Pop the current node (which will be the head element) off the stack
    /// of open elements."
    /// "Switch the insertion mode to "after head"."
    /// "Reprocess the token."
    fn handle_in_head_anything_else(&mut self, token: &Token) {
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::AfterHead, token);
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from
            // the stack of open elements; the new current node will be a head
            // element."
            // "Switch the insertion mode to "in head"."
            Token::EndTag(tag) if tag.name == "noscript" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::InHead;
            }

            // Whitespace, comments, and "A start tag whose tag name is one of:
            // "basefont", "bgsound", "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::Comment(_) => self.handle_in_head_mode(token),
            t if t.is_whitespace_character() => self.handle_in_head_mode(token),
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.handle_in_head_mode(token);
            }

            // "An end tag whose tag name is "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag(tag) if tag.name == "br" => {
                self.handle_in_head_noscript_anything_else(token);
            }

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "head" | "noscript") => {
                self.parse_error("unexpected-start-tag-in-noscript");
            }
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-in-noscript"),

            // "Anything else"
            _ => self.handle_in_head_noscript_anything_else(token),
        }
    }

    /// "Parse error."
    /// "Pop the current node (which will be a noscript element) from the
    /// stack of open elements; the new current node will be a head element."
    /// "Switch the insertion mode to "in head"."
    /// "Reprocess the token."
    fn handle_in_head_noscript_anything_else(&mut self, token: &Token) {
        self.parse_error("unexpected-token-in-noscript");
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::InHead, token);
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            // Whitespace: "Insert the character."
            Token::Character(c) if token.is_whitespace_character() => self.insert_character(*c),

            // "A comment token"
            // "Insert a comment."
            Token::Comment(data) => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "in body"."
            Token::StartTag(tag) if tag.name == "body" => {
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InBody;
            }

            // "A start tag whose tag name is "frameset""
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in frameset"."
            Token::StartTag(tag) if tag.name == "frameset" => {
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            // "bgsound", "link", "meta", "noframes", "script", "style",
            // "template", "title""
            // "Parse error."
            // "Push the node pointed to by the head element pointer onto the
            // stack of open elements."
            // "Process the token using the rules for the "in head" insertion mode."
            // "Remove the node pointed to by the head element pointer from the
            // stack of open elements. (It might not be the current node at
            // this point.)"
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
                self.parse_error("unexpected-start-tag-after-head");
                let Some(head) = self.head_element_pointer else {
                    self.handle_in_head_mode(token);
                    return;
                };
                self.stack_of_open_elements.push(head);
                self.handle_in_head_mode(token);
                self.remove_from_stack(head);
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag(tag) if matches!(tag.name.as_str(), "body" | "html" | "br") => {
                self.handle_after_head_anything_else(token);
            }

            // "A start tag whose tag name is "head""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag(tag) if tag.name == "head" => {
                self.parse_error("unexpected-head-start-tag");
            }
            Token::EndTag(_) => self.parse_error("unexpected-end-tag-after-head"),

            // "Anything else"
            _ => self.handle_after_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "body" start tag token with no attributes."
    /// "Switch the insertion mode to "in body"."
    /// "Reprocess the current token."
    fn handle_after_head_anything_else(&mut self, token: &Token) {
        let _ = self.insert_html_element_named("body");
        self.reprocess_in(InsertionMode::InBody, token);
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character(c) => self.insert_character(*c),

            // "An end-of-file token"
            // "Parse error."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            Token::EndOfFile => {
                self.parse_error("eof-in-text");
                let _ = self.stack_of_open_elements.pop();
                let mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
                self.reprocess_in(mode, token);
            }

            // "An end tag whose tag name is "script""
            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            //
            // Scripts are never executed, so both entries collapse.
            Token::EndTag(_) => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
            }

            // The tokenizer only produces characters and end tags while in a
            // raw text state; anything else is dropped.
            _ => {}
        }
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // Whitespace: "Process the token using the rules for the "in body"
            // insertion mode."
            t if t.is_whitespace_character() => self.handle_in_body_mode(token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment(data) => {
                if let Some(&html) = self.stack_of_open_elements.first() {
                    self.insert_comment_into(html, data);
                }
            }

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "If the parser was created as part of the HTML fragment parsing
            // algorithm, this is a parse error; ignore the token. (fragment
            // case)"
            // "Otherwise, switch the insertion mode to "after after body"."
            Token::EndTag(tag) if tag.name == "html" => {
                if self.is_fragment_case() {
                    self.parse_error("unexpected-html-end-tag-in-fragment");
                } else {
                    self.insertion_mode = InsertionMode::AfterAfterBody;
                }
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.parse_error("unexpected-token-after-body");
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            // Whitespace: "Insert the character."
            Token::Character(c) if token.is_whitespace_character() => self.insert_character(*c),

            // "A comment token"
            // "Insert a comment."
            Token::Comment(data) => self.insert_comment(data),

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "frameset""
            // "Insert an HTML element for the token."
            Token::StartTag(tag) if tag.name == "frameset" => {
                let _ = self.insert_html_element(tag);
            }

            // "An end tag whose tag name is "frameset""
            Token::EndTag(tag) if tag.name == "frameset" => {
                // "If the current node is the root html element, then this is
                // a parse error; ignore the token. (fragment case)"
                if self.current_node_name() == Some("html") {
                    self.parse_error("unexpected-frameset-end-tag");
                    return;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements."
                let _ = self.stack_of_open_elements.pop();
                // "If the parser was not created as part of the HTML fragment
                // parsing algorithm (fragment case), and the current node is
                // no longer a frameset element, then switch the insertion
                // mode to "after frameset"."
                if !self.is_fragment_case() && self.current_node_name() != Some("frameset") {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
            }

            // "A start tag whose tag name is "frame""
            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements."
            Token::StartTag(tag) if tag.name == "frame" => {
                let _ = self.insert_html_element(tag);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::StartTag(tag) if tag.name == "noframes" => self.handle_in_head_mode(token),

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is
            // a parse error."
            // "Stop parsing."
            Token::EndOfFile => {
                if self.current_node_name() != Some("html") {
                    self.parse_error("eof-in-frameset");
                }
                self.stop_parsing();
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error("unexpected-token-in-frameset"),
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if token.is_whitespace_character() => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error("unexpected-doctype"),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag(tag) if tag.name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
            }

            Token::StartTag(tag) if tag.name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error("unexpected-token-after-frameset"),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment(data) => self.insert_comment_into(NodeId::ROOT, data),

            // "A DOCTYPE token"
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE"
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype(_) => self.handle_in_body_mode(token),
            t if t.is_whitespace_character() => self.handle_in_body_mode(token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stop_parsing(),

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.parse_error("unexpected-token-after-after-body");
                self.reprocess_in(InsertionMode::InBody, token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment(data) => self.insert_comment_into(NodeId::ROOT, data),
            Token::Doctype(_) => self.handle_in_body_mode(token),
            t if t.is_whitespace_character() => self.handle_in_body_mode(token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),
            Token::EndOfFile => self.stop_parsing(),
            Token::StartTag(tag) if tag.name == "noframes" => self.handle_in_head_mode(token),

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.parse_error("unexpected-token-after-after-frameset"),
        }
    }
}
