//! Algorithms shared by several insertion modes: the stack of open elements
//! and its scopes, implied end tags, resetting the insertion mode, the list
//! of active formatting elements and the adoption agency algorithm.

use sawzall_dom::NodeId;

use super::core::{ActiveFormattingElement, HTMLParser, InsertionMode};
use crate::tokenizer::Tag;

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// "The stack of open elements is said to have a particular element in scope
/// when it has that element in the specific scope consisting of the
/// following element types: applet, caption, html, table, td, th, marquee,
/// object, template"
///
/// NOTE: the MathML and SVG markers are omitted because foreign elements are
/// parsed as HTML elements.
const DEFAULT_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// "has an element in list item scope": default scope plus ol, ul.
const LIST_ITEM_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "ol",
    "ul",
];

/// "has an element in button scope": default scope plus button.
const BUTTON_SCOPE: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template", "button",
];

/// "has an element in table scope": html, table, template.
const TABLE_SCOPE: &[&str] = &["html", "table", "template"];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// "generate all implied end tags thoroughly"
const THOROUGH_IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// Heading elements, closed as a group.
pub(super) const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules...
/// they are collectively known as special elements."
pub(super) fn is_special_element(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "address"
            | "applet"
            | "area"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "bgsound"
            | "blockquote"
            | "body"
            | "br"
            | "button"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "iframe"
            | "img"
            | "input"
            | "keygen"
            | "li"
            | "link"
            | "listing"
            | "main"
            | "marquee"
            | "menu"
            | "meta"
            | "nav"
            | "noembed"
            | "noframes"
            | "noscript"
            | "object"
            | "ol"
            | "p"
            | "param"
            | "plaintext"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "select"
            | "source"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
            | "wbr"
            | "xmp"
    )
}

/// "The following HTML elements are those that end up in the list of active
/// formatting elements: a, b, big, code, em, font, i, nobr, s, small, strike,
/// strong, tt, and u."
pub(super) fn is_formatting_element(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

/// Noah's Ark comparison: "the same tag name, namespace, and attributes".
/// Attribute order does not matter.
fn same_element_signature(a: &Tag, b: &Tag) -> bool {
    a.name == b.name
        && a.attributes.len() == b.attributes.len()
        && a.attributes.iter().all(|attr| {
            b.attributes
                .iter()
                .any(|other| other.name == attr.name && other.value == attr.value)
        })
}

// =============================================================================
// Stack of open elements
// =============================================================================

impl HTMLParser {
    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// STEP 1: "Initialize node to be the current node (the bottommost node
    ///          of the stack)."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    ///
    /// `targets` lets one walk answer "h1, h2, h3, h4, h5, or h6 element in
    /// scope" style questions.
    ///
    /// The walk is linear in the depth of the stack when no scope marker sits
    /// above the target. Markup that keeps elements open without ever closing
    /// them, such as `<ul><li>` repeated thousands of times, pays this on every
    /// start tag that asks for a `p` in button scope, so parse time grows with
    /// the square of the nesting depth.
    fn has_element_in_specific_scope(&self, targets: &[&str], scope_markers: &[&str]) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if let Some(node_tag) = self.tag_name_of(node_id) {
                if targets.contains(&node_tag) {
                    return true;
                }
                if scope_markers.contains(&node_tag) {
                    return false;
                }
            }
        }
        false
    }

    /// "has an element in scope" (default scope).
    pub(super) fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], DEFAULT_SCOPE)
    }

    /// "has an element in scope" for any of several tag names.
    pub(super) fn has_any_element_in_scope(&self, tag_names: &[&str]) -> bool {
        self.has_element_in_specific_scope(tag_names, DEFAULT_SCOPE)
    }

    /// "has an element in button scope"
    pub(super) fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], BUTTON_SCOPE)
    }

    /// "has an element in list item scope"
    pub(super) fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], LIST_ITEM_SCOPE)
    }

    /// "has an element in table scope"
    pub(super) fn has_element_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], TABLE_SCOPE)
    }

    /// "has an element in table scope" for any of several tag names.
    pub(super) fn has_any_element_in_table_scope(&self, tag_names: &[&str]) -> bool {
        self.has_element_in_specific_scope(tag_names, TABLE_SCOPE)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope)
    ///
    /// "has an element in select scope": the scope consists of all element
    /// types except optgroup and option.
    pub(super) fn has_element_in_select_scope(&self, tag_name: &str) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            match self.tag_name_of(node_id) {
                Some(name) if name == tag_name => return true,
                Some("optgroup" | "option") => {}
                _ => return false,
            }
        }
        false
    }

    /// Scope check against a specific node rather than a tag name, as the
    /// adoption agency algorithm requires ("the element is not in scope").
    pub(super) fn has_node_in_scope(&self, target: NodeId) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if node_id == target {
                return true;
            }
            if self
                .tag_name_of(node_id)
                .is_some_and(|name| DEFAULT_SCOPE.contains(&name))
            {
                return false;
            }
        }
        false
    }

    /// Pop elements until one named `tag_name` has been popped.
    pub(super) fn pop_until_tag(&mut self, tag_name: &str) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.tag_name_of(id) == Some(tag_name) {
                break;
            }
        }
    }

    /// Pop elements until one whose name is in `tag_names` has been popped.
    pub(super) fn pop_until_one_of(&mut self, tag_names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self
                .tag_name_of(id)
                .is_some_and(|name| tag_names.contains(&name))
            {
                break;
            }
        }
    }

    /// Remove a specific node from the stack of open elements, wherever it is.
    pub(super) fn remove_from_stack(&mut self, node: NodeId) {
        self.stack_of_open_elements.retain(|&id| id != node);
    }

    /// Shared body of "clear the stack back to a table context", "... table
    /// body context" and "... table row context": "while the current node
    /// is not [one of `stop_at`], pop elements from the stack of open
    /// elements."
    fn clear_stack_back_to(&mut self, stop_at: &[&str]) {
        while let Some(&current) = self.stack_of_open_elements.last() {
            if self
                .tag_name_of(current)
                .is_some_and(|name| stop_at.contains(&name))
            {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the user agent must pop
    /// the current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// "If a step requires the user agent to generate implied end tags but
    /// lists an element to exclude from the process, then the user agent
    /// must perform the above steps as if that element was not in the above
    /// list."
    pub(super) fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        while let Some(current) = self.current_node_name() {
            if IMPLIED_END_TAG_ELEMENTS.contains(&current) && exclude != Some(current) {
                let _ = self.stack_of_open_elements.pop();
            } else {
                break;
            }
        }
    }

    /// "When the steps below require the UA to generate all implied end tags
    /// thoroughly..."
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(THOROUGH_IMPLIED_END_TAG_ELEMENTS) {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "When the steps above say the user agent is to close a p element, it
    /// means that the user agent must generate implied end tags, except for
    /// p elements. If the current node is not a p element, then this is a
    /// parse error. Pop elements from the stack of open elements until a p
    /// element has been popped from the stack."
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags_excluding(Some("p"));
        if self.current_node_name() != Some("p") {
            self.parse_error("unexpected-element-closing-p");
        }
        self.pop_until_tag("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element." The preamble of many in body start tags.
    pub(super) fn close_p_element_if_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_the_cell(&mut self) {
        // "Generate implied end tags."
        self.generate_implied_end_tags();
        // "If the current node is not now a td element or a th element, then
        // this is a parse error."
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.parse_error("unexpected-cell-end");
        }
        // "Pop elements from the stack of open elements stack until a td
        // element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // "Switch the insertion mode to "in row"."
        self.insertion_mode = InsertionMode::InRow;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];

            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            let tag = if last && let Some(context) = self.context_element {
                context
            } else {
                match self.tag_name_of(node_id) {
                    Some(name) => name,
                    None => continue,
                }
            };

            let mode = match tag {
                // STEP 4: "If node is a select element, run these substeps..."
                //         "...Loop: If ancestor is the first node in the stack
                //         of open elements, jump to the step below labeled
                //         done. If ancestor is a template node, jump to done.
                //         If ancestor is a table node, switch the insertion
                //         mode to "in select in table" and return."
                "select" => {
                    let in_table = !last
                        && self.stack_of_open_elements[..index]
                            .iter()
                            .rev()
                            .map(|&ancestor| self.tag_name_of(ancestor))
                            .take_while(|name| *name != Some("template"))
                            .any(|name| name == Some("table"));
                    if in_table {
                        InsertionMode::InSelectInTable
                    } else {
                        InsertionMode::InSelect
                    }
                }
                // STEP 5: "If node is a td or th element and last is false..."
                "td" | "th" if !last => InsertionMode::InCell,
                // STEP 6
                "tr" => InsertionMode::InRow,
                // STEP 7
                "tbody" | "thead" | "tfoot" => InsertionMode::InTableBody,
                // STEP 8
                "caption" => InsertionMode::InCaption,
                // STEP 9
                "colgroup" => InsertionMode::InColumnGroup,
                // STEP 10
                "table" => InsertionMode::InTable,
                // STEP 11: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode and return."
                "template" => self
                    .template_insertion_modes
                    .last()
                    .copied()
                    .unwrap_or(InsertionMode::InTemplate),
                // STEP 12: "If node is a head element and last is false..."
                "head" if !last => InsertionMode::InHead,
                // STEP 13
                "body" => InsertionMode::InBody,
                // STEP 14
                "frameset" => InsertionMode::InFrameset,
                // STEP 15: "If node is an html element..."
                "html" => {
                    if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    }
                }
                // STEP 16: "If last is true, then switch the insertion mode to
                //           "in body" and return."
                _ if last => InsertionMode::InBody,
                // STEP 17-18: move to the previous node and loop.
                _ => continue,
            };
            self.insertion_mode = mode;
            return;
        }
        self.insertion_mode = InsertionMode::InBody;
    }

    /// [§ 13.2.6.4.7 "in body" - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// 1. "Initialize node to be the current node (the bottommost node of the stack)."
    /// 2. "Loop: If node is an HTML element with the same tag name as the token, then:"
    ///    a. "Generate implied end tags, except for HTML elements with the same tag name
    ///    as the token."
    ///    b. "If node is not the current node, then this is a parse error."
    ///    c. "Pop all the nodes from the current node up to node, including node, then stop
    ///    these steps."
    /// 3. "Otherwise, if node is in the special category, then this is a parse error;
    ///    ignore the token, and return."
    /// 4. "Set node to the previous entry in the stack of open elements and return to
    ///    the step labeled loop."
    pub(super) fn any_other_end_tag(&mut self, tag_name: &str) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];
            let Some(node_tag) = self.tag_name_of(node_id) else {
                continue;
            };
            if node_tag == tag_name {
                self.generate_implied_end_tags_excluding(Some(tag_name));
                if self.current_node() != Some(node_id) {
                    self.parse_error("end-tag-closes-unclosed-elements");
                }
                self.stack_of_open_elements.truncate(index);
                return;
            }
            if is_special_element(node_tag) {
                self.parse_error("unexpected-end-tag");
                return;
            }
        }
    }
}

// =============================================================================
// List of active formatting elements
// =============================================================================

impl HTMLParser {
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// Includes the Noah's Ark clause: "If there are already three elements
    /// in the list of active formatting elements after the last marker, if
    /// any, or anywhere in the list if there are no markers, that have the
    /// same tag name, namespace, and attributes as element, then remove the
    /// earliest such element from the list of active formatting elements."
    pub(super) fn push_active_formatting_element(&mut self, node_id: NodeId, tag: &Tag) {
        let mut count = 0;
        let mut earliest_match_index = None;
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => break,
                ActiveFormattingElement::Element {
                    tag: entry_tag, ..
                } => {
                    if same_element_signature(entry_tag, tag) {
                        count += 1;
                        earliest_match_index = Some(index);
                    }
                }
            }
        }

        if count >= 3
            && let Some(index) = earliest_match_index
        {
            let _ = self.active_formatting_elements.remove(index);
        }

        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                tag: tag.clone(),
            });
    }

    /// "Insert a marker at the end of the list of active formatting elements."
    pub(super) fn push_active_formatting_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// Position of `node` in the list of active formatting elements.
    fn active_formatting_index_of(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements
            .iter()
            .position(|entry| entry.node_id() == Some(node))
    }

    /// Remove `node` from the list of active formatting elements, if present.
    pub(super) fn remove_active_formatting_element(&mut self, node: NodeId) {
        if let Some(index) = self.active_formatting_index_of(node) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }

    /// The last element named `tag_name` between the end of the list and the
    /// last marker.
    pub(super) fn active_formatting_element_after_last_marker(
        &self,
        tag_name: &str,
    ) -> Option<(usize, NodeId)> {
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element { node_id, tag } if tag.name == tag_name => {
                    return Some((index, *node_id));
                }
                ActiveFormattingElement::Element { .. } => {}
            }
        }
        None
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// This algorithm has two phases:
    /// - Rewind phase (steps 4-6): Walk backwards to find where to start
    /// - Create phase (steps 7-10): Walk forwards, creating elements
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there
        //          is nothing to reconstruct; stop this algorithm."
        match self.active_formatting_elements.last() {
            None | Some(ActiveFormattingElement::Marker) => return,
            Some(ActiveFormattingElement::Element { node_id, .. }) => {
                if self.stack_of_open_elements.contains(node_id) {
                    return;
                }
            }
        }

        // STEP 3: "Let entry be the last (most recently added) element in the
        //          list of active formatting elements."
        let mut entry_index = self.active_formatting_elements.len() - 1;

        // STEP 4-6: "Rewind: If there are no entries before entry in the list
        //            of active formatting elements, then jump to the step
        //            labeled create. Let entry be the entry one earlier than
        //            entry... If entry is neither a marker nor an element that
        //            is also in the stack of open elements, go to the step
        //            labeled rewind."
        while entry_index > 0 {
            let open = match &self.active_formatting_elements[entry_index - 1] {
                ActiveFormattingElement::Marker => true,
                ActiveFormattingElement::Element { node_id, .. } => {
                    self.stack_of_open_elements.contains(node_id)
                }
            };
            if open {
                break;
            }
            entry_index -= 1;
        }

        // STEP 7-10: "Advance... Create: Insert an HTML element for the token
        //             for which the element entry was created, to obtain new
        //             element. Replace the entry for entry in the list with an
        //             entry for new element. If the entry for new element in
        //             the list of active formatting elements is not the last
        //             entry in the list, return to the step labeled advance."
        while entry_index < self.active_formatting_elements.len() {
            if let ActiveFormattingElement::Element { tag, .. } =
                &self.active_formatting_elements[entry_index]
            {
                let tag = tag.clone();
                let new_element_id = self.insert_html_element(&tag);
                self.active_formatting_elements[entry_index] = ActiveFormattingElement::Element {
                    node_id: new_element_id,
                    tag,
                };
            }
            entry_index += 1;
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// 1. "Let entry be the last (most recently added) entry in the list."
    /// 2. "Remove entry from the list."
    /// 3. "If entry was a marker, stop. Otherwise, go to step 1."
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if matches!(entry, ActiveFormattingElement::Marker) {
                break;
            }
        }
    }
}

// =============================================================================
// Adoption agency algorithm
// =============================================================================

impl HTMLParser {
    /// [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// Repairs mis-nested formatting elements such as `<b><p>x</b>y`.
    pub(super) fn run_adoption_agency(&mut self, subject: &str) {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the
        //          stack of open elements and return."
        if let Some(current) = self.current_node()
            && self.tag_name_of(current) == Some(subject)
            && self.active_formatting_index_of(current).is_none()
        {
            let _ = self.stack_of_open_elements.pop();
            return;
        }

        // STEP 3-6: "Outer loop", at most eight times.
        for _ in 0..8 {
            // STEP 7: "Let formatting element be the last element in the list
            //          of active formatting elements that is between the end
            //          of the list and the last marker in the list, if any, or
            //          the start of the list otherwise, and has the tag name
            //          subject."
            // STEP 8: "If there is no such element, then return and instead
            //          act as described in the "any other end tag" entry."
            let Some((formatting_afl_index, formatting_element_id)) =
                self.active_formatting_element_after_last_marker(subject)
            else {
                self.any_other_end_tag(subject);
                return;
            };

            // STEP 9: "If formatting element is not in the stack of open
            //          elements, then this is a parse error; remove the
            //          element from the list, and return."
            let Some(formatting_stack_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == formatting_element_id)
            else {
                self.parse_error("adoption-agency-formatting-element-not-open");
                let _ = self.active_formatting_elements.remove(formatting_afl_index);
                return;
            };

            // STEP 10: "If formatting element is in the stack of open elements,
            //           but the element is not in scope, then this is a parse
            //           error; return."
            if !self.has_node_in_scope(formatting_element_id) {
                self.parse_error("adoption-agency-formatting-element-not-in-scope");
                return;
            }

            // STEP 11: "If formatting element is not the current node, this is
            //           a parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element_id) {
                self.parse_error("adoption-agency-misnested-formatting-element");
            }

            // STEP 12: "Let furthest block be the topmost node in the stack of
            //           open elements that is lower in the stack than
            //           formatting element, and is an element in the special
            //           category."
            let furthest_block_index = (formatting_stack_index + 1
                ..self.stack_of_open_elements.len())
                .find(|&index| {
                    self.tag_name_of(self.stack_of_open_elements[index])
                        .is_some_and(is_special_element)
                });

            // STEP 13: "If there is no furthest block, then the UA must first
            //           pop all the nodes from the bottom of the stack of open
            //           elements, from the current node up to and including
            //           formatting element, then remove formatting element
            //           from the list of active formatting elements, and
            //           finally return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.stack_of_open_elements.truncate(formatting_stack_index);
                let _ = self.active_formatting_elements.remove(formatting_afl_index);
                return;
            };
            let furthest_block_id = self.stack_of_open_elements[furthest_block_index];

            // STEP 14: "Let common ancestor be the element immediately above
            //           formatting element in the stack of open elements."
            let common_ancestor_id = match formatting_stack_index.checked_sub(1) {
                Some(index) => self.stack_of_open_elements[index],
                None => return,
            };

            // STEP 15: "Let a bookmark note the position of formatting element
            //           in the list of active formatting elements relative to
            //           the elements on either side of it in the list."
            let mut bookmark = formatting_afl_index;

            // STEP 16: "Let node and last node be furthest block."
            let mut node_stack_index = furthest_block_index;
            let mut last_node_id = furthest_block_id;

            // STEP 17-18: "Inner loop"
            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                // STEP 18.2: "Let node be the element immediately above node in
                //             the stack of open elements, or if node is no
                //             longer in the stack of open elements (e.g.
                //             because it got removed by this algorithm), the
                //             element that was immediately above node in the
                //             stack of open elements before node was removed."
                node_stack_index -= 1;
                let node_id = self.stack_of_open_elements[node_stack_index];

                // STEP 18.3: "If node is formatting element, then break."
                if node_id == formatting_element_id {
                    break;
                }

                // STEP 18.4: "If inner loop counter is greater than 3 and node
                //             is in the list of active formatting elements,
                //             then remove node from the list of active
                //             formatting elements."
                let mut node_afl_index = self.active_formatting_index_of(node_id);
                if inner_loop_counter > 3
                    && let Some(index) = node_afl_index
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if bookmark > index {
                        bookmark -= 1;
                    }
                    node_afl_index = None;
                }

                // STEP 18.5: "If node is not in the list of active formatting
                //             elements, then remove node from the stack of open
                //             elements and continue."
                //
                // After the removal, node_stack_index points at the element
                // that was below node; the decrement at the top of the loop
                // reaches the element that was above it.
                let Some(node_afl_index) = node_afl_index else {
                    let _ = self.stack_of_open_elements.remove(node_stack_index);
                    continue;
                };

                // STEP 18.6: "Create an element for the token for which the
                //             element node was created... replace the entry
                //             for node in the list of active formatting
                //             elements with an entry for the new element,
                //             replace the entry for node in the stack of open
                //             elements with an entry for the new element, and
                //             let node be the new element."
                let ActiveFormattingElement::Element { tag: node_tag, .. } =
                    &self.active_formatting_elements[node_afl_index]
                else {
                    break;
                };
                let node_tag = node_tag.clone();
                let new_element_id = self.create_element_for_tag(&node_tag);
                self.active_formatting_elements[node_afl_index] =
                    ActiveFormattingElement::Element {
                        node_id: new_element_id,
                        tag: node_tag,
                    };
                self.stack_of_open_elements[node_stack_index] = new_element_id;

                // STEP 18.7: "If last node is furthest block, then move the
                //             aforementioned bookmark to be immediately after
                //             the new node in the list of active formatting
                //             elements."
                if last_node_id == furthest_block_id {
                    bookmark = node_afl_index + 1;
                }

                // STEP 18.8: "Append last node to node."
                self.tree.append_child(new_element_id, last_node_id);

                // STEP 18.9: "Set last node to node."
                last_node_id = new_element_id;
            }

            // STEP 19: "Insert whatever last node ended up being in the
            //           previous step at the appropriate place for inserting a
            //           node, but using common ancestor as the override
            //           target."
            self.tree.detach(last_node_id);
            let location = self.appropriate_place_for_inserting(Some(common_ancestor_id));
            self.insert_at(location, last_node_id);

            // STEP 20: "Create an element for the token for which formatting
            //           element was created, with furthest block as the
            //           intended parent."
            let Some(ActiveFormattingElement::Element {
                tag: formatting_tag,
                ..
            }) = self
                .active_formatting_index_of(formatting_element_id)
                .map(|index| self.active_formatting_elements[index].clone())
            else {
                return;
            };
            let new_element_id = self.create_element_for_tag(&formatting_tag);

            // STEP 21: "Take all of the child nodes of furthest block and
            //           append them to the element created in the last step."
            self.tree.move_children(furthest_block_id, new_element_id);

            // STEP 22: "Append that new element to furthest block."
            self.tree.append_child(furthest_block_id, new_element_id);

            // STEP 23: "Remove formatting element from the list of active
            //           formatting elements, and insert the new element into
            //           the list of active formatting elements at the position
            //           of the aforementioned bookmark."
            if let Some(index) = self.active_formatting_index_of(formatting_element_id) {
                let _ = self.active_formatting_elements.remove(index);
                if bookmark > index {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert(
                bookmark,
                ActiveFormattingElement::Element {
                    node_id: new_element_id,
                    tag: formatting_tag,
                },
            );

            // STEP 24: "Remove formatting element from the stack of open
            //           elements, and insert the new element into the stack of
            //           open elements immediately below the position of
            //           furthest block in that stack."
            self.remove_from_stack(formatting_element_id);
            if let Some(position) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block_id)
            {
                self.stack_of_open_elements
                    .insert(position + 1, new_element_id);
            }
        }
    }
}
