use strum_macros::Display;

use sawzall_common::warning::warn_once;
use sawzall_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::issue::{ParseIssue, ParseIssueKind};
use crate::tokenizer::{HTMLTokenizer, Tag, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list of active formatting elements... is used to handle mis-nested
/// formatting element tags."
#[derive(Debug, Clone)]
pub(super) enum ActiveFormattingElement {
    /// A formatting element together with the tag it was created for, kept
    /// so the element can be recreated by reconstruction or the adoption
    /// agency algorithm.
    Element {
        /// The element in the DOM tree.
        node_id: NodeId,
        /// "the token for which the element was created"
        tag: Tag,
    },
    /// "A marker is an entry in the list of active formatting elements that
    /// is distinct from any element."
    ///
    /// Pushed when entering applet, object, marquee, template, td, th and
    /// caption.
    Marker,
}

impl ActiveFormattingElement {
    pub(super) fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Element { node_id, .. } => Some(*node_id),
            Self::Marker => None,
        }
    }
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Builds a [`DomTree`] by pulling tokens lazily from an [`HTMLTokenizer`].
/// Scripting is treated as disabled, so `noscript` content is parsed as
/// markup.
pub struct HTMLParser {
    /// Token source. Tokens are pulled one at a time; the tokenizer switches
    /// into the raw text states on its own.
    pub(super) tokenizer: HTMLTokenizer,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    /// "the original insertion mode", used by the text and in table text modes.
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    /// "the stack of template insertion modes"
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element_pointer: Option<NodeId>,

    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// "The pending table character tokens list"
    pub(super) pending_table_character_tokens: Vec<char>,

    /// Set after `pre`, `listing` and `textarea` start tags: "If the next
    /// token is a U+000A LINE FEED (LF) character token, then ignore that
    /// token and move on to the next one."
    pub(super) ignore_next_line_feed: bool,

    /// [§ 7.1 Document modes](https://dom.spec.whatwg.org/#concept-document-quirks)
    ///
    /// Only the coarse quirks/no-quirks split is tracked; it decides whether
    /// `<table>` closes an open `<p>`.
    pub(super) quirks_mode: bool,

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    /// Local name of the fragment parsing context element, `None` when
    /// parsing a whole document.
    pub(super) context_element: Option<&'static str>,

    /// DOM tree under construction. `NodeId::ROOT` is the Document node.
    pub(super) tree: DomTree,

    /// Number of tokens pulled so far; used as the issue position.
    pub(super) token_index: usize,

    /// Set by "stop parsing".
    pub(super) stopped: bool,

    pub(super) issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a parser for a complete document.
    #[must_use]
    pub fn new(input: &str) -> Self {
        // DomTree::new() creates the Document node at NodeId::ROOT
        Self {
            tokenizer: HTMLTokenizer::new(input),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            foster_parenting: false,
            pending_table_character_tokens: Vec::new(),
            ignore_next_line_feed: false,
            quirks_mode: false,
            context_element: None,
            tree: DomTree::new(),
            token_index: 0,
            stopped: false,
            issues: Vec::new(),
        }
    }

    /// [§ 13.2.10 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Create a parser for a fragment with an implied `body` context
    /// element. The resulting tree has a single `html` element under the
    /// Document that directly contains the fragment's nodes.
    #[must_use]
    pub fn new_fragment(input: &str) -> Self {
        let mut parser = Self::new(input);
        parser.context_element = Some("body");

        // "Let root be a new html element with no attributes."
        // "Append the element root to the Document node created above."
        let root = parser
            .tree
            .alloc(NodeType::Element(ElementData::new("html", Vec::new())));
        parser.tree.append_child(NodeId::ROOT, root);

        // "Set up the parser's stack of open elements so that it contains
        // just the single element root."
        parser.stack_of_open_elements.push(root);

        // "Reset the parser's insertion mode appropriately."
        // With a body context this lands in "in body"; the tokenizer already
        // starts in the data state, which is what a body context requires.
        parser.reset_insertion_mode_appropriately();
        parser
    }

    /// Run the parser and return both the `DomTree` and every parse issue
    /// recorded by the tokenizer and the tree builder.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        while !self.stopped {
            let Some(token) = self.tokenizer.next() else {
                break;
            };
            self.token_index += 1;

            if self.ignore_next_line_feed {
                self.ignore_next_line_feed = false;
                if token == Token::Character('\n') {
                    continue;
                }
            }

            self.process_token(&token);
        }

        let mut issues = self.tokenizer.take_issues();
        issues.append(&mut self.issues);
        (self.tree, issues)
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Every token is handled by the rules of the current insertion mode;
    /// foreign content is parsed with the HTML rules.
    pub(super) fn process_token(&mut self, token: &Token) {
        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// "Switch the insertion mode to X and reprocess the token."
    pub(super) fn reprocess_in(&mut self, mode: InsertionMode, token: &Token) {
        self.insertion_mode = mode;
        self.process_token(token);
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Tree construction errors are recorded and parsing continues.
    pub(super) fn parse_error(&mut self, message: &str) {
        self.issues.push(ParseIssue::new(
            ParseIssueKind::TreeBuilder,
            message,
            self.token_index,
        ));
    }

    /// Record an unsupported construct once per process through the shared
    /// diagnostics channel, and as a parse issue on this document.
    pub(super) fn parse_warning(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.parse_error(message);
    }

    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// Tag name of the current node, if any.
    pub(super) fn current_node_name(&self) -> Option<&str> {
        self.current_node().and_then(|id| self.tree.tag_name(id))
    }

    /// Whether the current node is an element with one of `names`.
    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node_name()
            .is_some_and(|name| names.contains(&name))
    }

    /// Tag name of an arbitrary node.
    pub(super) fn tag_name_of(&self, id: NodeId) -> Option<&str> {
        self.tree.tag_name(id)
    }

    /// Whether any element named `name` is on the stack of open elements.
    pub(super) fn stack_contains(&self, name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| self.tag_name_of(id) == Some(name))
    }

    // =========================================================================
    // § 13.2.6.1 Creating and inserting nodes
    // =========================================================================

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target."
    ///
    /// Returns `(parent_id, Option<before_id>)`. When `before_id` is `Some`,
    /// the node goes immediately before it instead of at the end.
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> (NodeId, Option<NodeId>) {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the
        //          current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or(NodeId::ROOT);

        // STEP 2: "If foster parenting is enabled and target is a table,
        //          tbody, tfoot, thead, or tr element..."
        if self.foster_parenting
            && matches!(
                self.tag_name_of(target),
                Some("table" | "tbody" | "tfoot" | "thead" | "tr")
            )
        {
            return self.foster_parent_location();
        }

        // "Otherwise: Let adjusted insertion location be inside target, after
        // its last child (if any)."
        //
        // NOTE: template contents are not a separate fragment here; nodes
        // inside a template are ordinary children of the template element.
        (target, None)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    ///
    /// The foster parenting branch of "the appropriate place for inserting a
    /// node".
    fn foster_parent_location(&self) -> (NodeId, Option<NodeId>) {
        // "Let last template be the last template element in the stack of
        // open elements, if any."
        let last_template = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.tag_name_of(id) == Some("template"));

        // "Let last table be the last table element in the stack of open
        // elements, if any."
        let last_table = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.tag_name_of(id) == Some("table"));

        // "If there is a last template and either there is no last table, or
        // there is one, but last template is lower (more recently added) than
        // last table in the stack of open elements, then: let adjusted
        // insertion location be inside last template's template contents,
        // after its last child (if any), and abort these steps."
        if let Some(template_pos) = last_template
            && last_table.is_none_or(|table_pos| template_pos > table_pos)
        {
            return (self.stack_of_open_elements[template_pos], None);
        }

        match last_table {
            // "If there is no last table, then let adjusted insertion location
            // be inside the first element in the stack of open elements (the
            // html element), after its last child (if any), and abort these
            // steps. (fragment case)"
            None => (
                self.stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT),
                None,
            ),
            Some(table_pos) => {
                let table_id = self.stack_of_open_elements[table_pos];
                // "If last table has a parent node, then let adjusted
                // insertion location be inside last table's parent node,
                // immediately before last table, and abort these steps."
                if let Some(parent_id) = self.tree.parent(table_id) {
                    (parent_id, Some(table_id))
                } else {
                    // "Let previous element be the element immediately above
                    // last table in the stack of open elements."
                    let previous = table_pos
                        .checked_sub(1)
                        .map_or(NodeId::ROOT, |pos| self.stack_of_open_elements[pos]);
                    (previous, None)
                }
            }
        }
    }

    /// Insert `node` at a location computed by
    /// [`Self::appropriate_place_for_inserting`].
    pub(super) fn insert_at(&mut self, location: (NodeId, Option<NodeId>), node: NodeId) {
        match location {
            (parent, Some(reference)) => self.tree.insert_before(parent, node, reference),
            (parent, None) => self.tree.append_child(parent, node),
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token". The element is allocated but not
    /// attached anywhere.
    pub(super) fn create_element_for_tag(&mut self, tag: &Tag) -> NodeId {
        let attrs = tag
            .attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect();
        self.tree
            .alloc(NodeType::Element(ElementData::new(&tag.name, attrs)))
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// Create the element, insert it at the appropriate place and push it
    /// onto the stack of open elements.
    pub(super) fn insert_html_element(&mut self, tag: &Tag) -> NodeId {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let location = self.appropriate_place_for_inserting(None);
        // STEP 2: "Let element be the result of creating an element for the
        //          token..."
        let element_id = self.create_element_for_tag(tag);
        // STEP 3: "insert element at the adjusted insertion location"
        self.insert_at(location, element_id);
        // STEP 4: "Push element onto the stack of open elements so that it is
        //          the new current node."
        self.stack_of_open_elements.push(element_id);
        element_id
    }

    /// Insert an HTML element for a synthesized start tag with no attributes.
    pub(super) fn insert_html_element_named(&mut self, name: &str) -> NodeId {
        self.insert_html_element(&Tag::new(name))
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, c: char) {
        // STEP 2: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let (parent_id, before_id) = self.appropriate_place_for_inserting(None);

        // STEP 3: "If the adjusted insertion location is in a Document node,
        //          then return."
        if parent_id == NodeId::ROOT {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's
        //          data."
        let adjacent = match before_id {
            Some(reference) => self.tree.prev_sibling(reference),
            None => self.tree.last_child(parent_id),
        };
        if let Some(text_id) = adjacent
            && let Some(node) = self.tree.get_mut(text_id)
            && let NodeType::Text(data) = &mut node.node_type
        {
            data.push(c);
            return;
        }

        // "Otherwise, create a new Text node whose data is data ... and insert
        // the newly created node at the adjusted insertion location."
        let text_id = self.tree.alloc(NodeType::Text(String::from(c)));
        self.insert_at((parent_id, before_id), text_id);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let location = self.appropriate_place_for_inserting(None);
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.insert_at(location, comment_id);
    }

    /// "Insert a comment as the last child of" an explicit node, used for the
    /// Document and for the html element after the body has closed.
    pub(super) fn insert_comment_into(&mut self, parent: NodeId, data: &str) {
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(parent, comment_id);
    }

    /// Copy attributes from a repeated `html` or `body` start tag onto an
    /// existing element: "for each attribute on the token, check to see if
    /// the attribute is already present on the top element of the stack of
    /// open elements. If it is not, add the attribute and its corresponding
    /// value to that element."
    pub(super) fn merge_attributes(&mut self, target: NodeId, tag: &Tag) {
        if let Some(element) = self.tree.as_element_mut(target) {
            for attr in &tag.attributes {
                let _ = element.set_attribute(&attr.name, &attr.value);
            }
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// Shared tail of the generic raw text and generic RCDATA element parsing
    /// algorithms. The tokenizer switched itself into RAWTEXT or RCDATA when
    /// it emitted the start tag.
    pub(super) fn parse_text_only_element(&mut self, tag: &Tag) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(tag);
        // STEP 3: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);
        // STEP 4: "Switch the insertion mode to "text"."
        self.insertion_mode = InsertionMode::Text;
    }

    /// "Stop parsing."
    pub(super) const fn stop_parsing(&mut self) {
        self.stopped = true;
    }

    /// Whether this parser was created by the fragment parsing algorithm.
    pub(super) const fn is_fragment_case(&self) -> bool {
        self.context_element.is_some()
    }

    /// Whether an `svg` or `math` subtree is open. Those subtrees are parsed
    /// as HTML, but their self-closing flags are honoured so that `<path/>`
    /// does not swallow its siblings.
    pub(super) fn in_foreign_subtree(&self) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| matches!(self.tag_name_of(id), Some("svg" | "math")))
    }
}

/// Parse a complete HTML document.
///
/// Never fails: malformed markup is repaired by the tree construction rules
/// and each repair is recorded as a [`ParseIssue`]. The returned tree always
/// has an `html` document element.
#[must_use]
pub fn parse_document(input: &str) -> (DomTree, Vec<ParseIssue>) {
    HTMLParser::new(input).run_with_issues()
}

/// Parse an HTML fragment with an implied `body` context element.
///
/// The returned tree's document element is an `html` element whose children
/// are the fragment's top-level nodes; no `head` or `body` is synthesized.
#[must_use]
pub fn parse_fragment(input: &str) -> (DomTree, Vec<ParseIssue>) {
    HTMLParser::new_fragment(input).run_with_issues()
}

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.node_type {
            NodeType::Document => {
                println!("{prefix}Document");
            }
            NodeType::Doctype(doctype) => {
                println!("{prefix}<!DOCTYPE {}>", doctype.name);
            }
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                println!("{prefix}<!-- {data} -->");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_names(tree: &DomTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .iter()
            .filter_map(|&child| tree.tag_name(child).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_fragment_root_has_no_head_or_body() {
        let (tree, _) = parse_fragment("<p>one</p><p>two</p>");
        let html = tree.document_element().expect("html element");
        assert_eq!(child_names(&tree, html), vec!["p", "p"]);
    }

    #[test]
    fn test_document_synthesizes_head_and_body() {
        let (tree, _) = parse_document("hello");
        let html = tree.document_element().expect("html element");
        assert_eq!(child_names(&tree, html), vec!["head", "body"]);
    }

    #[test]
    fn test_leading_newline_in_pre_is_dropped() {
        let (tree, _) = parse_fragment("<pre>\nline</pre>");
        let html = tree.document_element().expect("html element");
        let pre = tree.children(html)[0];
        let text = tree.children(pre)[0];
        assert_eq!(tree.as_text(text), Some("line"));
    }

    #[test]
    fn test_adjacent_characters_share_one_text_node() {
        let (tree, _) = parse_fragment("<b>abc</b>");
        let html = tree.document_element().expect("html element");
        let b = tree.children(html)[0];
        assert_eq!(tree.children(b).len(), 1);
    }

    #[test]
    fn test_tree_builder_issues_use_token_positions() {
        let (_, issues) = parse_document("<p></div>");
        assert!(
            issues
                .iter()
                .any(|issue| issue.kind == ParseIssueKind::TreeBuilder && issue.position > 0)
        );
    }
}
