//! Matching selectors against a [`DomTree`] and running queries.
//!
//! [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
//!
//! Complex selectors are matched right to left: the subject compound is
//! tested against the candidate, then the combinator chain is walked through
//! ancestors and preceding siblings. Descendant and subsequent-sibling
//! combinators backtrack, so `div > p span` matches whenever some ancestor
//! chain satisfies it, not only the nearest one.

use sawzall_dom::{DomTree, ElementData, NodeId, NodeType};

use super::{
    AttributeOperator, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    PseudoClass, SelectorList, SimpleSelector,
};

impl SelectorList {
    /// Returns true if the element `id` matches any selector in the list.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|complex| complex.matches(tree, id))
    }
}

impl ComplexSelector {
    /// Returns true if the element `id` is represented by this selector.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        compound_matches(&self.subject, tree, id) && chain_matches(&self.combinators, tree, id)
    }
}

/// Query a subtree.
///
/// Visits the descendants of `scope` in tree order (pre-order), plus `scope`
/// itself when `include_scope` is set, and returns every element that
/// matches `list`. Each element appears once, in document order.
///
/// Combinators may look outside `scope`: `div p` run on a `p`'s parent
/// section still matches when the `div` is further up, as with
/// `querySelectorAll`.
#[must_use]
pub fn select(
    tree: &DomTree,
    scope: NodeId,
    list: &SelectorList,
    include_scope: bool,
) -> Vec<NodeId> {
    let scope_itself = include_scope.then_some(scope);
    scope_itself
        .into_iter()
        .chain(tree.descendants(scope))
        .filter(|&id| tree.as_element(id).is_some() && list.matches(tree, id))
        .collect()
}

/// [§ 15 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// `chain` holds (combinator, compound) pairs walking left from the element
/// `id`, which has already matched the compound to the right of the first
/// combinator.
fn chain_matches(chain: &[(Combinator, CompoundSelector)], tree: &DomTree, id: NodeId) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };

    let candidate_matches = |candidate: NodeId| {
        compound_matches(compound, tree, candidate) && chain_matches(rest, tree, candidate)
    };

    match combinator {
        // "an element B that is an arbitrary descendant of some ancestor
        // element A"
        Combinator::Descendant => tree.ancestors(id).any(candidate_matches),

        // "an element B that is a direct child of element A"
        Combinator::Child => tree.parent(id).is_some_and(candidate_matches),

        // "an element B that immediately follows element A". Only element
        // siblings count.
        Combinator::NextSibling => previous_element_sibling(tree, id).is_some_and(candidate_matches),

        // "an element B that follows element A (not necessarily immediately)"
        Combinator::SubsequentSibling => tree
            .preceding_siblings(id)
            .filter(|&sibling| tree.as_element(sibling).is_some())
            .any(candidate_matches),
    }
}

fn previous_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    tree.preceding_siblings(id)
        .find(|&sibling| tree.as_element(sibling).is_some())
}

/// Every simple selector in `compound` matches `id`. Non-elements never
/// match.
fn compound_matches(compound: &CompoundSelector, tree: &DomTree, id: NodeId) -> bool {
    let Some(element) = tree.as_element(id) else {
        return false;
    };
    compound
        .simple_selectors
        .iter()
        .all(|simple| simple_matches(simple, tree, id, element))
}

fn simple_matches(simple: &SimpleSelector, tree: &DomTree, id: NodeId, element: &ElementData) -> bool {
    match simple {
        // [§ 5.1] Element names are lowercase on both sides.
        SimpleSelector::Type(name) => element.tag_name == *name,
        SimpleSelector::Universal => true,
        // Ids and classes are case-sensitive; quirks mode is not modelled.
        SimpleSelector::Id(id_value) => element.id() == Some(id_value.as_str()),
        SimpleSelector::Class(class) => element.classes().contains(&class.as_str()),
        SimpleSelector::Attribute(selector) => attribute_matches(selector, element),
        SimpleSelector::PseudoClass(pseudo) => pseudo_class_matches(*pseudo, tree, id, element),
        // [§ 4.3] "It represents an element that is not represented by its
        // argument."
        SimpleSelector::Not(compounds) => !compounds
            .iter()
            .any(|compound| compound_matches(compound, tree, id)),
    }
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
fn attribute_matches(selector: &AttributeSelector, element: &ElementData) -> bool {
    let Some(actual) = element.get_attribute(&selector.name) else {
        return false;
    };

    // [§ 6.3] With the `i` flag both sides are ASCII-lowercased first.
    let fold = |s: &str| {
        if selector.case_insensitive {
            s.to_ascii_lowercase()
        } else {
            s.to_string()
        }
    };
    let actual = fold(actual);

    match &selector.operator {
        AttributeOperator::Exists => true,
        AttributeOperator::Equals(expected) => actual == fold(expected),
        // "If "val" contains whitespace, it will never represent anything
        // (since the words are separated by spaces). Also if "val" is the
        // empty string, it will never represent anything."
        AttributeOperator::Includes(expected) => {
            let expected = fold(expected);
            !expected.is_empty()
                && !expected.contains(|c: char| c.is_ascii_whitespace())
                && actual.split_ascii_whitespace().any(|word| word == expected)
        }
        AttributeOperator::DashMatch(expected) => {
            let expected = fold(expected);
            actual == expected
                || actual
                    .strip_prefix(expected.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        // "If "val" is the empty string then the selector does not represent
        // anything."
        AttributeOperator::PrefixMatch(expected) => {
            let expected = fold(expected);
            !expected.is_empty() && actual.starts_with(expected.as_str())
        }
        AttributeOperator::SuffixMatch(expected) => {
            let expected = fold(expected);
            !expected.is_empty() && actual.ends_with(expected.as_str())
        }
        AttributeOperator::SubstringMatch(expected) => {
            let expected = fold(expected);
            !expected.is_empty() && actual.contains(expected.as_str())
        }
    }
}

/// Form controls that can be disabled.
///
/// [§ 4.10.18.5 Enabling and disabling form controls](https://html.spec.whatwg.org/multipage/form-control-infrastructure.html#enabling-and-disabling-form-controls:-the-disabled-attribute)
const DISABLEABLE_ELEMENTS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
/// and the HTML-defined input pseudo-classes.
fn pseudo_class_matches(pseudo: PseudoClass, tree: &DomTree, id: NodeId, element: &ElementData) -> bool {
    match pseudo {
        // "The :root pseudo-class represents an element that is the root of
        // the document."
        PseudoClass::Root => tree.document_element() == Some(id),

        PseudoClass::FirstChild => previous_element_sibling(tree, id).is_none(),
        PseudoClass::LastChild => next_element_sibling(tree, id).is_none(),
        PseudoClass::OnlyChild => {
            previous_element_sibling(tree, id).is_none() && next_element_sibling(tree, id).is_none()
        }

        PseudoClass::FirstOfType => !has_sibling_of_type(tree, id, element, false),
        PseudoClass::LastOfType => !has_sibling_of_type(tree, id, element, true),
        PseudoClass::OnlyOfType => {
            !has_sibling_of_type(tree, id, element, false)
                && !has_sibling_of_type(tree, id, element, true)
        }

        // "The :empty pseudo-class represents an element that has no
        // children except, optionally, document white space characters."
        // Comments do not count as children.
        PseudoClass::Empty => tree.children(id).iter().all(|&child| {
            match tree.get(child).map(|node| &node.node_type) {
                Some(NodeType::Text(text)) => text.chars().all(|c| c.is_ascii_whitespace()),
                Some(NodeType::Comment(_)) => true,
                _ => false,
            }
        }),

        // [HTML § 4.16.3](https://html.spec.whatwg.org/multipage/semantics-other.html#selector-any-link)
        // "All a elements that have an href attribute, and all area elements
        // that have an href attribute."
        PseudoClass::AnyLink => {
            matches!(element.tag_name.as_str(), "a" | "area") && element.has_attribute("href")
        }

        // [HTML § 4.16.3](https://html.spec.whatwg.org/multipage/semantics-other.html#selector-checked)
        // "input elements whose type attribute is in the Checkbox state ... or
        // the Radio Button state ... and whose checkedness state is true"
        // "option elements whose selectedness is true"
        PseudoClass::Checked => match element.tag_name.as_str() {
            "input" => {
                element.has_attribute("checked")
                    && element.get_attribute("type").is_some_and(|kind| {
                        kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio")
                    })
            }
            "option" => element.has_attribute("selected"),
            _ => false,
        },

        PseudoClass::Disabled => {
            DISABLEABLE_ELEMENTS.contains(&element.tag_name.as_str()) && element.has_attribute("disabled")
        }
        PseudoClass::Enabled => {
            DISABLEABLE_ELEMENTS.contains(&element.tag_name.as_str()) && !element.has_attribute("disabled")
        }
    }
}

fn next_element_sibling(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    tree.following_siblings(id)
        .find(|&sibling| tree.as_element(sibling).is_some())
}

fn has_sibling_of_type(tree: &DomTree, id: NodeId, element: &ElementData, following: bool) -> bool {
    let same_type = |sibling: NodeId| tree.tag_name(sibling) == Some(element.tag_name.as_str());
    if following {
        tree.following_siblings(id).any(same_type)
    } else {
        tree.preceding_siblings(id).any(same_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<html><div><p></p><p></p></div></html>` built by hand.
    fn small_tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let html = tree.alloc(NodeType::Element(ElementData::new("html", Vec::new())));
        tree.append_child(NodeId::ROOT, html);
        let div = tree.alloc(NodeType::Element(ElementData::new("div", Vec::new())));
        tree.append_child(html, div);
        let first = tree.alloc(NodeType::Element(ElementData::new("p", Vec::new())));
        tree.append_child(div, first);
        let second = tree.alloc(NodeType::Element(ElementData::new("p", Vec::new())));
        tree.append_child(div, second);
        (tree, div, first, second)
    }

    #[test]
    fn test_select_excludes_scope_unless_asked() {
        let (tree, div, ..) = small_tree();
        let list = SelectorList::parse("div").expect("valid selector");
        assert!(select(&tree, div, &list, false).is_empty());
        assert_eq!(select(&tree, div, &list, true), vec![div]);
    }

    #[test]
    fn test_next_sibling_and_of_type() {
        let (tree, div, first, second) = small_tree();
        let list = SelectorList::parse("p + p").expect("valid selector");
        assert_eq!(select(&tree, div, &list, false), vec![second]);

        let list = SelectorList::parse("p:first-of-type").expect("valid selector");
        assert_eq!(select(&tree, div, &list, false), vec![first]);
    }

    #[test]
    fn test_document_node_is_never_matched() {
        let (tree, ..) = small_tree();
        let list = SelectorList::parse("*").expect("valid selector");
        assert!(!list.matches(&tree, NodeId::ROOT));
    }
}
