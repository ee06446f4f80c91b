//! Selector derivation for a clicked element
//!
//! The derived selector is meant to match "elements like this one", not to
//! identify a single node: scratching bulk-queries the document with it.

use crate::dom::element::ElementExt;
use scraper::ElementRef;

/// Maximum number of segments collected while walking up from the target
pub const MAX_SELECTOR_DEPTH: usize = 10;

/// Characters that mark a class fragment as unusable in a selector
const INVALID_SELECTOR_CHARS: [char; 4] = [':', '!', '[', ']'];

/// Derive a CSS selector for the given element.
///
/// A classed element yields `tag.class1.class2`. Otherwise the ancestor chain
/// is walked until a classed or id'd ancestor anchors the path, the document
/// element is reached, or [`MAX_SELECTOR_DEPTH`] segments are collected; the
/// result is a descendant-combinator selector such as `div.card p span`.
pub fn derive_selector(element: ElementRef<'_>) -> String {
    let selector = if element.class_list().is_empty() {
        ancestor_path(element)
    } else {
        element.node_name()
    };

    let sanitized = sanitize_selector(&selector);
    log::debug!("Derived selector '{}' (raw '{}')", sanitized, selector);
    sanitized
}

fn ancestor_path(element: ElementRef<'_>) -> String {
    let mut path = vec![element.tag_name()];
    let mut current = element;

    while path.len() < MAX_SELECTOR_DEPTH {
        let Some(parent) = current.parent_element() else {
            break;
        };
        if parent.is_document_element() {
            break;
        }

        if !parent.class_list().is_empty() {
            path.push(parent.node_name());
            break;
        }
        if let Some(id) = parent.element_id() {
            path.push(format!("{}#{}", parent.tag_name(), id));
            break;
        }

        path.push(parent.tag_name());
        current = parent;
    }

    path.reverse();
    path.join(" ")
}

/// Drop every `.`-separated fragment that would break selector parsing
/// (utility classes such as `md:flex`, `!mt-0` or `[&>p]:m-0`).
pub fn sanitize_selector(selector: &str) -> String {
    selector
        .split('.')
        .filter(|part| !part.contains(INVALID_SELECTOR_CHARS))
        .collect::<Vec<_>>()
        .join(".")
}
