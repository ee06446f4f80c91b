//! Tree extraction: element subtree to structured JSON
//!
//! An extraction walks the subtree depth-first, accumulating attribute values
//! and text into a [`PathMap`] keyed by `tag.class` paths, then collapses the
//! map into a compact [`serde_json::Value`]. Sibling elements that share a
//! path share a record, which is what turns repeated markup into arrays.

pub mod record;
pub mod text;

pub use record::{NodeRecord, PathMap, TEXT_FIELD, collapse_fields, reduce_fields};
pub use text::try_parse_text;

use crate::dom::{DomTree, ElementExt};
use crate::error::Result;
use scraper::{ElementRef, Node};
use serde_json::Value;
use std::collections::HashMap;

/// Vector-graphic tags skipped together with their subtree
pub const BLACKLISTED_TAGS: [&str; 6] = ["svg", "path", "rect", "polygon", "circle", "g"];

/// Presentation attributes never captured
pub const BLACKLISTED_ATTRIBUTES: [&str; 2] = ["class", "style"];

/// Extract every element matching `selector`, one result per match in
/// document order.
pub fn extract_all(tree: &DomTree, selector: &str) -> Result<Vec<Value>> {
    let matches = tree.query(selector)?;
    log::debug!("Selector '{}' matched {} elements", selector, matches.len());

    Ok(matches.into_iter().map(extract_one).collect())
}

/// Extract the subtree rooted at `element`.
///
/// Never fails: malformed JSON-looking text stays a string and an element
/// that captures nothing yields an empty object.
pub fn extract_one(element: ElementRef<'_>) -> Value {
    collect_paths(element).collapse()
}

/// Walk the subtree into its uncollapsed path map.
///
/// The walk keeps its own stack, so nesting depth is bounded by memory and
/// not by the thread stack. Paths that captured nothing are left out.
pub fn collect_paths(element: ElementRef<'_>) -> PathMap {
    let mut trie = PathTrie::default();
    let mut stack = vec![(element, None)];

    while let Some((element, parent)) = stack.pop() {
        if is_blacklisted_tag(element) {
            continue;
        }

        let segment = trie.segment(parent, element.node_name());
        let record = trie.record_mut(segment);
        for (name, value) in element.value().attrs() {
            if BLACKLISTED_ATTRIBUTES.iter().any(|blacklisted| *blacklisted == name) {
                continue;
            }
            record.push(name, try_parse_text(value));
        }

        let mut children = Vec::new();
        for child in element.children() {
            match child.value() {
                Node::Element(_) => children.extend(ElementRef::wrap(child)),
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        trie.record_mut(segment).push(TEXT_FIELD, try_parse_text(trimmed));
                    }
                }
                _ => {}
            }
        }

        // reversed so the first child is popped first
        stack.extend(children.into_iter().rev().map(|child| (child, Some(segment))));
    }

    trie.into_path_map()
}

/// One `tag.class` step of a path, linked to its parent step
#[derive(Debug)]
struct Segment {
    parent: Option<usize>,
    name: String,
    record: NodeRecord,
}

/// Interned paths of one walk.
///
/// Segment ids are handed out on first visit, so id order is the order a
/// recursive depth-first walk would first reach each path. Path strings are
/// only built for segments whose record captured something.
#[derive(Debug, Default)]
struct PathTrie {
    segments: Vec<Segment>,
    lookup: HashMap<(Option<usize>, String), usize>,
}

impl PathTrie {
    fn segment(&mut self, parent: Option<usize>, name: String) -> usize {
        let segments = &mut self.segments;
        *self
            .lookup
            .entry((parent, name))
            .or_insert_with_key(|(parent, name)| {
                segments.push(Segment {
                    parent: *parent,
                    name: name.clone(),
                    record: NodeRecord::new(),
                });
                segments.len() - 1
            })
    }

    fn record_mut(&mut self, segment: usize) -> &mut NodeRecord {
        &mut self.segments[segment].record
    }

    fn path(&self, segment: usize) -> String {
        let mut names = Vec::new();
        let mut current = Some(segment);
        while let Some(index) = current {
            names.push(self.segments[index].name.as_str());
            current = self.segments[index].parent;
        }
        names.reverse();
        names.join("/")
    }

    fn into_path_map(mut self) -> PathMap {
        let mut paths = PathMap::new();
        for segment in 0..self.segments.len() {
            if self.segments[segment].record.is_empty() {
                continue;
            }
            let path = self.path(segment);
            let record = std::mem::take(&mut self.segments[segment].record);
            paths.record_mut(&path).append(record);
        }
        paths
    }
}

fn is_blacklisted_tag(element: ElementRef<'_>) -> bool {
    BLACKLISTED_TAGS.iter().any(|tag| element.is_tag(tag))
}
