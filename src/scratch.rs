use crate::dom::{DomTree, derive_selector};
use crate::error::Result;
use crate::extract::{extract_all, extract_one};
use crate::normalize::{NameAliasTable, normalize_keys};
use scraper::ElementRef;
use serde_json::Value;

/// One scratching session.
///
/// Owns the alias table so that repeated scratches within a session keep
/// naming consistent; drop or [`Scratcher::reset`] it to start afresh.
#[derive(Debug, Default)]
pub struct Scratcher {
    aliases: NameAliasTable,
}

/// What a scratch produced
#[derive(Debug, Clone, PartialEq)]
pub struct Scratch {
    /// Selector the matches were queried with
    pub selector: String,

    /// One normalized result per match
    pub items: Vec<Value>,
}

impl Scratcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch every element like `target`.
    ///
    /// Derives the selector from the target, extracts all matches and
    /// normalizes their keys. Always yields an array; if the derived selector
    /// does not parse, only the target itself is extracted.
    pub fn scratch(&mut self, tree: &DomTree, target: ElementRef<'_>) -> Scratch {
        let selector = derive_selector(target);

        let raw = match extract_all(tree, &selector) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("Falling back to the target element only: {}", e);
                vec![extract_one(target)]
            }
        };

        log::info!("Scratched {} element(s) with '{}'", raw.len(), selector);
        Scratch {
            items: self.normalize(raw),
            selector,
        }
    }

    /// Scratch every element matching a caller-supplied selector
    pub fn scratch_selector(&mut self, tree: &DomTree, selector: &str) -> Result<Scratch> {
        let raw = extract_all(tree, selector)?;
        log::info!("Scratched {} element(s) with '{}'", raw.len(), selector);

        Ok(Scratch {
            items: self.normalize(raw),
            selector: selector.to_string(),
        })
    }

    fn normalize(&mut self, items: Vec<Value>) -> Vec<Value> {
        items
            .into_iter()
            .map(|item| normalize_keys(item, &mut self.aliases))
            .collect()
    }

    pub fn aliases(&self) -> &NameAliasTable {
        &self.aliases
    }

    /// Forget every memoized alias
    pub fn reset(&mut self) {
        self.aliases.clear();
    }
}

impl Scratch {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items as one JSON array
    pub fn to_value(&self) -> Value {
        Value::Array(self.items.clone())
    }
}
