//! Key normalization
//!
//! Extraction keys are raw attribute names and `tag.class/tag.class` paths,
//! which are accurate but unreadable. This pass rewrites every mapping key to
//! a short alias built from its pronounceable fragments, e.g.
//! `div.product/span.price-tag` becomes `product_price_tag`.

use crate::extract::TEXT_FIELD;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Generic HTML tag names dropped from aliases.
///
/// `data` is not listed: `data-*` attribute names keep their
/// prefix.
pub const REMOVABLE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "applet", "aside", "b", "base", "basefont", "bdi", "bdo", "big",
    "blockquote", "body", "br", "button", "canvas", "center", "cite", "code", "col", "colgroup",
    "dd", "del", "dfn", "dialog", "dir", "div", "dl", "dt", "em", "embed", "fieldset",
    "figcaption", "font", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "hr", "html", "i", "iframe", "img", "ins", "kbd", "li", "main", "mark", "marquee",
    "meta", "meter", "nav", "noframes", "noscript", "ol", "optgroup", "option", "p", "param",
    "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "section", "select",
    "small", "span", "strike", "strong", "style", "sub", "sup", "svg", "table", "tbody", "td",
    "textarea", "tfoot", "th", "thead", "tr", "tt", "u", "ul", "var", "wbr",
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

/// Memo of raw key → alias, kept for the lifetime of a scratch session so the
/// same raw key gets the same alias across extraction calls.
#[derive(Debug, Clone, Default)]
pub struct NameAliasTable {
    aliases: HashMap<String, String>,
}

impl NameAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized alias for `key`, computing and storing it on first use.
    /// May be empty when the key has no usable fragment.
    pub fn alias(&mut self, key: &str) -> String {
        if let Some(alias) = self.aliases.get(key) {
            return alias.clone();
        }
        let alias = filtered_alias(key);
        log::trace!("Alias '{}' -> '{}'", key, alias);
        self.aliases.insert(key.to_string(), alias.clone());
        alias
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
    }
}

/// Rewrite the keys of every mapping in `value`, recursing through lists.
pub fn normalize_keys(value: Value, table: &mut NameAliasTable) -> Value {
    match value {
        Value::Object(map) => Value::Object(normalize_map(map, table)),
        Value::Array(values) => Value::Array(
            values
                .into_iter()
                .map(|value| normalize_keys(value, table))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn normalize_map(map: Map<String, Value>, table: &mut NameAliasTable) -> Map<String, Value> {
    let mut output = Map::with_capacity(map.len());

    for (key, value) in map {
        let value = normalize_keys(value, table);

        if key == TEXT_FIELD {
            let name = free_name(&output, key);
            output.insert(name, value);
            continue;
        }

        let mut name = table.alias(&key);
        if name.is_empty() || output.contains_key(&name) {
            name = safe_alias(&key);
        }
        if output.contains_key(&name) {
            // the computed name is taken: the later key keeps its raw form
            name = free_name(&output, key);
        }
        output.insert(name, value);
    }

    output
}

/// `name` if unused in `output`, otherwise the first free `name_<n>` (n ≥ 2)
fn free_name(output: &Map<String, Value>, name: String) -> String {
    if !output.contains_key(&name) {
        return name;
    }
    (2..)
        .map(|n| format!("{}_{}", name, n))
        .find(|candidate| !output.contains_key(candidate))
        .unwrap_or(name)
}

/// Pronounceable, non-tag fragments of `key`, deduplicated, joined with `_`
pub fn filtered_alias(key: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for fragment in letter_fragments(key) {
        if is_removable_tag(fragment) || !fragment.contains(VOWELS) {
            continue;
        }
        if !kept.contains(&fragment) {
            kept.push(fragment);
        }
    }
    kept.join("_")
}

fn is_removable_tag(fragment: &str) -> bool {
    REMOVABLE_TAGS.iter().any(|tag| *tag == fragment)
}

/// Every fragment of `key` joined with `_`, with no filtering
pub fn safe_alias(key: &str) -> String {
    letter_fragments(key).join("_")
}

/// Split on runs of non-ASCII-letters.
///
/// A run counts as one separator; a leading or trailing run still yields an
/// empty first or last fragment, so `_text` splits into `["", "text"]`.
fn letter_fragments(key: &str) -> Vec<&str> {
    let pieces: Vec<&str> = key.split(|c: char| !c.is_ascii_alphabetic()).collect();
    let last = pieces.len().saturating_sub(1);

    pieces
        .iter()
        .enumerate()
        .filter(|(i, piece)| *i == 0 || *i == last || !piece.is_empty())
        .map(|(_, piece)| *piece)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_letter_fragments() {
        assert_eq!(letter_fragments("data-id"), vec!["data", "id"]);
        assert_eq!(letter_fragments("_text"), vec!["", "text"]);
        assert_eq!(letter_fragments("a--b"), vec!["a", "b"]);
        assert_eq!(letter_fragments("x1"), vec!["x", ""]);
        assert_eq!(letter_fragments("123"), vec!["", ""]);
        assert_eq!(letter_fragments(""), vec![""]);
    }

    #[test]
    fn test_filtered_alias() {
        assert_eq!(filtered_alias("data-id"), "data_id");
        assert_eq!(filtered_alias("div.product/span.price-tag"), "product_price_tag");
        assert_eq!(filtered_alias("ul.list/li.item/a.item-link"), "list_item_link");
        assert_eq!(filtered_alias("div/span"), "");
        assert_eq!(filtered_alias("h2.xyz"), "");
        assert_eq!(filtered_alias("href"), "");
        assert_eq!(filtered_alias("title"), "title");
    }

    #[test]
    fn test_safe_alias() {
        assert_eq!(safe_alias("href"), "href");
        assert_eq!(safe_alias("div/span"), "div_span");
        assert_eq!(safe_alias("aria-label"), "aria_label");
        assert_eq!(safe_alias("_private"), "_private");
    }

    #[test]
    fn test_card_span_keys() {
        let mut table = NameAliasTable::new();
        let value = json!({"data-id": {"a": 1}, "_text": "Hi"});
        assert_eq!(
            normalize_keys(value, &mut table),
            json!({"data_id": {"a": 1}, "_text": "Hi"})
        );
    }

    #[test]
    fn test_empty_alias_falls_back_to_safe_alias() {
        let mut table = NameAliasTable::new();
        let value = json!({"href": "/x", "div/span": "y"});
        assert_eq!(
            normalize_keys(value, &mut table),
            json!({"href": "/x", "div_span": "y"})
        );
        assert_eq!(table.get("href"), Some(""));
    }

    #[test]
    fn test_colliding_aliases_never_overwrite() {
        let mut table = NameAliasTable::new();
        let value = json!({
            "div.price/span": "1",
            "p.price": "2"
        });
        let normalized = normalize_keys(value, &mut table);

        assert_eq!(normalized, json!({"price": "1", "p_price": "2"}));
        // the memo keeps the filtered form even though it was not used
        assert_eq!(table.get("p.price"), Some("price"));
    }

    #[test]
    fn test_demoted_to_raw_key() {
        let mut table = NameAliasTable::new();
        // "price.x" and "price-x" share both the filtered and the safe alias
        let value = json!({"price_x": 1, "price.x": 2, "price-x": 3});
        let normalized = normalize_keys(value, &mut table);

        let keys: Vec<_> = normalized.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["price", "price_x", "price-x"]);
        assert_eq!(normalized["price"], json!(1));
        assert_eq!(normalized["price_x"], json!(2));
        assert_eq!(normalized["price-x"], json!(3));
    }

    #[test]
    fn test_raw_key_already_taken_gets_suffix() {
        let mut table = NameAliasTable::new();
        // "x-title" claims "title", which is the alias, safe alias and raw
        // form of the second key
        let value = json!({"x-title": 1, "title": 2});
        let normalized = normalize_keys(value, &mut table);
        assert_eq!(normalized, json!({"title": 1, "title_2": 2}));
    }

    #[test]
    fn test_recurses_into_lists_and_maps() {
        let mut table = NameAliasTable::new();
        let value = json!([
            {"div.card/h3.name": "A", "nested": {"span.label-text": "x"}},
            "plain",
            [{"div.card/h3.name": "B"}]
        ]);
        assert_eq!(
            normalize_keys(value, &mut table),
            json!([
                {"card_name": "A", "nested": {"label_text": "x"}},
                "plain",
                [{"card_name": "B"}]
            ])
        );
    }

    #[test]
    fn test_deterministic_across_calls() {
        let mut table = NameAliasTable::new();
        let first = normalize_keys(json!({"article.post/h1": "a", "href": "b"}), &mut table);
        let memo_size = table.len();
        let second = normalize_keys(json!({"article.post/h1": "c", "href": "d"}), &mut table);

        assert_eq!(first, json!({"article_post": "a", "href": "b"}));
        assert_eq!(second, json!({"article_post": "c", "href": "d"}));
        assert_eq!(table.len(), memo_size);
    }

    #[test]
    fn test_scalars_pass_through() {
        let mut table = NameAliasTable::new();
        assert_eq!(normalize_keys(json!("x"), &mut table), json!("x"));
        assert_eq!(normalize_keys(json!(3), &mut table), json!(3));
        assert_eq!(normalize_keys(Value::Null, &mut table), Value::Null);
        assert!(table.is_empty());
    }
}
