//! Preview options and JSON export
//!
//! A scratch payload is offered for review as a per-key include/rename table
//! when its items are objects, then re-keyed and written out as
//! `Scratch_<epoch-millis>.json`.

use crate::error::{Result, ScratchError};
use crate::store::epoch_millis;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Most keys the include/rename table is offered for
pub const MAX_OPTION_KEYS: usize = 10;

/// One row of the include/rename table
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KeyOption {
    /// Key as it appears in the payload
    pub key: String,

    /// New name for the key; empty keeps the original
    #[serde(default)]
    pub rename: String,

    /// Whether the key is exported (default: true)
    #[serde(default = "default_include")]
    pub include: bool,
}

fn default_include() -> bool {
    true
}

impl KeyOption {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            rename: String::new(),
            include: true,
        }
    }

    /// Name the key is exported under
    pub fn output_key(&self) -> &str {
        if self.rename.is_empty() {
            &self.key
        } else {
            &self.rename
        }
    }
}

/// Include/rename options for every key of a payload, in first-seen order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct KeyOptions {
    options: Vec<KeyOption>,
}

impl KeyOptions {
    pub fn new(options: Vec<KeyOption>) -> Self {
        Self { options }
    }

    /// Build options from a payload.
    ///
    /// Returns `None` when any item is a string: such payloads are exported
    /// as-is. Items that are not objects contribute no keys.
    pub fn from_payload(items: &[Value]) -> Option<Self> {
        if items.iter().any(Value::is_string) {
            return None;
        }

        let mut options: Vec<KeyOption> = Vec::new();
        for map in items.iter().filter_map(Value::as_object) {
            for key in map.keys() {
                if !options.iter().any(|option| option.key == *key) {
                    options.push(KeyOption::new(key.clone()));
                }
            }
        }
        Some(Self { options })
    }

    /// Whether there are few enough keys to offer the table
    pub fn offers_table(&self) -> bool {
        self.options.len() <= MAX_OPTION_KEYS
    }

    pub fn options(&self) -> &[KeyOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Toggle a key; returns false if the key is unknown
    pub fn set_include(&mut self, key: &str, include: bool) -> bool {
        self.find_mut(key).map(|option| option.include = include).is_some()
    }

    /// Rename a key; returns false if the key is unknown
    pub fn rename(&mut self, key: &str, rename: impl Into<String>) -> bool {
        let rename = rename.into();
        self.find_mut(key).map(|option| option.rename = rename).is_some()
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut KeyOption> {
        self.options.iter_mut().find(|option| option.key == key)
    }

    /// Re-key every object item.
    ///
    /// Each object is rebuilt from the options in order: excluded keys are
    /// dropped, renamed keys take their new name, and keys the item lacks are
    /// filled with `null`. Items that are not objects pass through.
    pub fn apply(&self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Value::Object(self.apply_to(map)),
                other => other.clone(),
            })
            .collect()
    }

    fn apply_to(&self, map: &Map<String, Value>) -> Map<String, Value> {
        self.options
            .iter()
            .filter(|option| option.include)
            .map(|option| {
                let value = map.get(&option.key).cloned().unwrap_or(Value::Null);
                (option.output_key().to_string(), value)
            })
            .collect()
    }
}

/// Parse a `KEY=NEW` rename pair
pub fn parse_rename(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, rename)) if !key.is_empty() => Ok((key.to_string(), rename.to_string())),
        _ => Err(ScratchError::InvalidArgument(format!(
            "Expected KEY=NEW, got '{}'",
            pair
        ))),
    }
}

/// Pretty-printed JSON with 2-space indentation
pub fn to_pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `Scratch_<millis>.json`
pub fn export_file_name(millis: u64) -> String {
    format!("Scratch_{}.json", millis)
}

/// Write `value` as `Scratch_<now>.json` into `dir` and return the path
pub fn write_export(dir: &Path, value: &Value) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(epoch_millis()));
    std::fs::write(&path, to_pretty_json(value)?)?;

    log::info!("Exported scratch to {}", path.display());
    Ok(path)
}
