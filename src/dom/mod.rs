//! DOM access for scratching
//!
//! This module provides the parsed page and the element-level helpers the
//! rest of the crate works through. It includes:
//! - DomTree: a parsed page with CSS querying and target lookup
//! - ElementExt: tag, class and ancestry helpers over borrowed elements
//! - derive_selector: the "elements like this one" selector for a target

pub mod element;
pub mod selector;
pub mod tree;

pub use element::ElementExt;
pub use selector::{MAX_SELECTOR_DEPTH, derive_selector, sanitize_selector};
pub use tree::DomTree;
