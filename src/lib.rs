//! # scratch
//!
//! Point at one element of a web page and get every element like it back as
//! structured JSON.
//!
//! ## Features
//!
//! - **Selector derivation**: a CSS selector that matches the target and its look-alikes
//! - **Tree extraction**: attributes and text of each match folded into compact JSON
//! - **Key normalization**: `div.product/span.price-tag` becomes `product_price_tag`
//! - **Export**: per-key include/rename, written as `Scratch_<millis>.json`
//! - **Browser capture**: live pages through Chrome DevTools Protocol
//! - **MCP Server**: the whole flow as Model Context Protocol tools
//!
//! ## MCP Server
//!
//! ```bash
//! # Run headless browser over stdio
//! cargo run --features mcp-server --bin scratch-mcp
//!
//! # Streamable HTTP on port 3000
//! cargo run --features mcp-server --bin scratch-mcp -- --transport http
//! ```
//!
//! ## Library Usage
//!
//! ### Scratching captured HTML
//!
//! ```rust
//! use scratch::{DomTree, Scratcher};
//! use serde_json::json;
//!
//! # fn main() -> scratch::Result<()> {
//! let tree = DomTree::from_html(r#"
//!     <div class="card"><b class="name">Lamp</b><i class="price">12</i></div>
//!     <div class="card"><b class="name">Chair</b><i class="price">40</i></div>
//! "#);
//!
//! let target = tree.find_target("div.card", 0)?;
//! let scratch = Scratcher::new().scratch(&tree, target);
//!
//! assert_eq!(scratch.selector, "div.card");
//! assert_eq!(scratch.to_value(), json!([
//!     {"card_name": "Lamp", "card_price": "12"},
//!     {"card_name": "Chair", "card_price": "40"},
//! ]));
//! # Ok(())
//! # }
//! ```
//!
//! ### Scratching a live page
//!
//! ```rust,no_run
//! use scratch::{BrowserSession, LaunchOptions, Scratcher};
//!
//! # fn main() -> scratch::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let tree = session.capture_url("https://example.com")?;
//!
//! let scratch = Scratcher::new().scratch_selector(&tree, "p")?;
//! println!("Scratched {} element(s)", scratch.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: parsed pages, element helpers and selector derivation
//! - [`extract`]: subtree to JSON extraction
//! - [`normalize`]: key aliasing
//! - [`scratch`]: a scratching session tying the three together
//! - [`export`]: include/rename options and file output
//! - [`store`]: payload hand-off between scratch and export
//! - [`browser`]: Chrome session management and page capture
//! - [`tools`]: navigate / scratch / export tools
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature)

pub mod browser;
pub mod dom;
pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod scratch;
pub mod store;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{DomTree, derive_selector};
pub use error::{Result, ScratchError};
pub use export::{KeyOption, KeyOptions};
pub use extract::{extract_all, extract_one};
pub use normalize::{NameAliasTable, normalize_keys};
pub use scratch::{Scratch, Scratcher};
pub use store::PayloadStore;
pub use tools::{ScratchState, Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::ScratchServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
