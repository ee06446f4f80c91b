use crate::error::{Result, ScratchError};
use scraper::{ElementRef, Html, Selector};

/// A parsed page (or fragment) that scratching runs against.
///
/// Element handles handed to the extractor borrow from this tree, so it must
/// outlive every extraction call made on it.
pub struct DomTree {
    html: Html,

    /// URL the HTML was captured from, if any
    source_url: Option<String>,
}

impl DomTree {
    /// Parse a full HTML document
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            source_url: None,
        }
    }

    /// Parse an HTML fragment (no implied `<head>`/`<body>`)
    pub fn from_fragment(html: &str) -> Self {
        Self {
            html: Html::parse_fragment(html),
            source_url: None,
        }
    }

    /// Builder method: record the URL the HTML was captured from
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// The outermost element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Parse a CSS selector, mapping parse failures to [`ScratchError::InvalidSelector`]
    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| ScratchError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    /// All elements matching `selector`, in document order
    pub fn query(&self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let parsed = Self::parse_selector(selector)?;
        Ok(self.html.select(&parsed).collect())
    }

    /// The `nth` (zero-based) element matching `selector`.
    ///
    /// This is how a caller names the element a user pointed at.
    pub fn find_target(&self, selector: &str, nth: usize) -> Result<ElementRef<'_>> {
        let parsed = Self::parse_selector(selector)?;
        self.html.select(&parsed).nth(nth).ok_or_else(|| {
            ScratchError::ElementNotFound(format!(
                "No match #{} for selector '{}'",
                nth, selector
            ))
        })
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        self.root()
            .descendants()
            .filter(|node| node.value().is_element())
            .count()
    }
}

impl std::fmt::Debug for DomTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomTree")
            .field("source_url", &self.source_url)
            .field("elements", &self.count_elements())
            .finish()
    }
}
