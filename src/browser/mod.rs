//! Live page capture through Chrome DevTools Protocol
//!
//! The browser only supplies HTML snapshots; all scratching happens on the
//! captured [`DomTree`](crate::dom::DomTree).

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;

/// URL prefixes of pages that must never be scratched
pub const RESTRICTED_URL_PREFIXES: [&str; 4] = [
    "about:",
    "chrome://",
    "chrome-extension://",
    "https://chrome.google.com/webstore",
];

/// Whether `url` is a browser-internal or extension store page
pub fn is_restricted_url(url: &str) -> bool {
    let url = url.trim();
    RESTRICTED_URL_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restricted_urls() {
        assert!(is_restricted_url("about:blank"));
        assert!(is_restricted_url("chrome://settings"));
        assert!(is_restricted_url("chrome-extension://abc/index.html"));
        assert!(is_restricted_url("https://chrome.google.com/webstore/detail/x"));
    }

    #[test]
    fn test_allowed_urls() {
        assert!(!is_restricted_url("https://example.com"));
        assert!(!is_restricted_url("file:///tmp/page.html"));
        assert!(!is_restricted_url("data:text/html,<p>x</p>"));
        assert!(!is_restricted_url("https://chrome.google.com/search"));
    }
}
