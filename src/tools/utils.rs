use std::path::{Path, PathBuf};

/// Schemes passed through untouched
const KNOWN_SCHEMES: [&str; 7] = [
    "http://",
    "https://",
    "file://",
    "data:",
    "about:",
    "chrome://",
    "chrome-extension://",
];

/// Complete a loosely typed URL.
///
/// Known schemes and relative paths are kept, localhost gets `http://`,
/// anything with a dot gets `https://` and a bare word becomes
/// `https://www.<word>.com`.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    if KNOWN_SCHEMES.iter().any(|scheme| trimmed.starts_with(scheme)) {
        return trimmed.to_string();
    }

    if trimmed.starts_with('/') || trimmed.starts_with("./") || trimmed.starts_with("../") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    if trimmed.contains('.') {
        return format!("https://{}", trimmed);
    }

    format!("https://www.{}.com", trimmed)
}

/// Whether `source` should be loaded through the browser rather than read from disk
pub fn is_browser_source(source: &str) -> bool {
    let source = source.trim();
    ["http://", "https://", "file://", "data:"]
        .iter()
        .any(|scheme| source.starts_with(scheme))
}

/// Where a command-line page source is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Stdin,
    File(PathBuf),
    Url(String),
}

/// Decide how to load `source`.
///
/// `-` is stdin, URLs with a scheme go to the browser, existing files and
/// anything shaped like a path are read from disk, and whatever is left is
/// completed with [`normalize_url`] and loaded in the browser.
pub fn resolve_source(source: &str) -> PageSource {
    let source = source.trim();

    if source == "-" {
        return PageSource::Stdin;
    }
    if is_browser_source(source) {
        return PageSource::Url(source.to_string());
    }
    if Path::new(source).exists() || looks_like_path(source) {
        return PageSource::File(PathBuf::from(source));
    }
    PageSource::Url(normalize_url(source))
}

fn looks_like_path(source: &str) -> bool {
    source.starts_with('/')
        || source.starts_with("./")
        || source.starts_with("../")
        || source.ends_with(".html")
        || source.ends_with(".htm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_complete() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com/shop"), "http://example.com/shop");
    }

    #[test]
    fn test_normalize_url_missing_protocol() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("shop.example.com/list"), "https://shop.example.com/list");
    }

    #[test]
    fn test_normalize_url_bare_word() {
        assert_eq!(normalize_url("wikipedia"), "https://www.wikipedia.com");
    }

    #[test]
    fn test_normalize_url_localhost() {
        assert_eq!(normalize_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_url("127.0.0.1:8080/list"), "http://127.0.0.1:8080/list");
    }

    #[test]
    fn test_normalize_url_special_schemes() {
        assert_eq!(normalize_url("about:blank"), "about:blank");
        assert_eq!(normalize_url("file:///tmp/page.html"), "file:///tmp/page.html");
        assert_eq!(
            normalize_url("data:text/html,<p>x</p>"),
            "data:text/html,<p>x</p>"
        );
    }

    #[test]
    fn test_normalize_url_relative_and_whitespace() {
        assert_eq!(normalize_url("./page.html"), "./page.html");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }

    #[test]
    fn test_is_browser_source() {
        assert!(is_browser_source("https://example.com"));
        assert!(is_browser_source("file:///tmp/page.html"));
        assert!(is_browser_source("data:text/html,<p>x</p>"));
        assert!(!is_browser_source("page.html"));
        assert!(!is_browser_source("-"));
    }

    #[test]
    fn test_resolve_source_stdin_and_urls() {
        assert_eq!(resolve_source("-"), PageSource::Stdin);
        assert_eq!(
            resolve_source("https://example.com/list"),
            PageSource::Url("https://example.com/list".to_string())
        );
        assert_eq!(
            resolve_source("example.com"),
            PageSource::Url("https://example.com".to_string())
        );
        assert_eq!(
            resolve_source("localhost:8080"),
            PageSource::Url("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn test_resolve_source_files() {
        assert_eq!(
            resolve_source("missing/page.html"),
            PageSource::File(PathBuf::from("missing/page.html"))
        );
        assert_eq!(resolve_source("./dump"), PageSource::File(PathBuf::from("./dump")));

        let path = std::env::temp_dir().join(format!("scratch-source-{}", std::process::id()));
        std::fs::write(&path, "<p>x</p>").unwrap();
        let name = path.display().to_string();
        assert_eq!(resolve_source(&name), PageSource::File(path.clone()));
        std::fs::remove_file(&path).unwrap();
    }
}
