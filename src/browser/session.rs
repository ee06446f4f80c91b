use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::browser::is_restricted_url;
use crate::dom::DomTree;
use crate::error::{Result, ScratchError};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that captures pages for scratching
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // keep the browser alive between scratches (default idle timeout is 30s)
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| ScratchError::LaunchFailed(e.to_string()))?;

        browser
            .new_tab()
            .map_err(|e| ScratchError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Launched browser (headless: {})", options.headless);
        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(
            options.ws_url.clone(),
            Duration::from_millis(options.timeout),
        )
        .map_err(|e| ScratchError::ConnectionFailed(e.to_string()))?;

        log::info!("Connected to browser at {}", options.ws_url);
        Ok(Self { browser })
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ScratchError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// The visible tab, or the first one if none reports visibility
    pub fn tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        for tab in &tabs {
            match tab.evaluate("document.visibilityState === 'visible'", false) {
                Ok(remote_object) => {
                    if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                        return Ok(tab.clone());
                    }
                }
                Err(e) => log::debug!("Failed to check tab status: {}", e),
            }
        }

        tabs.into_iter()
            .next()
            .ok_or_else(|| ScratchError::TabOperationFailed("No open tab".to_string()))
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| ScratchError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| ScratchError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// URL of the active tab
    pub fn current_url(&self) -> Result<String> {
        Ok(self.tab()?.get_url())
    }

    /// Snapshot the active tab's HTML as a [`DomTree`].
    ///
    /// Browser-internal and store pages are refused before anything is read.
    pub fn capture(&self) -> Result<DomTree> {
        let tab = self.tab()?;
        let url = tab.get_url();
        if is_restricted_url(&url) {
            return Err(ScratchError::RestrictedPage(url));
        }

        let html = tab
            .get_content()
            .map_err(|e| ScratchError::CaptureFailed(format!("Failed to read {}: {}", url, e)))?;

        log::debug!("Captured {} bytes from {}", html.len(), url);
        Ok(DomTree::from_html(&html).with_source_url(url))
    }

    /// Navigate to `url`, wait for it to load, and capture it
    pub fn capture_url(&self, url: &str) -> Result<DomTree> {
        if is_restricted_url(url) {
            return Err(ScratchError::RestrictedPage(url.to_string()));
        }
        self.navigate(url)?;
        self.wait_for_navigation()?;
        self.capture()
    }

    /// Close every tab; the browser process exits when the session is dropped
    pub fn close(&self) -> Result<()> {
        for tab in self.get_tabs()? {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab: {}", e);
            }
        }
        Ok(())
    }
}
