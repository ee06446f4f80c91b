use thiserror::Error;

/// Errors surfaced by the capture, tool and export layers.
///
/// The extraction core itself never fails on DOM input; only caller-supplied
/// selectors, browser plumbing and file output can produce these.
#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Failed to capture page: {0}")]
    CaptureFailed(String),

    #[error("Refusing to scratch restricted page: {0}")]
    RestrictedPage(String),

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("No scratched payload with id {0}")]
    PayloadNotFound(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScratchError>;
