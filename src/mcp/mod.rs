//! MCP (Model Context Protocol) server for scratching
//!
//! Exposes the tool layer as three MCP tools: `browser_navigate`,
//! `scratch_element` and `scratch_export`.

pub mod handler;
pub use handler::ScratchServer;

use crate::tools::{ExportParams, NavigateParams, ScratchParams, ToolResult as InternalToolResult};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use serde::Serialize;

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = match result.data {
            Some(data) => serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
            None => "Success".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

impl ScratchServer {
    fn call<P: Serialize>(&self, name: &str, params: &P) -> Result<CallToolResult, McpError> {
        let result = self
            .run_tool(name, params)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        convert_result(result)
    }
}

#[tool_router]
impl ScratchServer {
    #[tool(description = "Navigate the browser to a URL; a missing scheme is filled in")]
    fn browser_navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        self.call("navigate", &params.0)
    }

    #[tool(
        description = "Scratch the current page: given a CSS selector for one example element \
                       (target, nth) or an explicit selector, extract every similar element into \
                       normalized JSON. Returns a payload id, the data and include/rename key options"
    )]
    fn scratch_element(&self, params: Parameters<ScratchParams>) -> Result<CallToolResult, McpError> {
        self.call("scratch", &params.0)
    }

    #[tool(
        description = "Export a scratched payload by id, applying include/rename key options; \
                       writes Scratch_<millis>.json when out_dir is given"
    )]
    fn scratch_export(&self, params: Parameters<ExportParams>) -> Result<CallToolResult, McpError> {
        self.call("export", &params.0)
    }
}
