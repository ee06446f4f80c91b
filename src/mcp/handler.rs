use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::ScratchError;
use crate::tools::{ScratchState, ToolContext, ToolRegistry, ToolResult};
use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// MCP server exposing scratch tools over one browser session
#[derive(Clone)]
pub struct ScratchServer {
    session: Arc<BrowserSession>,
    state: Arc<Mutex<ScratchState>>,
    registry: Arc<ToolRegistry>,
    tool_router: ToolRouter<Self>,
}

impl ScratchServer {
    /// Launch a browser and serve it
    pub fn with_options(options: LaunchOptions) -> crate::error::Result<Self> {
        let session = BrowserSession::launch(options)?;
        Ok(Self::with_session(session))
    }

    /// Serve an already launched or connected session
    pub fn with_session(session: BrowserSession) -> Self {
        Self {
            session: Arc::new(session),
            state: Arc::new(Mutex::new(ScratchState::new())),
            registry: Arc::new(ToolRegistry::with_defaults()),
            tool_router: Self::tool_router(),
        }
    }

    /// Run a registered tool with serialized parameters
    pub(super) fn run_tool<P: Serialize>(&self, name: &str, params: &P) -> crate::error::Result<ToolResult> {
        let params = serde_json::to_value(params)?;
        let mut state = self.state.lock().map_err(|_| ScratchError::ToolExecutionFailed {
            tool: name.to_string(),
            reason: "scratch state lock poisoned".to_string(),
        })?;

        let mut context = ToolContext::new(&self.session, &mut state);
        self.registry.execute(name, params, &mut context)
    }
}

#[tool_handler]
impl ServerHandler for ScratchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Scratch structured JSON out of web pages. Open a page with browser_navigate, \
                 point scratch_element at one example element (CSS selector) to collect every \
                 element like it, then call scratch_export with the returned id to rename or \
                 drop keys and optionally write Scratch_<millis>.json."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
