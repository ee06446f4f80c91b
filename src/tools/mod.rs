//! Tool layer shared by the MCP server and library callers
//!
//! Each tool takes typed, JSON-deserializable parameters and runs against a
//! [`ToolContext`]: the live browser session plus the scratch state that
//! survives between calls (alias table and parked payloads).

pub mod export;
pub mod navigate;
pub mod scratch;
pub mod utils;

pub use export::{ExportParams, ExportTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use scratch::{ScratchParams, ScratchTool};

use crate::browser::BrowserSession;
use crate::error::{Result, ScratchError};
use crate::scratch::Scratcher;
use crate::store::PayloadStore;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// State kept across tool calls
#[derive(Debug, Default)]
pub struct ScratchState {
    pub scratcher: Scratcher,
    pub payloads: PayloadStore,
}

impl ScratchState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything a tool may touch while executing
pub struct ToolContext<'a> {
    pub session: &'a BrowserSession,
    pub state: &'a mut ScratchState,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession, state: &'a mut ScratchState) -> Self {
        Self { session, state }
    }
}

/// Outcome of a tool call
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// A typed tool
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Deserialize raw JSON parameters and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let params = serde_json::from_value(params).map_err(|e| ScratchError::InvalidArgument(
            format!("Invalid parameters for '{}': {}", self.name(), e),
        ))?;
        self.execute_typed(params, context)
    }

    /// JSON schema of [`Tool::Params`]
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe view of a [`Tool`], used by the registry
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
    fn parameters_schema(&self) -> Value;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding navigate, scratch and export
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(ScratchTool);
        registry.register(ExportTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| ScratchError::ToolNotFound(name.to_string()))?;

        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}
