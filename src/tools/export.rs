use crate::error::{Result, ScratchError};
use crate::export::{KeyOption, KeyOptions, write_export};
use crate::tools::{ScratchState, Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::Path;

/// Parameters for the export tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// Payload id returned by the scratch tool
    pub id: u64,

    /// Include/rename choices; omitted keys are dropped when any are given
    #[serde(default)]
    pub options: Vec<KeyOption>,

    /// Directory to write `Scratch_<millis>.json` into; nothing is written when absent
    #[serde(default)]
    pub out_dir: Option<String>,
}

/// Re-keys a parked payload and optionally writes it to disk
#[derive(Default)]
pub struct ExportTool;

impl ExportTool {
    /// Take the payload out of the store and apply the options.
    ///
    /// The store is cleared whether or not `id` is found.
    pub fn export_payload(params: &ExportParams, state: &mut ScratchState) -> Result<Value> {
        let payload = state
            .payloads
            .take(params.id)
            .ok_or(ScratchError::PayloadNotFound(params.id))?;

        let items = if params.options.is_empty() {
            payload
        } else {
            KeyOptions::new(params.options.clone()).apply(&payload)
        };
        let value = Value::Array(items);

        let path = match &params.out_dir {
            Some(dir) => Some(write_export(Path::new(dir), &value)?.display().to_string()),
            None => None,
        };

        Ok(json!({
            "id": params.id,
            "path": path,
            "json": value,
        }))
    }
}

impl Tool for ExportTool {
    type Params = ExportParams;

    fn name(&self) -> &str {
        "export"
    }

    fn execute_typed(&self, params: ExportParams, context: &mut ToolContext) -> Result<ToolResult> {
        let data = Self::export_payload(&params, context.state)?;
        Ok(ToolResult::success_with(data))
    }
}
