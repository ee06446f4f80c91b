use crate::dom::DomTree;
use crate::error::{Result, ScratchError};
use crate::export::KeyOptions;
use crate::tools::{ScratchState, Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Parameters for the scratch tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScratchParams {
    /// CSS selector locating the example element; every element like it is scratched
    #[serde(default)]
    pub target: Option<String>,

    /// Which match of `target` is the example (default: 0)
    #[serde(default)]
    pub nth: usize,

    /// Scratch every match of this selector instead of deriving one from `target`
    #[serde(default)]
    pub selector: Option<String>,
}

/// Scratches the current page and parks the result for export
#[derive(Default)]
pub struct ScratchTool;

impl ScratchTool {
    /// Scratch an already captured tree.
    ///
    /// The result carries the payload id, the selector used, the normalized
    /// items and the include/rename options (null when the payload holds
    /// strings or has too many keys to review).
    pub fn scratch_tree(tree: &DomTree, params: &ScratchParams, state: &mut ScratchState) -> Result<Value> {
        let scratch = match (&params.selector, &params.target) {
            (Some(selector), _) => state.scratcher.scratch_selector(tree, selector)?,
            (None, Some(target)) => {
                let element = tree.find_target(target, params.nth)?;
                state.scratcher.scratch(tree, element)
            }
            (None, None) => {
                return Err(ScratchError::InvalidArgument(
                    "Either target or selector must be provided".to_string(),
                ));
            }
        };

        let key_options = KeyOptions::from_payload(&scratch.items).filter(KeyOptions::offers_table);
        let count = scratch.len();
        let id = state.payloads.put(scratch.items.clone());

        Ok(json!({
            "id": id,
            "url": tree.source_url(),
            "selector": scratch.selector,
            "count": count,
            "data": scratch.items,
            "key_options": key_options,
        }))
    }
}

impl Tool for ScratchTool {
    type Params = ScratchParams;

    fn name(&self) -> &str {
        "scratch"
    }

    fn execute_typed(&self, params: ScratchParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tree = context.session.capture()?;
        let data = Self::scratch_tree(&tree, &params, context.state)?;
        Ok(ToolResult::success_with(data))
    }
}
