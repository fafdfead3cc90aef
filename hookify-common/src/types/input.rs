//! Hook event payload as sent by the host.
//!
//! Every field is optional on the wire and may be `null`. A missing
//! `hook_event_name` or `tool_name` reads as the empty string and a missing
//! `tool_input` as an empty map.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::extract::ToolPayload;
use crate::types::HookType;

/// One intercepted hook event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookEvent {
    /// The hook event name (e.g. `PreToolUse`, `Stop`).
    #[serde(default, deserialize_with = "null_as_empty_string")]
    pub hook_event_name: String,

    /// The tool being invoked, for tool hooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Tool input parameters.
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub tool_input: Map<String, Value>,

    /// Stop reason, for stop hooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Path to the session transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<PathBuf>,

    /// Prompt text, for prompt hooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
}

fn null_as_empty_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl HookEvent {
    /// Create an event with the given hook name and nothing else.
    pub fn new(hook_event_name: impl Into<String>) -> Self {
        Self {
            hook_event_name: hook_event_name.into(),
            ..Default::default()
        }
    }

    /// Set the tool name and input. A non-object input is treated as empty.
    pub fn with_tool(mut self, tool_name: impl Into<String>, tool_input: Value) -> Self {
        self.tool_name = Some(tool_name.into());
        self.tool_input = match tool_input {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    /// Set the stop reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the transcript path.
    pub fn with_transcript_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript_path = Some(path.into());
        self
    }

    /// Set the user prompt.
    pub fn with_user_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.user_prompt = Some(prompt.into());
        self
    }

    /// The tool name, or the empty string when absent.
    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or_default()
    }

    /// The hook type, when the event name is one that shapes decisions.
    pub fn hook_type(&self) -> Option<HookType> {
        HookType::from_event_name(&self.hook_event_name)
    }

    /// Typed view of the tool input for the invoked tool.
    pub fn tool_payload(&self) -> ToolPayload<'_> {
        ToolPayload::from_tool(self.tool_name(), &self.tool_input)
    }
}
