//! Hook event names shared by inputs, outputs and the CLI.

use serde::{Deserialize, Serialize};

/// Hook events that shape the decision document.
///
/// Events outside this list are still evaluated; they only ever receive a
/// plain `systemMessage` decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookType {
    /// Before tool execution.
    PreToolUse,
    /// After tool succeeds.
    PostToolUse,
    /// Claude finishes responding.
    Stop,
    /// User submits a prompt.
    UserPromptSubmit,
}

impl HookType {
    /// The event name as the host spells it in `hook_event_name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::PreToolUse => "PreToolUse",
            HookType::PostToolUse => "PostToolUse",
            HookType::Stop => "Stop",
            HookType::UserPromptSubmit => "UserPromptSubmit",
        }
    }

    /// Parse a `hook_event_name`; unknown names yield `None`.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "PreToolUse" => Some(HookType::PreToolUse),
            "PostToolUse" => Some(HookType::PostToolUse),
            "Stop" => Some(HookType::Stop),
            "UserPromptSubmit" => Some(HookType::UserPromptSubmit),
            _ => None,
        }
    }

    /// True for the hooks that gate a tool call.
    pub fn is_tool_hook(&self) -> bool {
        matches!(self, HookType::PreToolUse | HookType::PostToolUse)
    }
}

impl std::fmt::Display for HookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
