//! Decision document written back to the host.
//!
//! Exactly four shapes are produced:
//! - `{}` when no rule matched
//! - `{"systemMessage": ...}` for warnings, and for blocks on hooks that
//!   cannot be denied
//! - `{"decision": "block", "reason": ..., "systemMessage": ...}` for Stop
//! - `{"hookSpecificOutput": {"hookEventName": ..., "permissionDecision": "deny"},
//!   "systemMessage": ...}` for PreToolUse / PostToolUse

use serde::{Deserialize, Serialize};

/// Top-level block marker used by Stop hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockDecision {
    /// Prevent the host from proceeding.
    Block,
}

/// Permission decision for tool hooks. Rules only ever deny; a tool call
/// with no blocking match gets no permission decision at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    /// Deny the tool call.
    Deny,
}

/// Tool-hook specific part of a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// The hook event name this output answers.
    pub hook_event_name: String,
    /// The permission decision.
    pub permission_decision: PermissionDecision,
}

/// The decision produced for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookDecision {
    /// `block` for blocked Stop hooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<BlockDecision>,

    /// Why the Stop hook was blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Message surfaced to the user and the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// Permission decision for tool hooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

impl HookDecision {
    /// The explicit no-op decision, serialized as `{}`.
    pub fn allow() -> Self {
        Self::default()
    }

    /// A decision that only carries a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            system_message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Block a Stop hook. The message is both the reason and the system message.
    pub fn stop_block(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            decision: Some(BlockDecision::Block),
            reason: Some(message.clone()),
            system_message: Some(message),
            hook_specific_output: None,
        }
    }

    /// Deny a tool call on a PreToolUse / PostToolUse hook.
    pub fn tool_deny(hook_event_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            system_message: Some(message.into()),
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: hook_event_name.into(),
                permission_decision: PermissionDecision::Deny,
            }),
            ..Default::default()
        }
    }

    /// Diagnostic decision for an internal failure. Never blocks.
    pub fn error(error: impl std::fmt::Display) -> Self {
        Self::message(format!("Hookify error: {}", error))
    }

    /// True for the no-op decision.
    pub fn is_allow(&self) -> bool {
        self == &Self::default()
    }

    /// True when the decision blocks or denies.
    pub fn is_blocking(&self) -> bool {
        self.decision.is_some()
            || self
                .hook_specific_output
                .as_ref()
                .is_some_and(|o| o.permission_decision == PermissionDecision::Deny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_allow_serializes_to_empty_object() {
        let json = serde_json::to_value(HookDecision::allow()).unwrap();
        assert_eq!(json, json!({}));
        assert!(HookDecision::allow().is_allow());
    }

    #[test]
    fn test_message_shape() {
        let json = serde_json::to_value(HookDecision::message("careful")).unwrap();
        assert_eq!(json, json!({"systemMessage": "careful"}));
    }

    #[test]
    fn test_stop_block_shape() {
        let decision = HookDecision::stop_block("tests missing");
        assert!(decision.is_blocking());
        let json = serde_json::to_value(decision).unwrap();
        assert_eq!(
            json,
            json!({
                "decision": "block",
                "reason": "tests missing",
                "systemMessage": "tests missing"
            })
        );
    }

    #[test]
    fn test_tool_deny_shape() {
        let decision = HookDecision::tool_deny("PreToolUse", "no");
        assert!(decision.is_blocking());
        let json = serde_json::to_value(decision).unwrap();
        assert_eq!(
            json,
            json!({
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "deny"
                },
                "systemMessage": "no"
            })
        );
    }

    #[test]
    fn test_error_never_blocks() {
        let decision = HookDecision::error("bad input");
        assert!(!decision.is_blocking());
        assert_eq!(
            decision.system_message.as_deref(),
            Some("Hookify error: bad input")
        );
    }
}
