//! Field extraction from hook events.
//!
//! A condition names a field (`command`, `new_text`, `transcript`, ...) and
//! the extractor resolves it against the event in this order:
//!
//! 1. An exact key in `tool_input`
//! 2. Event-level fields: `reason`, `transcript`, `user_prompt`
//! 3. Tool-specific synonyms through [`ToolPayload`]
//!
//! A field that resolves nowhere yields `None`, which is not the same as an
//! empty string: conditions against unresolved fields never match.

use std::borrow::Cow;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{HookifyError, Result};
use crate::types::HookEvent;

/// Typed view of a tool's input, keyed by tool kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolPayload<'a> {
    /// Shell command execution (`Bash`).
    Bash {
        /// The command line.
        command: Option<&'a str>,
    },
    /// Single file write or edit (`Write`, `Edit`).
    FileEdit {
        /// Target file.
        file_path: Option<&'a str>,
        /// Full content, for `Write`.
        content: Option<&'a str>,
        /// Replacement text, for `Edit`.
        new_string: Option<&'a str>,
        /// Replaced text, for `Edit`.
        old_string: Option<&'a str>,
    },
    /// Batched edits to one file (`MultiEdit`).
    MultiEdit {
        /// Target file.
        file_path: Option<&'a str>,
        /// The `new_string` of each edit, in order. `None` when `edits` is absent.
        edits: Option<Vec<&'a str>>,
    },
    /// Any other tool; exposes no synonyms.
    Other,
}

fn str_member<'a>(input: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

impl<'a> ToolPayload<'a> {
    /// Build the view for `tool_name` over its raw input.
    pub fn from_tool(tool_name: &str, input: &'a Map<String, Value>) -> Self {
        match tool_name {
            "Bash" => ToolPayload::Bash {
                command: str_member(input, "command"),
            },
            "Write" | "Edit" => ToolPayload::FileEdit {
                file_path: str_member(input, "file_path"),
                content: str_member(input, "content"),
                new_string: str_member(input, "new_string"),
                old_string: str_member(input, "old_string"),
            },
            "MultiEdit" => ToolPayload::MultiEdit {
                file_path: str_member(input, "file_path"),
                edits: input.get("edits").and_then(Value::as_array).map(|edits| {
                    edits
                        .iter()
                        .map(|edit| {
                            edit.get("new_string")
                                .and_then(Value::as_str)
                                .unwrap_or_default()
                        })
                        .collect()
                }),
            },
            _ => ToolPayload::Other,
        }
    }

    /// The command line, for tools that run one.
    pub fn command(&self) -> Option<&'a str> {
        match self {
            ToolPayload::Bash { command } => Some(command.unwrap_or_default()),
            _ => None,
        }
    }

    /// The text being written: `new_string` falling back to `content` for
    /// single-file tools, every edit's `new_string` joined by spaces for
    /// `MultiEdit`.
    pub fn new_text(&self) -> Option<Cow<'a, str>> {
        match self {
            ToolPayload::FileEdit {
                content,
                new_string,
                ..
            } => Some(Cow::Borrowed(new_string.or(*content).unwrap_or_default())),
            ToolPayload::MultiEdit { edits, .. } => {
                edits.as_ref().map(|edits| Cow::Owned(edits.join(" ")))
            }
            _ => None,
        }
    }

    /// The text being replaced, for single-file edits.
    pub fn old_text(&self) -> Option<&'a str> {
        match self {
            ToolPayload::FileEdit { old_string, .. } => Some(old_string.unwrap_or_default()),
            _ => None,
        }
    }

    /// The target file, for file tools.
    pub fn file_path(&self) -> Option<&'a str> {
        match self {
            ToolPayload::FileEdit { file_path, .. } | ToolPayload::MultiEdit { file_path, .. } => {
                Some(file_path.unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Resolve a rule field name through this tool's synonyms.
    pub fn resolve(&self, field: &str) -> Option<Cow<'a, str>> {
        match field {
            "command" => self.command().map(Cow::Borrowed),
            "content" | "new_text" => self.new_text(),
            "new_string" if matches!(self, ToolPayload::FileEdit { .. }) => self.new_text(),
            "old_text" | "old_string" => self.old_text().map(Cow::Borrowed),
            "file_path" => self.file_path().map(Cow::Borrowed),
            _ => None,
        }
    }
}

/// Resolve `field` against `event`.
pub fn extract_field<'e>(field: &str, event: &'e HookEvent) -> Option<Cow<'e, str>> {
    if let Some(value) = event.tool_input.get(field) {
        return Some(match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        });
    }

    match field {
        "reason" => return Some(Cow::Borrowed(event.reason.as_deref().unwrap_or_default())),
        "transcript" => {
            let text = read_transcript(event).unwrap_or_else(|e| {
                tracing::debug!("{}", e);
                String::new()
            });
            return Some(Cow::Owned(text));
        }
        "user_prompt" => {
            return Some(Cow::Borrowed(
                event.user_prompt.as_deref().unwrap_or_default(),
            ))
        }
        _ => {}
    }

    event.tool_payload().resolve(field)
}

/// Read the transcript named by the event. An event without a transcript
/// path has an empty transcript.
pub fn read_transcript(event: &HookEvent) -> Result<String> {
    match &event.transcript_path {
        Some(path) => read_file(path),
        None => Ok(String::new()),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| HookifyError::Transcript {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn value(field: &str, event: &HookEvent) -> Option<String> {
        extract_field(field, event).map(Cow::into_owned)
    }

    #[test]
    fn test_direct_tool_input_key_wins() {
        let event = HookEvent::new("PreToolUse").with_tool("Bash", json!({"command": "ls"}));
        assert_eq!(value("command", &event).as_deref(), Some("ls"));
    }

    #[test]
    fn test_direct_non_string_is_stringified() {
        let event = HookEvent::new("PreToolUse")
            .with_tool("Custom", json!({"timeout": 30, "flag": true, "none": null}));
        assert_eq!(value("timeout", &event).as_deref(), Some("30"));
        assert_eq!(value("flag", &event).as_deref(), Some("true"));
        assert_eq!(value("none", &event).as_deref(), Some("null"));
    }

    #[test]
    fn test_direct_key_shadows_event_fields() {
        let event = HookEvent::new("Stop")
            .with_reason("outer")
            .with_tool("Custom", json!({"reason": "inner"}));
        assert_eq!(value("reason", &event).as_deref(), Some("inner"));
    }

    #[test]
    fn test_event_level_fields_default_to_empty() {
        let event = HookEvent::new("Stop");
        assert_eq!(value("reason", &event).as_deref(), Some(""));
        assert_eq!(value("user_prompt", &event).as_deref(), Some(""));
        assert_eq!(value("transcript", &event).as_deref(), Some(""));
    }

    #[test]
    fn test_event_level_fields() {
        let event = HookEvent::new("UserPromptSubmit")
            .with_reason("finished")
            .with_user_prompt("deploy to prod");
        assert_eq!(value("reason", &event).as_deref(), Some("finished"));
        assert_eq!(value("user_prompt", &event).as_deref(), Some("deploy to prod"));
    }

    #[test]
    fn test_transcript_is_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "user: please run the tests").unwrap();
        let event = HookEvent::new("Stop").with_transcript_path(file.path());
        assert_eq!(
            value("transcript", &event).as_deref(),
            Some("user: please run the tests")
        );
    }

    #[test]
    fn test_unreadable_transcript_is_empty() {
        let event = HookEvent::new("Stop").with_transcript_path("/nonexistent/transcript.jsonl");
        assert_eq!(value("transcript", &event).as_deref(), Some(""));
        assert!(matches!(
            read_transcript(&event),
            Err(HookifyError::Transcript { .. })
        ));
    }

    #[test]
    fn test_bash_command_synonym_defaults_to_empty() {
        let event = HookEvent::new("PreToolUse").with_tool("Bash", json!({}));
        assert_eq!(value("command", &event).as_deref(), Some(""));
    }

    #[test]
    fn test_write_new_text_uses_content() {
        let event = HookEvent::new("PreToolUse").with_tool(
            "Write",
            json!({"file_path": "/tmp/a.ts", "content": "console.log(1)"}),
        );
        assert_eq!(value("new_text", &event).as_deref(), Some("console.log(1)"));
        assert_eq!(value("new_string", &event).as_deref(), Some("console.log(1)"));
        assert_eq!(value("file_path", &event).as_deref(), Some("/tmp/a.ts"));
    }

    #[test]
    fn test_edit_synonyms() {
        let event = HookEvent::new("PreToolUse").with_tool(
            "Edit",
            json!({"file_path": "/tmp/a.rs", "old_string": "foo", "new_string": "bar"}),
        );
        assert_eq!(value("new_text", &event).as_deref(), Some("bar"));
        assert_eq!(value("content", &event).as_deref(), Some("bar"));
        assert_eq!(value("old_text", &event).as_deref(), Some("foo"));
    }

    #[test]
    fn test_edit_missing_old_string_is_empty() {
        let event = HookEvent::new("PreToolUse").with_tool("Edit", json!({"new_string": "x"}));
        assert_eq!(value("old_text", &event).as_deref(), Some(""));
    }

    #[test]
    fn test_multi_edit_joins_new_strings() {
        let event = HookEvent::new("PreToolUse").with_tool(
            "MultiEdit",
            json!({
                "file_path": "/tmp/b.py",
                "edits": [
                    {"old_string": "a", "new_string": "print(1)"},
                    {"old_string": "b"},
                    {"old_string": "c", "new_string": "print(3)"}
                ]
            }),
        );
        assert_eq!(
            value("new_text", &event).as_deref(),
            Some("print(1)  print(3)")
        );
        assert_eq!(value("file_path", &event).as_deref(), Some("/tmp/b.py"));
        assert_eq!(value("old_text", &event), None);
        assert_eq!(value("new_string", &event), None);
    }

    #[test]
    fn test_multi_edit_without_edits_is_unresolved() {
        let event = HookEvent::new("PreToolUse").with_tool("MultiEdit", json!({}));
        assert_eq!(value("content", &event), None);
    }

    #[test]
    fn test_unknown_field_is_unresolved() {
        let event = HookEvent::new("PreToolUse").with_tool("Read", json!({"file_path": "/x"}));
        assert_eq!(value("command", &event), None);
        assert_eq!(value("new_text", &event), None);
        assert_eq!(value("file_path", &event).as_deref(), Some("/x"));
    }

    #[test]
    fn test_tool_payload_capabilities() {
        let input = json!({"command": "cargo test"});
        let map = input.as_object().unwrap();
        let payload = ToolPayload::from_tool("Bash", map);
        assert_eq!(payload.command(), Some("cargo test"));
        assert_eq!(payload.file_path(), None);
        assert_eq!(payload.new_text(), None);
        assert_eq!(ToolPayload::from_tool("Glob", map), ToolPayload::Other);
    }
}
