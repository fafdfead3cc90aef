//! Compiled rules and the per-rule match test.

mod compiler;

pub use compiler::compile_rule;

use std::fmt;
use std::path::PathBuf;

use crate::condition::{Condition, PatternCache};
use crate::error::Result;
use crate::frontmatter::parse_document;
use crate::types::HookEvent;

/// The class of event a rule is written for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleEvent {
    /// Shell commands.
    Bash,
    /// File writes and edits.
    File,
    /// The agent stopping.
    Stop,
    /// User prompt submission.
    Prompt,
    /// Every event.
    All,
    /// An event name this version does not know. Only loaded when the
    /// caller requests no scope.
    Other(String),
}

impl RuleEvent {
    /// Parse the `event` metadata value. A missing value means `all`.
    pub fn parse(name: Option<&str>) -> Self {
        match name.filter(|n| !n.is_empty()).unwrap_or("all") {
            "bash" => RuleEvent::Bash,
            "file" => RuleEvent::File,
            "stop" => RuleEvent::Stop,
            "prompt" => RuleEvent::Prompt,
            "all" => RuleEvent::All,
            other => RuleEvent::Other(other.to_string()),
        }
    }

    /// The event name as written in rule files.
    pub fn as_str(&self) -> &str {
        match self {
            RuleEvent::Bash => "bash",
            RuleEvent::File => "file",
            RuleEvent::Stop => "stop",
            RuleEvent::Prompt => "prompt",
            RuleEvent::All => "all",
            RuleEvent::Other(name) => name,
        }
    }

    /// True when a rule for this event should be loaded for `scope`.
    pub fn applies_to(&self, scope: Option<EventScope>) -> bool {
        let Some(scope) = scope else {
            return true;
        };
        match self {
            RuleEvent::All => true,
            RuleEvent::Bash => scope == EventScope::Bash,
            RuleEvent::File => scope == EventScope::File,
            RuleEvent::Stop => scope == EventScope::Stop,
            RuleEvent::Prompt => scope == EventScope::Prompt,
            RuleEvent::Other(_) => false,
        }
    }

    /// The field a legacy top-level `pattern` is tested against.
    pub fn default_field(&self) -> &'static str {
        match self {
            RuleEvent::Bash => "command",
            RuleEvent::File => "new_text",
            _ => "content",
        }
    }
}

impl fmt::Display for RuleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The event class requested by a hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventScope {
    /// Shell commands.
    Bash,
    /// File writes and edits.
    File,
    /// The agent stopping.
    Stop,
    /// User prompt submission.
    Prompt,
}

impl EventScope {
    /// Scope for a tool hook, keyed by tool name.
    pub fn for_tool(tool_name: &str) -> Option<Self> {
        match tool_name {
            "Bash" => Some(EventScope::Bash),
            "Edit" | "Write" | "MultiEdit" => Some(EventScope::File),
            _ => None,
        }
    }
}

/// What happens when a rule matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RuleAction {
    /// Surface the message and let the event proceed.
    #[default]
    Warn,
    /// Surface the message and block or deny the event.
    Block,
}

impl RuleAction {
    /// Parse the `action` metadata value. Only the exact string `block` blocks.
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("block") => RuleAction::Block,
            _ => RuleAction::Warn,
        }
    }
}

/// A compiled rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Rule name, shown in rendered messages.
    pub name: String,
    /// Disabled rules are never loaded.
    pub enabled: bool,
    /// The event class the rule is written for.
    pub event: RuleEvent,
    /// The legacy top-level `pattern`, as written.
    pub legacy_pattern: Option<String>,
    /// Conditions that must all hold.
    pub conditions: Vec<Condition>,
    /// Warn or block.
    pub action: RuleAction,
    /// Pipe-separated tool names, or `*`.
    pub tool_matcher: Option<String>,
    /// The markdown body shown when the rule matches.
    pub message: String,
    /// The file the rule was loaded from.
    pub source: Option<PathBuf>,
}

impl Rule {
    /// Compile a rule from an in-memory markdown document.
    pub fn from_markdown(content: &str) -> Result<Self> {
        let doc = parse_document(content);
        compile_rule(&doc.metadata, &doc.body, None)
    }

    /// True when the rule's tool matcher admits `tool_name`.
    pub fn matches_tool(&self, tool_name: &str) -> bool {
        match self.tool_matcher.as_deref() {
            None | Some("") | Some("*") => true,
            Some(matcher) => matcher.split('|').any(|alt| alt == tool_name),
        }
    }

    /// True when the rule fires for `event`.
    ///
    /// A rule without conditions never fires.
    pub fn matches(&self, event: &HookEvent, cache: &PatternCache) -> bool {
        if !self.matches_tool(event.tool_name()) {
            return false;
        }
        if self.conditions.is_empty() {
            return false;
        }
        self.conditions.iter().all(|c| c.evaluate(event, cache))
    }
}
