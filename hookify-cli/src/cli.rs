//! CLI definition for the hookify command-line interface.

use clap::{Parser, Subcommand};
use hookify_common::EventScope;

/// Hookify - markdown rule gate for Claude Code hooks
///
/// Reads one hook event as JSON from stdin and writes the decision as JSON
/// to stdout.
#[derive(Parser, Debug)]
#[command(name = "hookify")]
#[command(version)]
#[command(about = "Hookify - markdown rule gate for Claude Code hooks")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: HookCommand,
}

/// The hook this invocation was registered for.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCommand {
    /// Evaluate bash and file rules before a tool runs
    PreToolUse,
    /// Evaluate bash and file rules after a tool ran
    PostToolUse,
    /// Evaluate stop rules when the agent finishes
    Stop,
    /// Evaluate prompt rules when the user submits a prompt
    UserPromptSubmit,
}

impl HookCommand {
    /// Rule scope to load. Tool hooks pick it from the tool name; an
    /// unrecognized tool loads every rule.
    pub fn scope(&self, tool_name: &str) -> Option<EventScope> {
        match self {
            HookCommand::PreToolUse | HookCommand::PostToolUse => EventScope::for_tool(tool_name),
            HookCommand::Stop => Some(EventScope::Stop),
            HookCommand::UserPromptSubmit => Some(EventScope::Prompt),
        }
    }
}
