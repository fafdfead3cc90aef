//! Hookify - markdown rule gate for Claude Code hooks.
//!
//! Each hook invocation reads one JSON event from stdin, loads the rules in
//! `.claude/hookify.*.local.md` (and `$CLAUDE_PLUGIN_ROOT/rules`), and writes
//! one JSON decision to stdout.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hookify::cli::HookCommand;
//! use hookify::hook::process_hook;
//! use hookify_common::RuleSources;
//!
//! let input = r#"{
//!     "hook_event_name": "PreToolUse",
//!     "tool_name": "Bash",
//!     "tool_input": {"command": "rm -rf /tmp/build"}
//! }"#;
//!
//! let decision = process_hook(HookCommand::PreToolUse, input, &RuleSources::from_env());
//! println!("{}", serde_json::to_string(&decision).unwrap());
//! ```

pub mod cli;
pub mod hook;

pub use cli::{Cli, HookCommand};
pub use hook::{process_hook, run_hook};
