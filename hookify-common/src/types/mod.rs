//! Type definitions for hook inputs and outputs.

mod common;
mod input;
mod output;

pub use common::HookType;
pub use input::HookEvent;
pub use output::{BlockDecision, HookDecision, HookSpecificOutput, PermissionDecision};
