//! Hookify Common - rule gate core library.
//!
//! This crate loads markdown rule files, evaluates them against intercepted
//! agent hook events, and renders the warn/block decision returned to the
//! host.

pub mod condition;
pub mod engine;
pub mod error;
pub mod extract;
pub mod frontmatter;
pub mod loader;
pub mod rule;
pub mod types;

pub use condition::{Condition, Operator, PatternCache};
pub use engine::RuleEngine;
pub use error::{HookifyError, Result};
pub use extract::{extract_field, ToolPayload};
pub use loader::{load_rule_file, load_rules, RuleLoader, RuleSources};
pub use rule::{EventScope, Rule, RuleAction, RuleEvent};
pub use types::{HookDecision, HookEvent, HookType};
