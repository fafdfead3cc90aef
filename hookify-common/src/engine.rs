//! Rule evaluation and decision rendering.

use std::sync::Arc;

use crate::condition::PatternCache;
use crate::rule::{Rule, RuleAction};
use crate::types::{HookDecision, HookEvent, HookType};

/// Evaluates rules against events and renders the decision.
///
/// The engine owns the regex cache; clones share it.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    cache: Arc<PatternCache>,
}

impl RuleEngine {
    /// Create an engine with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an existing cache.
    pub fn with_cache(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }

    /// The compiled pattern cache.
    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Rules that fire for `event`, in load order.
    pub fn matching_rules<'r>(&self, rules: &'r [Rule], event: &HookEvent) -> Vec<&'r Rule> {
        rules
            .iter()
            .filter(|rule| rule.matches(event, &self.cache))
            .collect()
    }

    /// Evaluate `rules` against `event`.
    ///
    /// Any blocking match wins and warnings are then dropped. How a block is
    /// expressed depends on the hook: Stop gets a top-level `decision`, tool
    /// hooks get a `deny` permission, anything else only a message.
    pub fn evaluate(&self, rules: &[Rule], event: &HookEvent) -> HookDecision {
        let (blocking, warning): (Vec<&Rule>, Vec<&Rule>) = self
            .matching_rules(rules, event)
            .into_iter()
            .partition(|rule| rule.action == RuleAction::Block);

        tracing::debug!(
            "{} rule(s) evaluated for {}: {} blocking, {} warning",
            rules.len(),
            event.hook_event_name,
            blocking.len(),
            warning.len()
        );

        if !blocking.is_empty() {
            let message = render(&blocking);
            return match event.hook_type() {
                Some(HookType::Stop) => HookDecision::stop_block(message),
                Some(hook) if hook.is_tool_hook() => {
                    HookDecision::tool_deny(&event.hook_event_name, message)
                }
                _ => HookDecision::message(message),
            };
        }

        if !warning.is_empty() {
            return HookDecision::message(render(&warning));
        }

        HookDecision::allow()
    }
}

fn render(rules: &[&Rule]) -> String {
    rules
        .iter()
        .map(|rule| format!("**[{}]**\n{}", rule.name, rule.message))
        .collect::<Vec<_>>()
        .join("\n\n")
}
