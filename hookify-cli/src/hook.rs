//! One hook invocation: parse the event, load rules, evaluate.

use hookify_common::{HookDecision, HookEvent, Result, RuleEngine, RuleLoader, RuleSources};

use crate::cli::HookCommand;

/// Evaluate one raw JSON event for `hook`.
///
/// Empty input allows. `hook` only selects which rules are loaded; the
/// decision shape follows the payload's own `hook_event_name`.
pub fn run_hook(hook: HookCommand, input: &str, sources: &RuleSources) -> Result<HookDecision> {
    let input = input.trim();
    if input.is_empty() {
        tracing::warn!("no input provided");
        return Ok(HookDecision::allow());
    }

    let event: HookEvent = serde_json::from_str(input)?;

    let scope = hook.scope(event.tool_name());
    let rules = RuleLoader::new(sources.clone()).load(scope);

    let decision = RuleEngine::new().evaluate(&rules, &event);
    tracing::debug!(
        hook = %event.hook_event_name,
        rules = rules.len(),
        blocking = decision.is_blocking(),
        "Hook processed"
    );
    Ok(decision)
}

/// Like [`run_hook`], but never fails: errors become a diagnostic message
/// that lets the host proceed.
pub fn process_hook(hook: HookCommand, input: &str, sources: &RuleSources) -> HookDecision {
    run_hook(hook, input, sources).unwrap_or_else(|e| {
        tracing::error!("{}", e);
        HookDecision::error(e)
    })
}
