use std::path::Path;

use crate::condition::{Condition, Operator};
use crate::error::{HookifyError, Result};
use crate::frontmatter::{Frontmatter, MetaValue};
use crate::rule::{Rule, RuleAction, RuleEvent};

const DEFAULT_NAME: &str = "unnamed";

/// Compile parsed frontmatter and a message body into a [`Rule`].
///
/// Empty metadata means the file had no usable frontmatter and is rejected.
/// An explicit `conditions` list takes precedence over a top-level `pattern`.
pub fn compile_rule(metadata: &Frontmatter, body: &str, source: Option<&Path>) -> Result<Rule> {
    if metadata.is_empty() {
        let path = source
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<inline>".to_string());
        return Err(HookifyError::malformed(path, "missing frontmatter"));
    }

    let event = RuleEvent::parse(scalar(metadata, "event"));
    let legacy_pattern = scalar(metadata, "pattern")
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let mut conditions = conditions(metadata);
    if conditions.is_empty() {
        if let Some(pattern) = &legacy_pattern {
            conditions.push(Condition::new(
                event.default_field(),
                Operator::RegexMatch,
                pattern.as_str(),
            ));
        }
    }

    Ok(Rule {
        name: name(metadata),
        enabled: metadata.get("enabled").and_then(MetaValue::as_bool) != Some(false),
        event,
        legacy_pattern,
        conditions,
        action: RuleAction::parse(scalar(metadata, "action")),
        tool_matcher: scalar(metadata, "tool_matcher").map(str::to_string),
        message: body.trim().to_string(),
        source: source.map(Path::to_path_buf),
    })
}

fn scalar<'a>(metadata: &'a Frontmatter, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(MetaValue::as_str)
}

fn name(metadata: &Frontmatter) -> String {
    match metadata.get("name") {
        Some(MetaValue::Scalar(s)) if !s.is_empty() => s.clone(),
        Some(MetaValue::Bool(true)) => "true".to_string(),
        _ => DEFAULT_NAME.to_string(),
    }
}

fn conditions(metadata: &Frontmatter) -> Vec<Condition> {
    let Some(items) = metadata.get("conditions").and_then(MetaValue::as_list) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_map())
        .map(|map| {
            let get = |key: &str| map.get(key).map(String::as_str);
            Condition::new(
                get("field").unwrap_or_default(),
                Operator::parse(get("operator")),
                get("pattern").unwrap_or_default(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse_document;
    use std::path::PathBuf;

    fn compile(content: &str) -> Result<Rule> {
        let doc = parse_document(content);
        compile_rule(&doc.metadata, &doc.body, None)
    }

    #[test]
    fn test_defaults() {
        let rule = compile("---\nevent: bash\n---\n").unwrap();
        assert_eq!(rule.name, "unnamed");
        assert!(rule.enabled);
        assert_eq!(rule.action, RuleAction::Warn);
        assert_eq!(rule.tool_matcher, None);
        assert!(rule.conditions.is_empty());
        assert_eq!(rule.message, "");
    }

    #[test]
    fn test_missing_event_is_all() {
        let rule = compile("---\nname: x\n---\n").unwrap();
        assert_eq!(rule.event, RuleEvent::All);
    }

    #[test]
    fn test_empty_metadata_is_malformed() {
        let err = compile("just a body").unwrap_err();
        assert!(matches!(err, HookifyError::MalformedRule { .. }));
        assert!(err.to_string().contains("<inline>"));

        let doc = parse_document("no frontmatter");
        let err =
            compile_rule(&doc.metadata, &doc.body, Some(Path::new("/r/hookify.x.local.md")))
                .unwrap_err();
        assert!(err.to_string().contains("/r/hookify.x.local.md"));
    }

    #[test]
    fn test_conditions_list() {
        let rule = compile(
            "---\nname: env\nconditions:\n  - field: file_path\n    operator: ends_with\n    pattern: .env\n  - field: new_text, pattern: KEY\n  - stray\n---\nDon't.",
        )
        .unwrap();
        assert_eq!(
            rule.conditions,
            vec![
                Condition::new("file_path", Operator::EndsWith, ".env"),
                Condition::new("new_text", Operator::RegexMatch, "KEY"),
            ]
        );
        assert_eq!(rule.message, "Don't.");
    }

    #[test]
    fn test_legacy_pattern_field_by_event() {
        for (event, field) in [("bash", "command"), ("file", "new_text"), ("stop", "content")] {
            let rule = compile(&format!("---\nevent: {}\npattern: rm -rf\n---\n", event)).unwrap();
            assert_eq!(rule.legacy_pattern.as_deref(), Some("rm -rf"));
            assert_eq!(
                rule.conditions,
                vec![Condition::new(field, Operator::RegexMatch, "rm -rf")]
            );
        }
    }

    #[test]
    fn test_conditions_win_over_legacy_pattern() {
        let rule = compile(
            "---\nevent: bash\npattern: ignored\nconditions:\n  - field: command\n    pattern: used\n---\n",
        )
        .unwrap();
        assert_eq!(rule.conditions.len(), 1);
        assert_eq!(rule.conditions[0].pattern, "used");
    }

    #[test]
    fn test_empty_legacy_pattern_is_ignored() {
        let rule = compile("---\nevent: bash\npattern: \"\"\n---\n").unwrap();
        assert_eq!(rule.legacy_pattern, None);
        assert!(rule.conditions.is_empty());
    }

    #[test]
    fn test_enabled_only_false_disables() {
        assert!(!compile("---\nenabled: false\n---\n").unwrap().enabled);
        assert!(!compile("---\nenabled: FALSE\n---\n").unwrap().enabled);
        assert!(compile("---\nenabled: no\n---\n").unwrap().enabled);
        assert!(compile("---\nenabled: \"yes\"\n---\n").unwrap().enabled);
    }

    #[test]
    fn test_action_block_exact() {
        assert_eq!(
            compile("---\naction: block\n---\n").unwrap().action,
            RuleAction::Block
        );
        assert_eq!(
            compile("---\naction: deny\n---\n").unwrap().action,
            RuleAction::Warn
        );
    }

    #[test]
    fn test_tool_matcher_and_source() {
        let doc = parse_document("---\ntool_matcher: Edit|Write\n---\nbody");
        let path = PathBuf::from("/tmp/hookify.a.local.md");
        let rule = compile_rule(&doc.metadata, &doc.body, Some(&path)).unwrap();
        assert_eq!(rule.tool_matcher.as_deref(), Some("Edit|Write"));
        assert_eq!(rule.source, Some(path));
    }
}
