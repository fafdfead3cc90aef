//! Rule discovery and loading.
//!
//! Rules are read from two places, in this order:
//!
//! 1. `.claude/hookify.*.local.md` in the working directory
//! 2. `$CLAUDE_PLUGIN_ROOT/rules/*.local.md`, when the variable is set
//!
//! Within one directory files are read in file-name order. Files that fail
//! to read or compile are logged and skipped; they never abort loading.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frontmatter::parse_document;
use crate::rule::{compile_rule, EventScope, Rule};

/// Project rule directory, relative to the working directory.
pub const PROJECT_RULES_DIR: &str = ".claude";

/// File name prefix of project rules.
pub const PROJECT_RULE_PREFIX: &str = "hookify.";

/// File name suffix of every rule file.
pub const RULE_SUFFIX: &str = ".local.md";

/// Environment variable naming the plugin installation root.
pub const PLUGIN_ROOT_ENV: &str = "CLAUDE_PLUGIN_ROOT";

/// Rule directory under the plugin root.
pub const PLUGIN_RULES_DIR: &str = "rules";

/// Where rules are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSources {
    /// Project rule directory. `None` disables project rules.
    pub project_dir: Option<PathBuf>,
    /// Plugin root. Rules are read from its `rules` subdirectory.
    pub plugin_root: Option<PathBuf>,
}

impl Default for RuleSources {
    fn default() -> Self {
        Self {
            project_dir: Some(PathBuf::from(PROJECT_RULES_DIR)),
            plugin_root: None,
        }
    }
}

impl RuleSources {
    /// No sources at all.
    pub fn new() -> Self {
        Self {
            project_dir: None,
            plugin_root: None,
        }
    }

    /// Project `.claude` directory plus `CLAUDE_PLUGIN_ROOT` when set and
    /// non-empty.
    pub fn from_env() -> Self {
        let plugin_root = std::env::var_os(PLUGIN_ROOT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            plugin_root,
            ..Self::default()
        }
    }

    /// Override the project rule directory.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// Override the plugin root.
    pub fn with_plugin_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.plugin_root = Some(root.into());
        self
    }

    /// The plugin rule directory, if a plugin root is configured.
    pub fn plugin_rules_dir(&self) -> Option<PathBuf> {
        self.plugin_root
            .as_ref()
            .map(|root| root.join(PLUGIN_RULES_DIR))
    }
}

fn is_project_rule(name: &str) -> bool {
    name.starts_with(PROJECT_RULE_PREFIX) && name.ends_with(RULE_SUFFIX)
}

fn is_plugin_rule(name: &str) -> bool {
    name.ends_with(RULE_SUFFIX)
}

/// Loads rules from a set of [`RuleSources`].
#[derive(Debug, Clone, Default)]
pub struct RuleLoader {
    sources: RuleSources,
}

impl RuleLoader {
    /// Create a loader over the given sources.
    pub fn new(sources: RuleSources) -> Self {
        Self { sources }
    }

    /// Load every enabled rule that applies to `scope`.
    ///
    /// With no scope, rules for every event are returned.
    pub fn load(&self, scope: Option<EventScope>) -> Vec<Rule> {
        let mut rules = Vec::new();

        if let Some(dir) = &self.sources.project_dir {
            rules.extend(load_directory(dir, is_project_rule));
        }
        if let Some(dir) = self.sources.plugin_rules_dir() {
            rules.extend(load_directory(&dir, is_plugin_rule));
        }

        rules.retain(|rule| rule.enabled && rule.event.applies_to(scope));

        tracing::debug!(
            "Loaded {} rule(s) for scope {:?}",
            rules.len(),
            scope
        );
        rules
    }
}

/// Load rules from the default sources.
pub fn load_rules(scope: Option<EventScope>) -> Vec<Rule> {
    RuleLoader::new(RuleSources::from_env()).load(scope)
}

/// Read and compile one rule file.
pub fn load_rule_file(path: &Path) -> Result<Rule> {
    let content = std::fs::read_to_string(path)?;
    let doc = parse_document(&content);
    compile_rule(&doc.metadata, &doc.body, Some(path))
}

fn load_directory(dir: &Path, accept: fn(&str) -> bool) -> Vec<Rule> {
    if !dir.is_dir() {
        tracing::debug!("Rule directory {} not found", dir.display());
        return Vec::new();
    }

    let mut rules = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !accept(name) {
            continue;
        }

        match load_rule_file(entry.path()) {
            Ok(rule) => {
                tracing::debug!(
                    "Loaded rule '{}' from {}",
                    rule.name,
                    entry.path().display()
                );
                rules.push(rule);
            }
            Err(e) => {
                tracing::warn!("Skipping rule file {}: {}", entry.path().display(), e);
            }
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_filters() {
        assert!(is_project_rule("hookify.no-rm.local.md"));
        assert!(!is_project_rule("no-rm.local.md"));
        assert!(!is_project_rule("hookify.no-rm.md"));
        assert!(is_plugin_rule("no-rm.local.md"));
        assert!(!is_plugin_rule("README.md"));
    }

    #[test]
    fn test_default_sources() {
        let sources = RuleSources::default();
        assert_eq!(sources.project_dir, Some(PathBuf::from(".claude")));
        assert_eq!(sources.plugin_rules_dir(), None);

        let sources = RuleSources::new().with_plugin_root("/opt/plugin");
        assert_eq!(sources.project_dir, None);
        assert_eq!(
            sources.plugin_rules_dir(),
            Some(PathBuf::from("/opt/plugin/rules"))
        );
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let loader = RuleLoader::new(
            RuleSources::new()
                .with_project_dir(temp.path().join("absent"))
                .with_plugin_root(temp.path().join("also-absent")),
        );
        assert!(loader.load(None).is_empty());
    }

    #[test]
    fn test_load_directory_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("hookify.b.local.md"), "---\nname: b\n---\n").unwrap();
        fs::write(dir.join("hookify.a.local.md"), "---\nname: a\n---\n").unwrap();
        fs::write(dir.join("other.local.md"), "---\nname: other\n---\n").unwrap();
        fs::create_dir(dir.join("hookify.sub.local.md")).unwrap();

        let names: Vec<_> = load_directory(dir, is_project_rule)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_load_rule_file_records_source() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hookify.x.local.md");
        fs::write(&path, "---\nname: x\nevent: bash\npattern: sudo\n---\nNo sudo.").unwrap();

        let rule = load_rule_file(&path).unwrap();
        assert_eq!(rule.name, "x");
        assert_eq!(rule.message, "No sudo.");
        assert_eq!(rule.source, Some(path));
    }

    #[test]
    fn test_load_rule_file_missing() {
        let temp = TempDir::new().unwrap();
        assert!(load_rule_file(&temp.path().join("nope.local.md")).is_err());
    }
}
