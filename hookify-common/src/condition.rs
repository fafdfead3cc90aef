//! Condition evaluation and the compiled pattern cache.

use std::fmt;

use dashmap::DashMap;
use regex::{Regex, RegexBuilder};

use crate::error::{HookifyError, Result};
use crate::extract::extract_field;
use crate::types::HookEvent;

/// Comparison applied between an extracted field value and a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Case-insensitive regular expression search.
    RegexMatch,
    /// Substring present.
    Contains,
    /// Whole value equal.
    Equals,
    /// Substring absent.
    NotContains,
    /// Value starts with the pattern.
    StartsWith,
    /// Value ends with the pattern.
    EndsWith,
    /// An operator name this version does not know. Never matches.
    Unrecognized(String),
}

impl Operator {
    /// Parse an operator name as written in a rule file.
    ///
    /// A missing or empty name means `regex_match`.
    pub fn parse(name: Option<&str>) -> Self {
        match name.unwrap_or_default() {
            "" | "regex_match" => Operator::RegexMatch,
            "contains" => Operator::Contains,
            "equals" => Operator::Equals,
            "not_contains" => Operator::NotContains,
            "starts_with" => Operator::StartsWith,
            "ends_with" => Operator::EndsWith,
            other => Operator::Unrecognized(other.to_string()),
        }
    }

    /// The operator name as written in rule files.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::RegexMatch => "regex_match",
            Operator::Contains => "contains",
            Operator::Equals => "equals",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::Unrecognized(name) => name,
        }
    }

    /// Apply the operator to `value`.
    ///
    /// Invalid regular expressions and unrecognized operators are logged and
    /// evaluate to false.
    pub fn test(&self, value: &str, pattern: &str, cache: &PatternCache) -> bool {
        match self {
            Operator::RegexMatch => match cache.get_or_compile(pattern) {
                Ok(regex) => regex.is_match(value),
                Err(e) => {
                    tracing::warn!("{}", e);
                    false
                }
            },
            Operator::Contains => value.contains(pattern),
            Operator::Equals => value == pattern,
            Operator::NotContains => !value.contains(pattern),
            Operator::StartsWith => value.starts_with(pattern),
            Operator::EndsWith => value.ends_with(pattern),
            Operator::Unrecognized(name) => {
                tracing::debug!("Unrecognized operator '{}' never matches", name);
                false
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field/operator/pattern test of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// The field to extract from the event.
    pub field: String,
    /// The comparison to apply.
    pub operator: Operator,
    /// The pattern or literal to compare against.
    pub pattern: String,
}

impl Condition {
    /// Create a condition.
    pub fn new(field: impl Into<String>, operator: Operator, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            pattern: pattern.into(),
        }
    }

    /// Evaluate against an event. Unresolved fields never match.
    pub fn evaluate(&self, event: &HookEvent, cache: &PatternCache) -> bool {
        let Some(value) = extract_field(&self.field, event) else {
            tracing::trace!("Field '{}' not present in event", self.field);
            return false;
        };
        self.operator.test(&value, &self.pattern, cache)
    }
}

/// Compiled regular expressions keyed by pattern text.
///
/// Entries are never evicted: pattern text is immutable once a rule is
/// loaded, so the cache is bounded by the distinct patterns in the rule set.
/// Failed compilations are not cached.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: DashMap<String, Regex>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled, case-insensitive regex for `pattern`.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Regex> {
        if let Some(regex) = self.compiled.get(pattern) {
            return Ok(regex.value().clone());
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| HookifyError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        self.compiled.insert(pattern.to_string(), regex.clone());
        Ok(regex)
    }

    /// Number of cached patterns.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// True when nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
