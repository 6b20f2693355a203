//! Rule model and registry.
//!
//! A [`Rule`] pairs identity and metadata with a [`RuleMatcher`] predicate.
//! The [`RuleRegistry`] is the fixed, ordered collection of rules built once
//! at startup and passed explicitly into the scanner; registration order is
//! what makes finding order deterministic within a file.

mod builtin;

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Finding, RuleCategory, Severity};

/// Maximum snippet length in characters. Truncation happens after the
/// line is trimmed, never before.
const SNIPPET_MAX_CHARS: usize = 100;

/// Failure inside a single rule's matching logic.
///
/// Contained by the scanner: a failing rule is reported through `tracing`
/// and contributes zero findings for the file being scanned. It is a
/// deliberately separate type from [`crate::ScanError`] so a per-rule
/// failure can never be confused with a fatal scan error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RuleError {
    /// The rule's pattern could not be compiled.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The regex source text that failed to compile.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// How a rule inspects a single line of text.
///
/// Only pattern matching is implemented today; structural matchers can be
/// added as new variants without touching the engine.
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    /// Case-insensitive regex applied to each line independently.
    /// Patterns never match across a line boundary.
    Pattern {
        /// Regex source text.
        source: String,
        /// Compiled form, built on first use. A malformed pattern
        /// surfaces as a [`RuleError`] at match time instead of aborting
        /// registry construction.
        compiled: OnceLock<Regex>,
    },
}

impl RuleMatcher {
    /// Build a pattern matcher from regex source text.
    pub fn pattern(source: impl Into<String>) -> Self {
        RuleMatcher::Pattern {
            source: source.into(),
            compiled: OnceLock::new(),
        }
    }

    /// Byte ranges `(start, end)` of every leftmost non-overlapping match
    /// within `line`.
    pub fn matches(&self, line: &str) -> Result<Vec<(usize, usize)>, RuleError> {
        match self {
            RuleMatcher::Pattern { source, compiled } => {
                let regex = match compiled.get() {
                    Some(regex) => regex,
                    None => {
                        // Case-insensitivity is set on the builder so it
                        // holds for every pattern, not per-pattern.
                        let built = RegexBuilder::new(source)
                            .case_insensitive(true)
                            .build()
                            .map_err(|err| RuleError::InvalidPattern {
                                pattern: source.clone(),
                                source: err,
                            })?;
                        compiled.get_or_init(|| built)
                    }
                };
                Ok(regex.find_iter(line).map(|m| (m.start(), m.end())).collect())
            }
        }
    }
}

/// A single security check: identity, metadata, and a matching predicate.
///
/// Rules are immutable after construction. The registry builds them once
/// at startup and never mutates or removes them during a run.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable identifier, unique across the registry (e.g. "AG-001").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// What the rule looks for.
    pub description: String,
    pub category: RuleCategory,
    pub severity: Severity,
    /// The matching predicate.
    pub matcher: RuleMatcher,
    /// Remediation advice copied into each finding.
    pub remediation: String,
    /// Reference URLs copied into each finding.
    pub references: Vec<String>,
    /// Finding message; `{category}` interpolates the category name.
    /// `None` falls back to "Potential {category} issue found".
    pub message_template: Option<String>,
}

impl Rule {
    /// Line-scoped, case-insensitive pattern rule.
    pub fn pattern(
        id: &str,
        name: &str,
        description: &str,
        category: RuleCategory,
        severity: Severity,
        pattern: &str,
    ) -> Self {
        Rule {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            severity,
            matcher: RuleMatcher::pattern(pattern),
            remediation: String::new(),
            references: Vec::new(),
            message_template: None,
        }
    }

    /// Set the remediation advice.
    pub fn remediation(mut self, remediation: &str) -> Self {
        self.remediation = remediation.to_string();
        self
    }

    /// Set the reference URLs.
    pub fn references(mut self, references: &[&str]) -> Self {
        self.references = references.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Set the message template. `{category}` is replaced with the
    /// category name when a finding is rendered.
    pub fn message(mut self, template: &str) -> Self {
        self.message_template = Some(template.to_string());
        self
    }

    /// Check `content` for violations of this rule.
    ///
    /// Matching is line-scoped: each line is scanned independently and
    /// every occurrence becomes its own finding. The column is the
    /// 1-based character offset of the match start within the original,
    /// unstripped line; the snippet is trimmed and then capped.
    pub fn check(&self, content: &str, file_path: &str) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, line) in content.lines().enumerate() {
            for (start, _) in self.matcher.matches(line)? {
                findings.push(Finding {
                    rule_id: self.id.clone(),
                    rule_name: self.name.clone(),
                    category: self.category,
                    severity: self.severity,
                    message: self.render_message(),
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    column: line[..start].chars().count() + 1,
                    snippet: snippet(line),
                    remediation: self.remediation.clone(),
                    references: self.references.clone(),
                });
            }
        }
        Ok(findings)
    }

    fn render_message(&self) -> String {
        match &self.message_template {
            Some(template) => template.replace("{category}", self.category.as_str()),
            None => format!("Potential {} issue found", self.category),
        }
    }
}

/// Offending-line snippet: surrounding whitespace stripped, then capped at
/// [`SNIPPET_MAX_CHARS`] characters.
fn snippet(line: &str) -> String {
    line.trim().chars().take(SNIPPET_MAX_CHARS).collect()
}

/// Read-only catalog entry for one rule, used for listing and
/// documentation independent of any scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSummary {
    pub rule_id: String,
    pub name: String,
    pub severity: Severity,
    pub category: RuleCategory,
    pub description: String,
}

/// Fixed, ordered, immutable collection of rules.
///
/// Built once at process start and passed explicitly to the scanner.
/// There is no removal or mutation API; order is significant only for the
/// deterministic ordering of findings within one file.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Registry holding the built-in rule set, in registration order.
    pub fn builtin() -> Self {
        RuleRegistry {
            rules: builtin::builtin_rules(),
        }
    }

    /// Registry over an explicit rule list.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        RuleRegistry { rules }
    }

    /// All rules, in registration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in the given category, in registration order.
    pub fn by_category(&self, category: RuleCategory) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.category == category).collect()
    }

    /// Rules at the given severity, in registration order.
    pub fn by_severity(&self, severity: Severity) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.severity == severity).collect()
    }

    /// Catalog entries for every rule, in registration order.
    pub fn catalog(&self) -> Vec<RuleSummary> {
        self.rules
            .iter()
            .map(|r| RuleSummary {
                rule_id: r.id.clone(),
                name: r.name.clone(),
                severity: r.severity,
                category: r.category,
                description: r.description.clone(),
            })
            .collect()
    }
}
