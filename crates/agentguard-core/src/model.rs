//! Value types shared across the scan pipeline.
//!
//! [`Finding`] and [`ScanResult`] carry the serialization contract consumed
//! by downstream reporting; [`Severity`] and [`RuleCategory`] form the
//! closed taxonomy every rule is classified under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Severity of a finding.
///
/// Variants are declared from least to most severe so the derived `Ord`
/// drives threshold filtering: a finding is kept when `severity >= min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational finding (no action required).
    Info,
    /// Low severity (best practice suggestion).
    Low,
    /// Medium severity (should be addressed).
    Medium,
    /// High severity (must be addressed before deployment).
    High,
    /// Critical severity (immediate action required).
    Critical,
}

impl Severity {
    /// Lowercase wire name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl FromStr for Severity {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "info" => Ok(Severity::Info),
            other => Err(ScanError::UnknownSeverity {
                value: other.to_string(),
            }),
        }
    }
}

/// What concern a rule addresses. Classifies the rule, not its severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    PromptInjection,
    Secrets,
    Permissions,
    FileAccess,
    Network,
    Memory,
}

impl RuleCategory {
    /// Snake-case category name, used in messages and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::PromptInjection => "prompt_injection",
            RuleCategory::Secrets => "secrets",
            RuleCategory::Permissions => "permissions",
            RuleCategory::FileAccess => "file_access",
            RuleCategory::Network => "network",
            RuleCategory::Memory => "memory",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule violation at a specific file/line/column.
///
/// Everything except the location-derived fields is copied from the
/// originating rule at match time; a finding is never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the rule that produced this finding (e.g. "AG-001").
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// Category copied from the rule.
    pub category: RuleCategory,
    /// Severity copied from the rule, never independently overridden.
    pub severity: Severity,
    /// Rendered finding message.
    pub message: String,
    /// Path of the file the match came from. Carried for reporting but
    /// not serialized; the owning [`ScanResult`] records the path.
    #[serde(skip)]
    pub file_path: String,
    /// 1-based line number of the match.
    pub line_number: usize,
    /// 1-based character offset of the match start within the line.
    pub column: usize,
    /// The offending line, trimmed and capped at 100 characters.
    pub snippet: String,
    /// Remediation advice copied from the rule.
    pub remediation: String,
    /// Reference URLs copied from the rule.
    pub references: Vec<String>,
}

/// The outcome of scanning one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path of the scanned file.
    pub file_path: String,
    /// ISO-8601 UTC timestamp taken when the scan started.
    pub scanned_at: String,
    /// Wall-clock scan duration in whole milliseconds.
    pub duration_ms: u64,
    /// Findings ordered by rule registration order, then by position
    /// within the file.
    pub findings: Vec<Finding>,
}

/// Prune findings below `min` from every result, in place.
///
/// Results themselves are never removed, even when all of their findings
/// fall below the threshold.
pub fn filter_by_severity(results: &mut [ScanResult], min: Severity) {
    for result in results {
        result.findings.retain(|f| f.severity >= min);
    }
}

/// Count findings at exactly `severity` across all results.
///
/// The CLI exit-code policy inspects the critical count through this.
pub fn count_at_severity(results: &[ScanResult], severity: Severity) -> usize {
    results
        .iter()
        .flat_map(|r| r.findings.iter())
        .filter(|f| f.severity == severity)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            rule_id: "AG-000".into(),
            rule_name: "Test Rule".into(),
            category: RuleCategory::Secrets,
            severity,
            message: "test".into(),
            file_path: "config.yaml".into(),
            line_number: 1,
            column: 1,
            snippet: "snippet".into(),
            remediation: "fix it".into(),
            references: vec!["https://example.com".into()],
        }
    }

    fn result(severities: &[Severity]) -> ScanResult {
        ScanResult {
            file_path: "config.yaml".into(),
            scanned_at: "2026-01-01T00:00:00+00:00".into(),
            duration_ms: 3,
            findings: severities.iter().copied().map(finding).collect(),
        }
    }

    #[test]
    fn severity_total_order() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Info);
    }

    #[test]
    fn severity_parses_all_names() {
        for (name, expected) in [
            ("critical", Severity::Critical),
            ("high", Severity::High),
            ("medium", Severity::Medium),
            ("low", Severity::Low),
            ("info", Severity::Info),
        ] {
            assert_eq!(name.parse::<Severity>().unwrap(), expected);
            assert_eq!(expected.as_str(), name);
        }
    }

    #[test]
    fn severity_rejects_unknown_name() {
        let err = "severe".parse::<Severity>().unwrap_err();
        assert!(matches!(err, ScanError::UnknownSeverity { .. }));
    }

    #[test]
    fn severity_serializes_snake_case() {
        let json = serde_json::to_value(Severity::Critical).unwrap();
        assert_eq!(json, serde_json::json!("critical"));
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_value(RuleCategory::PromptInjection).unwrap();
        assert_eq!(json, serde_json::json!("prompt_injection"));
        assert_eq!(RuleCategory::FileAccess.as_str(), "file_access");
    }

    #[test]
    fn filter_keeps_results_without_findings() {
        let mut results = vec![
            result(&[Severity::Critical, Severity::Medium]),
            result(&[Severity::Low]),
        ];
        filter_by_severity(&mut results, Severity::High);
        assert_eq!(results.len(), 2, "filtering must never drop a ScanResult");
        assert_eq!(results[0].findings.len(), 1);
        assert!(results[1].findings.is_empty());
    }

    #[test]
    fn filter_is_monotonic() {
        let base = vec![result(&[
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Info,
        ])];

        let mut strict = base.clone();
        filter_by_severity(&mut strict, Severity::High);

        let mut permissive = base.clone();
        filter_by_severity(&mut permissive, Severity::Medium);

        // Every finding surviving the strict threshold also survives the
        // permissive one.
        assert!(strict[0].findings.len() <= permissive[0].findings.len());
        for f in &strict[0].findings {
            assert!(permissive[0].findings.iter().any(|p| p.severity == f.severity));
        }
    }

    #[test]
    fn count_at_severity_aggregates_across_results() {
        let results = vec![
            result(&[Severity::Critical, Severity::High]),
            result(&[Severity::Critical]),
        ];
        assert_eq!(count_at_severity(&results, Severity::Critical), 2);
        assert_eq!(count_at_severity(&results, Severity::High), 1);
        assert_eq!(count_at_severity(&results, Severity::Info), 0);
    }

    #[test]
    fn finding_serialization_omits_file_path() {
        let json = serde_json::to_value(finding(Severity::High)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("file_path"));
        for key in [
            "rule_id",
            "rule_name",
            "category",
            "severity",
            "message",
            "line_number",
            "column",
            "snippet",
            "remediation",
            "references",
        ] {
            assert!(obj.contains_key(key), "missing serialized field: {key}");
        }
    }

    #[test]
    fn scan_result_round_trips() {
        let original = result(&[Severity::Critical, Severity::Medium]);
        let json = serde_json::to_string(&original).unwrap();
        let back: ScanResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back.file_path, original.file_path);
        assert_eq!(back.scanned_at, original.scanned_at);
        assert_eq!(back.duration_ms, original.duration_ms);
        assert_eq!(back.findings.len(), original.findings.len());
        for (a, b) in back.findings.iter().zip(original.findings.iter()) {
            assert_eq!(a.rule_id, b.rule_id);
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.line_number, b.line_number);
            assert_eq!(a.column, b.column);
        }
    }
}
