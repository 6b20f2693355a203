//! `agentguard scan` -- scan a file or directory and report findings.
//!
//! Thin wrapper over [`agentguard_core::Scanner`]: resolves the target,
//! applies the optional severity filter, renders text or JSON, and maps
//! the critical-finding count onto the process exit code.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use agentguard_core::{
    count_at_severity, filter_by_severity, ScanResult, Scanner, Severity,
};

/// Arguments for the `agentguard scan` subcommand.
#[derive(Args)]
pub struct ScanArgs {
    /// File or directory to scan.
    pub path: PathBuf,

    /// Output format: text, json.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Minimum severity to report (critical, high, medium, low, info).
    #[arg(long)]
    pub severity: Option<String>,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// JSON envelope around the scan results.
#[derive(Serialize)]
struct JsonReport<'a> {
    scan_results: &'a [ScanResult],
    total_files: usize,
    total_findings: usize,
}

/// Run the scan command. Returns the process exit code: 1 when critical
/// findings were reported, 0 otherwise.
pub fn run(args: ScanArgs) -> anyhow::Result<i32> {
    let scanner = Scanner::new();

    let mut results = if args.path.is_file() {
        vec![scanner.scan_file(&args.path)?]
    } else if args.path.is_dir() {
        scanner.scan_directory(&args.path)
    } else {
        anyhow::bail!("path does not exist: {}", args.path.display());
    };

    if let Some(min) = &args.severity {
        let min: Severity = min.parse()?;
        filter_by_severity(&mut results, min);
    }

    let rendered = match args.format.as_str() {
        "json" => render_json(&results)?,
        _ => render_text(&results),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Results saved to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    let critical = count_at_severity(&results, Severity::Critical);
    Ok(if critical > 0 { 1 } else { 0 })
}

fn render_json(results: &[ScanResult]) -> anyhow::Result<String> {
    let report = JsonReport {
        scan_results: results,
        total_files: results.len(),
        total_findings: results.iter().map(|r| r.findings.len()).sum(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize scan results")
}

fn render_text(results: &[ScanResult]) -> String {
    let divider = "=".repeat(80);
    let mut out = String::new();
    out.push_str(&format!("{divider}\n"));
    out.push_str("AgentGuard Security Scan Results\n");
    out.push_str(&format!("{divider}\n"));

    let mut total_findings = 0;
    for result in results {
        if result.findings.is_empty() {
            continue;
        }

        out.push_str(&format!("\nFile: {}\n", result.file_path));
        out.push_str(&format!("{}\n", "-".repeat(80)));

        for finding in &result.findings {
            total_findings += 1;
            out.push_str(&format!(
                "\n  {}: {} [{}]\n",
                finding.severity, finding.rule_name, finding.rule_id
            ));
            out.push_str(&format!(
                "    Line {}, Column {}\n",
                finding.line_number, finding.column
            ));
            out.push_str(&format!("    {}\n", finding.message));
            out.push_str(&format!("    Snippet: {}\n", finding.snippet));
            out.push_str(&format!("    Remediation: {}\n", finding.remediation));
            if !finding.references.is_empty() {
                out.push_str("    References:\n");
                for reference in &finding.references {
                    out.push_str(&format!("      - {reference}\n"));
                }
            }
        }
    }

    out.push_str(&format!("\n{divider}\n"));
    out.push_str(&format!("Scan Complete: {total_findings} finding(s) detected\n"));
    out.push_str(&divider);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentguard_core::{Finding, RuleCategory};

    fn sample_result() -> ScanResult {
        ScanResult {
            file_path: "agent.yaml".into(),
            scanned_at: "2026-01-01T00:00:00+00:00".into(),
            duration_ms: 2,
            findings: vec![Finding {
                rule_id: "AG-002".into(),
                rule_name: "Hardcoded API Key".into(),
                category: RuleCategory::Secrets,
                severity: Severity::Critical,
                message: "Hardcoded credential detected: secrets".into(),
                file_path: "agent.yaml".into(),
                line_number: 3,
                column: 1,
                snippet: "api_key = \"...\"".into(),
                remediation: "Use environment variables.".into(),
                references: vec!["https://owasp.org".into()],
            }],
        }
    }

    #[test]
    fn text_output_lists_findings_and_total() {
        let text = render_text(&[sample_result()]);
        assert!(text.contains("File: agent.yaml"));
        assert!(text.contains("CRITICAL: Hardcoded API Key [AG-002]"));
        assert!(text.contains("Line 3, Column 1"));
        assert!(text.contains("Scan Complete: 1 finding(s) detected"));
    }

    #[test]
    fn text_output_skips_clean_files() {
        let mut clean = sample_result();
        clean.findings.clear();
        let text = render_text(&[clean]);
        assert!(!text.contains("File: agent.yaml"));
        assert!(text.contains("Scan Complete: 0 finding(s) detected"));
    }

    #[test]
    fn json_output_carries_totals_and_contract_fields() {
        let json = render_json(&[sample_result()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_files"], 1);
        assert_eq!(value["total_findings"], 1);
        let finding = &value["scan_results"][0]["findings"][0];
        assert_eq!(finding["rule_id"], "AG-002");
        assert_eq!(finding["severity"], "critical");
        assert!(finding.get("file_path").is_none());
    }
}
