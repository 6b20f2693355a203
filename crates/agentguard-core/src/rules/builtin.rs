//! Built-in rule set for AI-agent configuration scanning.
//!
//! Five checks across the prompt-injection, secrets, permissions,
//! file-access, and network categories. Identifiers, severities, and
//! categories are stable; downstream tooling keys on them.

use super::Rule;
use crate::model::{RuleCategory, Severity};

/// Build the built-in rules, in registration order.
pub(super) fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::pattern(
            "AG-001",
            "Prompt Injection Vector",
            "User input is being directly concatenated into system prompts without sanitization",
            RuleCategory::PromptInjection,
            Severity::Critical,
            r#"(system_prompt|system|prompt)\s*[=:]\s*["'].*(\{user_input|\{input|\{\{|%s|%d|\$\{)"#,
        )
        .remediation(
            "Use prompt templates with strict parameter validation. Never concatenate user input directly into system prompts.",
        )
        .references(&[
            "https://owasp.org/www-project-llm-top-10/",
            "https://portswigger.net/web-security/llm-attacks",
        ])
        .message("Potential prompt injection: User input concatenated in system prompt"),

        Rule::pattern(
            "AG-002",
            "Hardcoded API Key",
            "API keys or secrets are hardcoded in configuration",
            RuleCategory::Secrets,
            Severity::Critical,
            r#"(api[_-]?key|apikey|token|secret|password)\s*[=:]\s*["'][a-zA-Z0-9_-]{20,}["']"#,
        )
        .remediation("Use environment variables or a secrets manager. Never hardcode credentials.")
        .references(&[
            "https://cheatsheetseries.owasp.org/cheatsheets/Secrets_Management_Cheat_Sheet.html",
        ])
        .message("Hardcoded credential detected: {category}"),

        Rule::pattern(
            "AG-003",
            "Unrestricted Tool Permissions",
            "Tools have excessive permissions without validation",
            RuleCategory::Permissions,
            Severity::High,
            r"(allow_all|unrestricted|bypass.*auth|disable.*check)",
        )
        .remediation("Implement least privilege principle. Validate all tool invocations.")
        .references(&["https://owasp.org/www-project-top-10/"])
        .message("Excessive permissions detected: {category}"),

        Rule::pattern(
            "AG-004",
            "Unrestricted File System Access",
            "File system operations without path validation",
            RuleCategory::FileAccess,
            Severity::High,
            r"(read_file|write_file|delete_file)\s*[=:]\s*True|allow_all_files|bypass_path_validation",
        )
        .remediation("Validate all file paths against allowed directories. Use path canonicalization.")
        .references(&["https://owasp.org/www-community/attacks/Path_Traversal"])
        .message("Unrestricted file access: {category}"),

        Rule::pattern(
            "AG-005",
            "Potential Data Exfiltration",
            "Tools can send data to external URLs without validation",
            RuleCategory::Network,
            Severity::Medium,
            r"(http://|https://|fetch\(|requests\.|urllib)",
        )
        .remediation("Validate all external URLs against an allowlist. Log all outbound requests.")
        .references(&["https://owasp.org/www-project-top-10/"])
        .message("External network access detected: {category}"),
    ]
}
