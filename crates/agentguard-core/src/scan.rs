//! Scan orchestration over files and directory trees.
//!
//! The [`Scanner`] owns a [`RuleRegistry`] and applies it synchronously,
//! one file at a time. Failures local to one rule or one file are reported
//! through `tracing` and contained; only a missing or unreadable
//! single-file target escapes as a [`ScanError`].

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::model::{Finding, ScanResult};
use crate::rules::RuleRegistry;

/// File extensions eligible for directory scans.
const SCAN_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "py"];

/// Applies a rule registry to file content.
///
/// The registry is built once, before any scan, and never mutated; a
/// scanner holds no other state, so scans are one-shot and independent.
#[derive(Debug, Clone)]
pub struct Scanner {
    registry: RuleRegistry,
}

impl Scanner {
    /// Scanner over the built-in rule registry.
    pub fn new() -> Self {
        Scanner {
            registry: RuleRegistry::builtin(),
        }
    }

    /// Scanner over an explicitly constructed registry.
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Scanner { registry }
    }

    /// The registry this scanner applies.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Check `content` against every registered rule, in registration
    /// order.
    ///
    /// A rule that fails internally is reported through `tracing` and
    /// contributes zero findings; it never aborts the scan of the file.
    pub fn scan_content(&self, content: &str, file_path: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in self.registry.rules() {
            match rule.check(content, file_path) {
                Ok(mut rule_findings) => findings.append(&mut rule_findings),
                Err(err) => {
                    warn!(rule_id = %rule.id, error = %err, "rule failed, skipping");
                }
            }
        }
        findings
    }

    /// Scan a single file.
    ///
    /// Errors with [`ScanError::NotFound`] if the path does not exist and
    /// [`ScanError::Read`] if it cannot be read as UTF-8 text; binary
    /// content is never silently scanned.
    pub fn scan_file(&self, path: &Path) -> Result<ScanResult> {
        let scanned_at = Utc::now().to_rfc3339();
        let started = Instant::now();

        if !path.exists() {
            return Err(ScanError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file_path = path.display().to_string();
        let findings = self.scan_content(&content, &file_path);

        Ok(ScanResult {
            file_path,
            scanned_at,
            duration_ms: started.elapsed().as_millis() as u64,
            findings,
        })
    }

    /// Recursively scan every eligible file under `dir`.
    ///
    /// Eligible files are regular files with a `.yaml`, `.yml`, `.json`,
    /// or `.py` extension. Traversal order is sorted by file name, so the
    /// result sequence is stable across runs. A file that cannot be read
    /// is reported through `tracing` and skipped; one bad file never
    /// aborts the directory scan.
    pub fn scan_directory(&self, dir: &Path) -> Vec<ScanResult> {
        let mut results = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !eligible(entry.path()) {
                continue;
            }
            match self.scan_file(entry.path()) {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "skipping file");
                }
            }
        }
        results
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new()
    }
}

/// Whether a path carries one of the scanned extensions.
fn eligible(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext))
}
