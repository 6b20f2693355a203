//! `agentguard rules` -- list the built-in security rule catalog.
//!
//! Renders the registry's read-only catalog as a table, independent of
//! any scan.

use comfy_table::{presets::UTF8_FULL, Table};

use agentguard_core::RuleRegistry;

/// Print the static rule catalog.
pub fn run() {
    let registry = RuleRegistry::builtin();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["ID", "NAME", "SEVERITY", "CATEGORY", "DESCRIPTION"]);

    for rule in registry.catalog() {
        table.add_row([
            rule.rule_id,
            rule.name,
            rule.severity.to_string(),
            rule.category.to_string(),
            rule.description,
        ]);
    }

    println!("{table}");
    println!("Total: {} rules", registry.len());
}
