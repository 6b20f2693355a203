//! Subcommand implementations for the `agentguard` binary.

pub mod rules;
pub mod scan;
