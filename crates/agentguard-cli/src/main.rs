//! `agentguard` -- static security scanner for AI-agent deployments.
//!
//! Provides the following subcommands:
//!
//! - `agentguard scan` -- scan a file or directory and report findings.
//! - `agentguard rules` -- list the built-in security rule catalog.
//!
//! Exits non-zero when a scan produced critical findings, so CI pipelines
//! can gate on the result.

use clap::{Parser, Subcommand};

mod commands;

/// AgentGuard security scanner CLI.
#[derive(Parser)]
#[command(
    name = "agentguard",
    about = "Security scanner for AI agent configurations",
    version
)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Scan a file or directory for security issues.
    Scan(commands::scan::ScanArgs),

    /// List all available security rules.
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::Scan(args) => {
            let exit_code = commands::scan::run(args)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Rules => commands::rules::run(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_scan_parses_path() {
        let result = Cli::try_parse_from(["agentguard", "scan", "config.yaml"]);
        assert!(result.is_ok());
    }

    #[test]
    fn cli_scan_parses_format_and_severity() {
        let result = Cli::try_parse_from([
            "agentguard", "scan", "agents/", "--format", "json", "--severity", "high",
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn cli_scan_defaults_to_text_format() {
        let cli = Cli::try_parse_from(["agentguard", "scan", "config.yaml"]).unwrap();
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.format, "text");
                assert!(args.severity.is_none());
            }
            _ => panic!("expected scan subcommand"),
        }
    }

    #[test]
    fn cli_scan_parses_output_path() {
        let result = Cli::try_parse_from([
            "agentguard", "scan", "config.yaml", "-o", "report.json",
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn cli_rules_parses() {
        let result = Cli::try_parse_from(["agentguard", "rules"]);
        assert!(result.is_ok());
    }

    #[test]
    fn cli_verbose_flag_parses() {
        let result = Cli::try_parse_from(["agentguard", "--verbose", "rules"]);
        assert!(result.is_ok());
        assert!(result.unwrap().verbose);
    }
}
