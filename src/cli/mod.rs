//! CLI command definitions and handlers

mod analyze;
mod rules;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (0 = auto, at most 64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// threatgraph - Graph-based threat modeling risk engine
#[derive(Parser, Debug)]
#[command(name = "threatgraph")]
#[command(
    version,
    about = "Evaluate STRIDE-classified risk rules against an architecture model",
    long_about = "threatgraph reads an architecture model (technical assets, data assets, \
communication links, trust boundaries, shared runtimes), evaluates its risk rule catalog \
against it and reconciles the findings with the risk tracking stored in the model.",
    after_help = "\
Examples:
  threatgraph analyze --model model.json                     Terminal summary
  threatgraph analyze --model model.json --format json       JSON output for scripting
  threatgraph analyze --model model.json --skip-risk-rules missing-hardening
  threatgraph list-risk-rules                                Built-in rule ids"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    /// Number of parallel workers (0 = auto)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the risk rules against a model file
    #[command(after_help = "\
Examples:
  threatgraph analyze --model model.json
  threatgraph analyze --model model.json --format json -o risks.json
  threatgraph analyze --model model.json --config threatgraph.toml
  threatgraph analyze --model model.json --ignore-orphaned-risk-tracking=false")]
    Analyze {
        /// Model file (JSON)
        #[arg(long, short = 'm')]
        model: PathBuf,

        /// Config file (default: threatgraph.toml or .threatgraphrc.json next to the model)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Comma-separated risk rule ids to skip
        #[arg(long, env = "THREATGRAPH_SKIP_RISK_RULES")]
        skip_risk_rules: Option<String>,

        /// Warn about orphaned risk tracking entries instead of failing
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        ignore_orphaned_risk_tracking: Option<bool>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List the id and title of every built-in risk rule
    ListRiskRules,

    /// Explain every built-in risk rule
    ExplainRiskRules,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            model,
            config,
            skip_risk_rules,
            ignore_orphaned_risk_tracking,
            format,
            output,
        } => analyze::run(analyze::AnalyzeOptions {
            model,
            config,
            skip_risk_rules,
            ignore_orphaned_risk_tracking,
            workers: cli.workers,
            format,
            output,
        }),
        Commands::ListRiskRules => {
            print!("{}", rules::list());
            Ok(())
        }
        Commands::ExplainRiskRules => {
            print!("{}", rules::explain());
            Ok(())
        }
    }
}
