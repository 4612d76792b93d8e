//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::variant::Variant;

/// ENHSP - numeric planner adapter
#[derive(Parser, Debug)]
#[command(
    name = "enhsp",
    about = "Run the ENHSP numeric planner on planning problem manifests",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Search parameter overrides shared by several subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Search algorithm (-s), e.g. gbfs, WAStar
    #[arg(short = 's', long)]
    pub search_algorithm: Option<String>,

    /// Heuristic (-h), e.g. hadd, hmrp
    #[arg(short = 'H', long)]
    pub heuristic: Option<String>,

    /// Free-form engine flags; replaces search algorithm and heuristic
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub params: Option<String>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve a problem once
    Solve {
        /// Problem manifest (YAML)
        manifest: PathBuf,

        /// Engine variant (SAT, OPT, OPT-BLIND)
        #[arg(short = 'V', long, default_value = "SAT")]
        variant: Variant,

        #[command(flatten)]
        search: SearchArgs,

        /// Run even if the variant does not declare support for the problem kind
        #[arg(long)]
        force: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Stream improving plans from the anytime variant
    Anytime {
        /// Problem manifest (YAML)
        manifest: PathBuf,

        #[command(flatten)]
        search: SearchArgs,

        /// Stop the engine after this many plans
        #[arg(short = 'n', long)]
        max_plans: Option<usize>,

        /// Run even if the variant does not declare support for the problem kind
        #[arg(long)]
        force: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show which variants accept a problem
    Supports {
        /// Problem manifest (YAML)
        manifest: PathBuf,
    },

    /// List variants and their capabilities
    Variants,

    /// Print the engine invocation without running it
    #[command(name = "command")]
    Invocation {
        /// Engine variant
        #[arg(short = 'V', long, default_value = "SAT")]
        variant: Variant,

        #[command(flatten)]
        search: SearchArgs,

        /// Directory the domain, problem and plan files would live in
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,
    },

    /// Check the Java runtime and the engine jar
    Doctor,
}

/// Output format for results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "enhsp",
            "solve",
            "robot.yml",
            "-V",
            "opt-blind",
            "-s",
            "gbfs",
            "-H",
            "hadd",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Command::Solve {
                manifest,
                variant,
                search,
                force,
                format,
            } => {
                assert_eq!(manifest, PathBuf::from("robot.yml"));
                assert_eq!(variant, Variant::OptBlind);
                assert_eq!(search.search_algorithm.as_deref(), Some("gbfs"));
                assert_eq!(search.heuristic.as_deref(), Some("hadd"));
                assert!(!force);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_params_accept_leading_dash() {
        let cli = Cli::try_parse_from(["enhsp", "anytime", "p.yml", "-p", "-planner sat-hadd", "-n", "3"]).unwrap();
        match cli.command {
            Command::Anytime { search, max_plans, .. } => {
                assert_eq!(search.params.as_deref(), Some("-planner sat-hadd"));
                assert_eq!(max_plans, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["enhsp", "variants", "-l", "debug", "-c", "cfg.yml"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yml")));
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(Cli::try_parse_from(["enhsp", "solve", "p.yml", "-V", "greedy"]).is_err());
    }
}
