//! ENHSP - numeric planner adapter
//!
//! CLI entry point for solving problem manifests with the ENHSP engine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use futures::StreamExt;
use planmodel::{Engine, PlanGenerationResult, Problem};
use tracing::{debug, info, warn};

use enhsp::capabilities::{supported_kind, unsupported_features};
use enhsp::cli::{Cli, Command, OutputFormat, SearchArgs};
use enhsp::config::Config;
use enhsp::java::{JDK_REQUIRED, check_jdk};
use enhsp::{Enhsp, PlanFiles, Variant};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("enhsp")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("enhsp.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Solve {
            manifest,
            variant,
            search,
            force,
            format,
        } => cmd_solve(&config, &manifest, variant, &search, force, format).await,
        Command::Anytime {
            manifest,
            search,
            max_plans,
            force,
            format,
        } => cmd_anytime(&config, &manifest, &search, max_plans, force, format).await,
        Command::Supports { manifest } => cmd_supports(&manifest),
        Command::Variants => cmd_variants(),
        Command::Invocation {
            variant,
            search,
            workdir,
        } => cmd_invocation(&config, variant, &search, &workdir),
        Command::Doctor => cmd_doctor(&config).await,
    }
}

fn build_engine(config: &Config, variant: Variant, search: &SearchArgs) -> Enhsp {
    let search = config.search.overlay(
        search.search_algorithm.clone(),
        search.heuristic.clone(),
        search.params.clone(),
    );
    config.engine_for(variant).with_params(search.params())
}

fn load_problem(manifest: &Path, engine: &Enhsp, force: bool) -> Result<Problem> {
    let problem = Problem::load(manifest).context("Failed to load problem manifest")?;

    if !engine.supports(problem.kind()) {
        let missing = unsupported_features(engine.variant(), problem.kind());
        let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
        if !force {
            return Err(eyre::eyre!(
                "{} does not support: {} (use --force to run anyway)",
                engine.name(),
                names.join(", ")
            ));
        }
        warn!(engine = engine.name(), missing = ?names, "Running on an unsupported problem kind");
    }
    Ok(problem)
}

fn print_result(result: &PlanGenerationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(result)?);
        }
        OutputFormat::Text => {
            let status = if result.status.is_solved() {
                result.status.to_string().green()
            } else if result.status.is_terminal() {
                result.status.to_string().red()
            } else {
                result.status.to_string().yellow()
            };
            println!("{} {}", result.engine_name.cyan(), status);
            if let Some(plan) = &result.plan {
                for (i, action) in plan.iter().enumerate() {
                    println!("  {:>3}: {}", i, action);
                }
            }
            for message in &result.log_messages {
                println!("  {:?}: {}", message.level, message.message.dimmed());
            }
        }
    }
    Ok(())
}

async fn cmd_solve(
    config: &Config,
    manifest: &Path,
    variant: Variant,
    search: &SearchArgs,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    debug!(?manifest, %variant, force, "cmd_solve: called");
    if variant.is_anytime() {
        return Err(eyre::eyre!("The ANYTIME variant streams plans; use `enhsp anytime` instead"));
    }

    let engine = build_engine(config, variant, search);
    let problem = load_problem(manifest, &engine, force)?;
    let result = engine.solve(&problem).await.context("Engine run failed")?;
    print_result(&result, format)
}

async fn cmd_anytime(
    config: &Config,
    manifest: &Path,
    search: &SearchArgs,
    max_plans: Option<usize>,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    debug!(?manifest, ?max_plans, force, "cmd_anytime: called");
    let engine = build_engine(config, Variant::Anytime, search);
    let problem = load_problem(manifest, &engine, force)?;

    let mut run = engine.start_anytime(&problem).context("Failed to start anytime engine")?;
    let mut plans = 0usize;

    while let Some(item) = run.next().await {
        let result = item.context("Anytime engine failed")?;
        print_result(&result, format)?;

        if !result.status.is_terminal() {
            plans += 1;
            if max_plans.is_some_and(|max| plans >= max) {
                info!(plans, "Plan limit reached, stopping engine");
                run.cancel().await.context("Failed to stop anytime engine")?;
                return Ok(());
            }
        }
    }
    Ok(())
}

fn cmd_supports(manifest: &Path) -> Result<()> {
    debug!(?manifest, "cmd_supports: called");
    let problem = Problem::load(manifest).context("Failed to load problem manifest")?;
    println!("Problem: {} [{}]", problem.name.cyan(), problem.kind());

    for variant in Variant::ALL {
        let missing = unsupported_features(variant, problem.kind());
        if missing.is_empty() {
            println!("  {} {:<10} {}", "✓".green(), variant.tag(), variant.engine_name());
        } else {
            let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
            println!(
                "  {} {:<10} {} (missing: {})",
                "✗".red(),
                variant.tag(),
                variant.engine_name(),
                names.join(", ").dimmed()
            );
        }
    }
    Ok(())
}

fn cmd_variants() -> Result<()> {
    for variant in Variant::ALL {
        let spec = variant.spec();
        let flags = if spec.forced_flags.is_empty() {
            "user/default".to_string()
        } else {
            spec.forced_flags.join(" ")
        };
        println!(
            "{:<10} {:<16} optimal={:<5} anytime={:<5} flags: {}{}",
            variant.tag().cyan(),
            spec.engine_name,
            spec.optimal,
            spec.anytime,
            flags,
            spec.trailing_flags.iter().map(|f| format!(" {}", f)).collect::<String>()
        );
        println!("           {}", supported_kind(variant).to_string().dimmed());
    }
    Ok(())
}

fn cmd_invocation(config: &Config, variant: Variant, search: &SearchArgs, workdir: &Path) -> Result<()> {
    let engine = build_engine(config, variant, search);
    let argv = engine.command(&PlanFiles::in_dir(workdir));
    println!("{}", argv.join(" "));
    Ok(())
}

async fn cmd_doctor(config: &Config) -> Result<()> {
    let mut healthy = true;

    match check_jdk(&config.engine.java).await {
        Ok(version) => println!("{} Java {} ({})", "✓".green(), version, config.engine.java),
        Err(e) => {
            healthy = false;
            println!("{} Java: {} (JDK {}+ required)", "✗".red(), e, JDK_REQUIRED);
        }
    }

    let jar = config.engine.jar_path();
    if jar.is_file() {
        println!("{} Engine jar: {}", "✓".green(), jar.display());
    } else {
        healthy = false;
        println!("{} Engine jar not found: {}", "✗".red(), jar.display());
    }

    if healthy {
        Ok(())
    } else {
        Err(eyre::eyre!("Environment is not ready to run ENHSP"))
    }
}
