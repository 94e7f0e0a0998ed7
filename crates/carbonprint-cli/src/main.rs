// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! # carbonprint CLI
//!
//! Estimates a household's annual carbon footprint from an input file of
//! weekly travel, monthly energy use and diet.

mod config;
mod output;

use anyhow::{bail, Context, Result};
use carbonprint_engine::CalculationInput;
use carbonprint_records::{CarbonRecord, JsonRecordStore, RecordStore};
use clap::{Parser, Subcommand};
use config::{Config, OutputFormat};
use output::FootprintReport;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "carbonprint")]
#[command(about = "Household carbon footprint calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the footprint of an input file (json, toml, yaml)
    Calculate {
        /// Input file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// User the result belongs to
        #[arg(short, long)]
        user: Option<String>,

        /// Save the result to the user's history
        #[arg(long)]
        save: bool,
    },

    /// Print the effective emission factor table
    Factors {
        /// Output format (toml, json)
        #[arg(short, long, default_value = "toml")]
        format: String,
    },

    /// Show saved results for a user
    History {
        /// User to show
        #[arg(short, long)]
        user: String,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the calculator form's initial input as JSON
    Template,

    /// Initialize configuration file
    Init {
        /// Output format (yaml, toml)
        #[arg(long, default_value = "yaml")]
        format: String,
    },

    /// Show current configuration
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);

    let config = match config::load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        cli.log_level.clone().unwrap_or_else(|| config.log.level.clone())
    };
    init_logging(&log_level);

    let outcome = match cli.command {
        Command::Calculate {
            input,
            format,
            output,
            user,
            save,
        } => handle_calculate(
            &config,
            &input,
            format,
            output.as_deref(),
            user.as_deref(),
            save,
        ),
        Command::Factors { format } => handle_factors(&config, &format),
        Command::History { user, format } => handle_history(&config, &user, format),
        Command::Template => handle_template(),
        Command::Init { format } => handle_init(&config_path, &format),
        Command::Show => handle_show(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn handle_calculate(
    config: &Config,
    input_path: &Path,
    format: Option<OutputFormat>,
    output: Option<&Path>,
    user: Option<&str>,
    save: bool,
) -> Result<()> {
    if save && user.is_none() {
        bail!("--save needs --user");
    }

    info!("Calculating footprint: {}", input_path.display());

    let table = config.factor_table()?;
    let input = CalculationInput::load(input_path)
        .with_context(|| format!("reading input {}", input_path.display()))?;
    let result = table.calculate_checked(&input)?;

    let report = FootprintReport::new(result);
    let format = format.unwrap_or(config.output.format);
    let text = output::render_report(&report, format, config.output.show_rating)?;
    emit(&text, output)?;

    let user = user.filter(|_| save || config.records.enabled);
    if let Some(user) = user {
        let mut store = JsonRecordStore::new(config.records.directory());
        store.append(CarbonRecord::new(user, &result))?;
        if let Some(keep) = config.records.keep {
            store.prune(user, keep)?;
        }
        info!(user, total = result.total, "Saved result");
    }

    Ok(())
}

fn handle_factors(config: &Config, format: &str) -> Result<()> {
    let table = config.factor_table()?;

    let text = match format {
        "toml" => table.to_toml_string()?,
        "json" => serde_json::to_string_pretty(&table)?,
        other => bail!("Unsupported format: {}", other),
    };
    println!("{}", text);
    Ok(())
}

fn handle_history(config: &Config, user: &str, format: Option<OutputFormat>) -> Result<()> {
    let store = JsonRecordStore::new(config.records.directory());
    let history = store.history(user)?;

    let format = format.unwrap_or(config.output.format);
    print!("{}", output::render_history(user, &history, format)?);
    Ok(())
}

fn handle_template() -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&CalculationInput::default())?
    );
    Ok(())
}

fn handle_init(config_path: &Path, format: &str) -> Result<()> {
    let path = if format == "toml" {
        config_path.with_extension("toml")
    } else {
        config_path.to_path_buf()
    };

    if path.exists() {
        bail!("Config already exists: {}", path.display());
    }

    config::write_default_config(&path)?;
    println!("Created config: {}", path.display());
    Ok(())
}

fn handle_show(config: &Config) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!("Output written to: {}", path.display());
        }
        None => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
