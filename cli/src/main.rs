//! semu CLI - batch runner for program documents.
//!
//! ```text
//! semu run <file> [--degree N] [--input x1=4 ...] [--json]
//! semu expand <file> [--degree N]
//! semu degree <file>
//! ```
//!
//! Program output goes to stdout. Logs go to `~/.semu/logs/semu.log`
//! (filtered by `RUST_LOG`) so they never interleave with results.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use semu_engine::{Engine, EngineSettings, SemuConfig, Variable, load_program};

#[derive(Parser)]
#[command(name = "semu")]
#[command(about = "Expand and run GOTO-style register machine programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and print y, cycles and final variables
    Run {
        /// Program document (JSON)
        file: PathBuf,
        /// Expansion degree to run at (defaults to the configured degree)
        #[arg(long)]
        degree: Option<u32>,
        /// Input assignment such as x1=4 (repeatable)
        #[arg(long = "input", value_parser = parse_input)]
        inputs: Vec<(Variable, i64)>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show each instruction next to what it expands into
    Expand {
        /// Program document (JSON)
        file: PathBuf,
        /// Expansion degree to preview
        #[arg(long, default_value_t = 1)]
        degree: u32,
    },
    /// Print the maximum meaningful expansion degree
    Degree {
        /// Program document (JSON)
        file: PathBuf,
    },
}

fn parse_input(raw: &str) -> Result<(Variable, i64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <variable>=<value>, got {raw:?}"))?;
    let variable = name.parse::<Variable>().map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value for {variable}: {e}"))?;
    Ok((variable, value))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_semu_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Without a log file, prefer no logs over mixing them into program output.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_semu_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in semu_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn semu_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.semu/logs/semu.log
    if let Some(config_path) = SemuConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("semu.log"));
    }

    // Fallback: ./.semu/logs/semu.log
    candidates.push(PathBuf::from(".semu").join("logs").join("semu.log"));

    candidates
}

fn load_settings() -> Result<EngineSettings> {
    let settings = match SemuConfig::load()? {
        Some(config) => config.resolve()?,
        None => EngineSettings::default(),
    };
    Ok(settings)
}

fn open_engine(file: &Path, settings: &EngineSettings) -> Result<Engine> {
    let program =
        load_program(file).with_context(|| format!("loading {}", file.display()))?;
    Ok(Engine::with_settings(program, settings))
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = load_settings()?;

    match cli.command {
        Commands::Run {
            file,
            degree,
            inputs,
            json,
        } => {
            let engine = open_engine(&file, &settings)?;
            let degree = degree.unwrap_or(settings.default_degree());
            let inputs: BTreeMap<Variable, i64> = inputs.into_iter().collect();
            let result = engine.run(degree, &inputs)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("program: {} (degree {})", result.program_name, result.degree);
                println!("y = {}", result.y);
                println!("cycles = {}", result.cycles);
                for entry in &result.variables {
                    println!("{} = {}", entry.name, entry.value);
                }
            }
        }
        Commands::Expand { file, degree } => {
            let engine = open_engine(&file, &settings)?;
            let max = engine.max_degree()?;
            if degree > max {
                return Err(anyhow!(
                    "degree {degree} exceeds the program's maximum degree {max}"
                ));
            }
            for row in engine.preview(degree).rows {
                println!("{row}");
            }
        }
        Commands::Degree { file } => {
            let engine = open_engine(&file, &settings)?;
            println!("{}", engine.max_degree()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_input;
    use semu_engine::Variable;

    #[test]
    fn parses_input_assignments() {
        assert_eq!(parse_input("x2=7"), Ok((Variable::x(2).unwrap(), 7)));
        assert_eq!(parse_input("x1= -3"), Ok((Variable::x(1).unwrap(), -3)));
        assert!(parse_input("x1").is_err());
        assert!(parse_input("q1=2").is_err());
        assert!(parse_input("x1=two").is_err());
    }
}
