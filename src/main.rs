//! stellar_cli_tests - run the stellar CLI regression matrix
//!
//! ```text
//! stellar_cli_tests SOURCE_ROOT BINARY_ROOT
//!     [--alphabets dna dna5 protein char]
//!     [--database-strands forward reverse both]
//!     [--output-extensions gff txt]
//!     [--env dev] [--report PATH]
//! ```
//!
//! Exit status: 0 when every record passes, 1 when any fails, 2 on usage or
//! environment errors.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use stellar_cli_tests::config::AppConfig;
use stellar_cli_tests::report::{GIT_HASH, RunReport};
use stellar_cli_tests::{MatrixSelection, ProcessExecutor, run_matrix};

const USAGE: &str = "Usage: stellar_cli_tests SOURCE_ROOT BINARY_ROOT \
[--alphabets A..] [--database-strands S..] [--output-extensions E..] \
[--env ENV] [--report PATH]";

// ============================================================
// ARGUMENTS
// ============================================================

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    source_root: PathBuf,
    binary_root: PathBuf,
    selection: MatrixSelection,
    env: String,
    report: Option<PathBuf>,
}

const VALUE_FLAGS: [&str; 2] = ["--env", "--report"];

/// Values following `flag` up to the next `--` option, repeats dropped
fn list_values<T>(args: &[String], flag: &str) -> Result<Option<Vec<T>>, String>
where
    T: FromStr + PartialEq,
    T::Err: std::fmt::Display,
{
    let Some(pos) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let mut values: Vec<T> = Vec::new();
    for arg in args[pos + 1..].iter().take_while(|a| !a.starts_with("--")) {
        let value = arg.parse::<T>().map_err(|e| e.to_string())?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    if values.is_empty() {
        return Err(format!("{} expects at least one value", flag));
    }
    Ok(Some(values))
}

fn single_value(args: &[String], flag: &str) -> Result<Option<String>, String> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(pos) => match args.get(pos + 1) {
            Some(value) if !value.starts_with("--") => Ok(Some(value.clone())),
            _ => Err(format!("{} expects a value", flag)),
        },
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    const LIST_FLAGS: [&str; 3] = ["--alphabets", "--database-strands", "--output-extensions"];

    // Positionals are whatever no option consumed
    let mut positionals = Vec::new();
    let mut in_list = false;
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if LIST_FLAGS.contains(&arg.as_str()) {
            in_list = true;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            in_list = false;
            skip_next = true;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option {}", arg));
        } else if !in_list {
            positionals.push(arg.clone());
        }
    }

    let [source_root, binary_root] = <[String; 2]>::try_from(positionals)
        .map_err(|_| "expected SOURCE_ROOT and BINARY_ROOT".to_string())?;

    let defaults = MatrixSelection::default();
    let selection = MatrixSelection {
        alphabets: list_values(args, "--alphabets")?.unwrap_or(defaults.alphabets),
        strands: list_values(args, "--database-strands")?.unwrap_or(defaults.strands),
        formats: list_values(args, "--output-extensions")?.unwrap_or(defaults.formats),
    };

    Ok(CliArgs {
        source_root: PathBuf::from(source_root),
        binary_root: PathBuf::from(binary_root),
        selection,
        env: single_value(args, "--env")?.unwrap_or_else(|| "dev".to_string()),
        report: single_value(args, "--report")?.map(PathBuf::from),
    })
}

/// `-h`/`--help` anywhere except as the value of `--env` or `--report`
fn wants_help(args: &[String]) -> bool {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if arg == "-h" || arg == "--help" {
            return true;
        }
    }
    false
}

// ============================================================
// MAIN
// ============================================================

fn run(cli: CliArgs) -> anyhow::Result<bool> {
    let app_config = AppConfig::load_or_default(&cli.env)?;
    let _log_guard = stellar_cli_tests::logging::init_logging(&app_config);

    tracing::info!(
        "Starting stellar CLI tests ({} config, build {})",
        cli.env,
        GIT_HASH
    );

    let settings = app_config
        .suite
        .settings(&cli.source_root, &cli.binary_root);
    let summary = run_matrix(settings, &cli.selection, &mut ProcessExecutor)
        .context("test run aborted")?;

    let report_path = cli
        .report
        .or_else(|| app_config.suite.report_path.as_ref().map(PathBuf::from));
    if let Some(path) = report_path {
        RunReport::new(&cli.selection, &summary).write(&path)?;
    }

    Ok(summary.has_failures())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if wants_help(&args) {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
