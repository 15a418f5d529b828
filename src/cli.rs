//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::config::ScenarioConfig;

/// Preset used when neither `--scenario` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "baseline";

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    /// Root directory for per-asset results.
    pub output: Option<PathBuf>,
    /// Time series row limit for per-asset results.
    pub max_lines: Option<usize>,
    /// Step CSV export path.
    pub telemetry_out: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first malformed argument.
pub fn parse_args() -> Result<CliOptions, String> {
    parse_args_from(env::args().skip(1).collect())
}

/// Parses an argument list that excludes the program name.
///
/// # Errors
///
/// Returns a message if an argument is unknown, repeated, missing its value,
/// or if `--scenario` and `--preset` are both given.
pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scenario" => {
                let path = required(iter.next(), "--scenario", "a TOML file path")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                let name = required(iter.next(), "--preset", "a preset name")?;
                if opts.preset.replace(name).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--seed" => {
                let raw = required(iter.next(), "--seed", "a u64")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--output" | "-o" => {
                let path = required(iter.next(), "--output", "a directory path")?;
                opts.output = Some(PathBuf::from(path));
            }
            "--max-lines" => {
                let raw = required(iter.next(), "--max-lines", "a row count")?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--max-lines value \"{raw}\" is not a valid count"))?;
                opts.max_lines = Some(n);
            }
            "--telemetry-out" => {
                let path = required(iter.next(), "--telemetry-out", "a file path")?;
                opts.telemetry_out = Some(PathBuf::from(path));
            }
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    if opts.scenario.is_none() && opts.preset.is_none() {
        opts.preset = Some(DEFAULT_PRESET.to_string());
    }

    Ok(opts)
}

fn required(value: Option<String>, flag: &str, expected: &str) -> Result<String, String> {
    value.ok_or_else(|| format!("missing value for {flag} (expected {expected})"))
}

pub fn print_usage() {
    eprintln!("microgrid-sim: hydro production against an electrical load");
    eprintln!();
    eprintln!("Usage: microgrid-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  -o, --output <dir>       Write per-asset summaries and time series");
    eprintln!("  --max-lines <n>          Limit time series rows (0 = summaries only)");
    eprintln!("  --telemetry-out <path>   Export step results to CSV");
    eprintln!("  -v, --verbose            Log lifecycle events");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the {DEFAULT_PRESET} preset is used.");
}
