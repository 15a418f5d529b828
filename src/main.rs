//! Microgrid simulator entry point: CLI wiring, run, and result output.

use std::process;

use tracing::{Level, error};

use microgrid_sim::cli::{self, CliOptions};
use microgrid_sim::config::ScenarioConfig;
use microgrid_sim::error::SimResult;
use microgrid_sim::io::export::{export_csv, write_results};
use microgrid_sim::runner::run_scenario;

fn load_scenario(opts: &CliOptions) -> SimResult<ScenarioConfig> {
    let mut scenario = match (&opts.scenario, &opts.preset) {
        (Some(path), _) => ScenarioConfig::from_toml_file(path)?,
        (None, Some(name)) => ScenarioConfig::from_preset(name)?,
        (None, None) => ScenarioConfig::baseline(),
    };
    if let Some(seed) = opts.seed {
        scenario.simulation.seed = seed;
    }
    Ok(scenario)
}

fn run(opts: &CliOptions) -> SimResult<()> {
    let scenario = load_scenario(opts)?;
    let run = run_scenario(&scenario, opts.verbose)?;

    println!("{}", run.kpis);

    if let Some(path) = &opts.telemetry_out {
        export_csv(&run.results, path)?;
        eprintln!("Telemetry written to {}", path.display());
    }

    if let Some(root) = &opts.output {
        let dirs = write_results(
            root,
            run.engine.assets(),
            run.engine.load().time_vec_hrs(),
            opts.max_lines,
        )?;
        eprintln!("Results for {} asset(s) written under {}", dirs.len(), root.display());
    }

    Ok(())
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("error: {message}");
            cli::print_usage();
            process::exit(2);
        }
    };
    if opts.help {
        cli::print_usage();
        return;
    }

    let max_level = if opts.verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&opts) {
        error!("{e}");
        process::exit(1);
    }
}
