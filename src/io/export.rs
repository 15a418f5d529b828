//! Result writers: per-asset summaries and time series, and step CSV export.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SimResult;
use crate::io::import::TIME_HEADER;
use crate::production::{Controllable, Hydro, NoncombustionAsset};
use crate::sim::types::StepResult;

/// Column header for step CSV export.
const STEP_HEADER: &str = "timestep,time_hrs,dt_hrs,load_kw,production_kw,\
                           dispatch_kw,curtailment_kw,unmet_load_kw";

/// Column header of every hydro time series file.
const HYDRO_TIME_SERIES_HEADER: [&str; 11] = [
    TIME_HEADER,
    "Production [kW]",
    "Dispatch [kW]",
    "Storage [kW]",
    "Curtailment [kW]",
    "Is Running (N = 0 / Y = 1)",
    "Turbine Flow [m3/hr]",
    "Stored Volume [m3]",
    "Spill Rate [m3/hr]",
    "Capital Cost (actual)",
    "Operation and Maintenance Cost (actual)",
];

/// Exports simulation step results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `results` - Complete simulation step results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> SimResult<()> {
    let file = File::create(path)?;
    write_csv(results, BufWriter::new(file))
}

/// Writes simulation step results as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> SimResult<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(STEP_HEADER.split(',').map(str::trim))?;
    for r in results {
        wtr.write_record(&[
            r.timestep.to_string(),
            format!("{:.4}", r.time_hrs),
            format!("{:.4}", r.dt_hrs),
            format!("{:.4}", r.load_kw),
            format!("{:.4}", r.production_kw),
            format!("{:.4}", r.dispatch_kw),
            format!("{:.4}", r.curtailment_kw),
            format!("{:.4}", r.unmet_load_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Directory of one asset's results below `write_root`:
/// `Production/Noncombustion/<TYPE>_<capacity>kW_idx<idx>/`.
pub fn asset_results_dir(write_root: &Path, asset: &NoncombustionAsset, idx: usize) -> PathBuf {
    let capacity = asset.production().capacity_kw.ceil();
    write_root
        .join("Production")
        .join("Noncombustion")
        .join(format!("{}_{capacity}kW_idx{idx}", asset.asset_type()))
}

/// Writes the summary and time series of every asset under `write_root`.
///
/// `max_lines` limits the time series rows (clamped to the horizon); `Some(0)`
/// writes the summary only.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub fn write_results(
    write_root: &Path,
    assets: &[NoncombustionAsset],
    time_vec_hrs: &[f64],
    max_lines: Option<usize>,
) -> SimResult<Vec<PathBuf>> {
    let mut dirs = Vec::with_capacity(assets.len());
    for (idx, asset) in assets.iter().enumerate() {
        let dir = asset_results_dir(write_root, asset, idx);
        fs::create_dir_all(&dir)?;

        match asset {
            NoncombustionAsset::Hydro(hydro) => {
                let summary = File::create(dir.join("summary_results.md"))?;
                write_hydro_summary(hydro, BufWriter::new(summary))?;

                let n_lines = max_lines.unwrap_or(time_vec_hrs.len()).min(time_vec_hrs.len());
                if n_lines > 0 {
                    let series = File::create(dir.join("time_series_results.csv"))?;
                    write_hydro_time_series(hydro, time_vec_hrs, n_lines, BufWriter::new(series))?;
                }
            }
        }
        info!(path = %dir.display(), "results written");
        dirs.push(dir);
    }
    Ok(dirs)
}

/// Writes the human-readable markdown summary of a hydro asset.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_hydro_summary(hydro: &Hydro, mut w: impl Write) -> io::Result<()> {
    let nc = &hydro.noncombustion;
    let p = &nc.production;

    writeln!(w, "# {} kW {} Summary Results", p.capacity_kw.ceil(), p.type_str)?;
    writeln!(w, "\n--------\n")?;

    writeln!(w, "## Production Attributes\n")?;
    writeln!(w, "Capacity: {} kW  \n", p.capacity_kw)?;
    writeln!(w, "Sunk Cost: {}  ", p.is_sunk)?;
    writeln!(w, "Capital Cost: {}  ", p.capital_cost)?;
    writeln!(
        w,
        "Operation and Maintenance Cost: {} per kWh dispatched  ",
        p.operation_maintenance_cost_kwh
    )?;
    writeln!(w, "Nominal Inflation Rate (annual): {}  ", p.nominal_inflation_annual)?;
    writeln!(w, "Nominal Discount Rate (annual): {}  ", p.nominal_discount_annual)?;
    writeln!(w, "Real Discount Rate (annual): {}  \n", p.real_discount_annual)?;
    writeln!(w, "Replacement Running Hours: {}  ", p.replace_running_hrs)?;
    writeln!(w, "\n--------\n")?;

    writeln!(w, "## Noncombustion Attributes\n")?;
    writeln!(w, "Resource Key: {}  ", nc.resource_key())?;
    writeln!(w, "\n--------\n")?;

    writeln!(w, "## Hydro Attributes\n")?;
    writeln!(w, "Fluid Density: {} kg/m3  ", hydro.fluid_density_kgm3)?;
    writeln!(w, "Net Head: {} m  \n", hydro.net_head_m)?;
    writeln!(w, "Reservoir Volume: {} m3  ", hydro.reservoir_capacity_m3)?;
    writeln!(w, "Reservoir Initial State: {}  \n", hydro.init_reservoir_state)?;
    writeln!(w, "Turbine Type: {}  ", hydro.turbine_type.as_str())?;
    writeln!(w, "Minimum Flow: {:.4} m3/hr  ", hydro.minimum_flow_m3hr)?;
    writeln!(w, "Maximum Flow: {:.4} m3/hr  ", hydro.maximum_flow_m3hr)?;
    writeln!(w, "\n--------\n")?;

    writeln!(w, "## Results\n")?;
    writeln!(w, "Net Present Cost: {:.4}  \n", p.net_present_cost())?;
    writeln!(w, "Total Dispatch: {:.4} kWh  ", p.total_dispatch_kwh())?;
    writeln!(
        w,
        "Levellized Cost of Energy: {:.6} per kWh dispatched  \n",
        p.levellized_cost_of_energy_kwh()
    )?;
    writeln!(w, "Running Hours: {}  ", nc.running_hours())?;
    writeln!(w, "Starts: {}  ", nc.n_starts())?;
    writeln!(w, "Replacements: {}  ", nc.n_replacements())?;
    writeln!(w, "\n--------\n")?;

    w.flush()
}

/// Writes the first `n_lines` timesteps of a hydro asset as CSV.
///
/// # Panics
///
/// Panics if `n_lines` exceeds the length of `time_vec_hrs` or the asset's horizon.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_hydro_time_series(
    hydro: &Hydro,
    time_vec_hrs: &[f64],
    n_lines: usize,
    writer: impl Write,
) -> SimResult<()> {
    let p = &hydro.noncombustion.production;
    let is_running = hydro.noncombustion.is_running_vec();
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HYDRO_TIME_SERIES_HEADER)?;
    for i in 0..n_lines {
        wtr.write_record(&[
            time_vec_hrs[i].to_string(),
            p.production_vec_kw()[i].to_string(),
            p.dispatch_vec_kw()[i].to_string(),
            p.storage_vec_kw()[i].to_string(),
            p.curtailment_vec_kw()[i].to_string(),
            u8::from(is_running[i]).to_string(),
            hydro.turbine_flow_vec_m3hr()[i].to_string(),
            hydro.stored_volume_vec_m3()[i].to_string(),
            hydro.spill_rate_vec_m3hr()[i].to_string(),
            p.capital_cost_vec()[i].to_string(),
            p.operation_maintenance_cost_vec()[i].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
