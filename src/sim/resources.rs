//! Resource provider: external time series keyed by [`ResourceKey`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{SimError, SimResult};
use crate::io::import::read_csv_records;
use crate::production::types::ResourceKey;

/// Largest tolerated mismatch between a resource time axis and the load's (hours).
const TIME_ALIGNMENT_TOLERANCE_HRS: f64 = 1e-6;

#[derive(Debug, Deserialize)]
struct HydroRecordRaw {
    #[serde(rename = "Time (since start of data) [hrs]")]
    time_hrs: f64,
    #[serde(rename = "Hydro Inflow [m3/hr]")]
    inflow_m3hr: f64,
}

/// Nonnegative resource series (e.g. hydro inflow in m3/hr), one per key.
///
/// Every registered series has exactly `n_points` values, validated on
/// insertion, so assets never re-check resource data per timestep.
#[derive(Debug, Clone)]
pub struct Resources {
    n_points: usize,
    series: BTreeMap<ResourceKey, Vec<f64>>,
}

impl Resources {
    /// Creates an empty provider for series of `n_points` values.
    pub fn new(n_points: usize) -> Self {
        Self {
            n_points,
            series: BTreeMap::new(),
        }
    }

    /// Registers a series under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the key is already
    /// registered, the length is not `n_points`, or any value is negative or
    /// non-finite.
    pub fn add_series(&mut self, key: ResourceKey, values: Vec<f64>) -> SimResult<()> {
        let context = format!("resource {key}");
        if self.series.contains_key(&key) {
            return Err(SimError::invalid(context, "key already registered"));
        }
        if values.len() != self.n_points {
            return Err(SimError::invalid(
                context,
                format!("expected {} values, got {}", self.n_points, values.len()),
            ));
        }
        if let Some(i) = values.iter().position(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(SimError::invalid(
                context,
                format!("value at point {i} must be finite and >= 0, got {}", values[i]),
            ));
        }
        self.series.insert(key, values);
        Ok(())
    }

    /// Reads a hydro inflow series from CSV and registers it under `key`.
    ///
    /// The file needs `Time (since start of data) [hrs]` and
    /// `Hydro Inflow [m3/hr]` columns, with a time axis matching `time_vec_hrs`.
    ///
    /// # Errors
    ///
    /// Returns an IO or CSV error if the file cannot be read,
    /// [`SimError::InvalidConfiguration`] if the time axis does not line up,
    /// otherwise the same as [`Resources::add_series`].
    pub fn add_hydro_csv(
        &mut self,
        key: ResourceKey,
        path: &Path,
        time_vec_hrs: &[f64],
    ) -> SimResult<()> {
        let records: Vec<HydroRecordRaw> = read_csv_records(path)?;
        let misaligned = records.len() != time_vec_hrs.len()
            || records
                .iter()
                .zip(time_vec_hrs)
                .any(|(r, t)| (r.time_hrs - t).abs() > TIME_ALIGNMENT_TOLERANCE_HRS);
        if misaligned {
            return Err(SimError::invalid(
                format!("resource {key}"),
                format!(
                    "time axis of \"{}\" does not match the electrical load",
                    path.display()
                ),
            ));
        }
        self.add_series(key, records.into_iter().map(|r| r.inflow_m3hr).collect())
    }

    /// Resource value for `key` at `timestep`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataGap`] if the key is unregistered or the
    /// timestep is past the end of the series.
    pub fn value(&self, key: ResourceKey, timestep: usize) -> SimResult<f64> {
        self.series
            .get(&key)
            .and_then(|values| values.get(timestep))
            .copied()
            .ok_or_else(|| SimError::DataGap {
                provider: format!("resource {key}"),
                timestep,
            })
    }

    pub fn contains(&self, key: ResourceKey) -> bool {
        self.series.contains_key(&key)
    }

    /// Full series registered under `key`.
    pub fn series(&self, key: ResourceKey) -> Option<&[f64]> {
        self.series.get(&key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = ResourceKey> + '_ {
        self.series.keys().copied()
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }
}
