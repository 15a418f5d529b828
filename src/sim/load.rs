//! Electrical load provider.

use std::path::Path;

use serde::Deserialize;

use crate::error::{SimError, SimResult};
use crate::io::import::read_csv_records;
use crate::production::economics::{HOURS_PER_YEAR, dt_vec_hrs};

#[derive(Debug, Deserialize)]
struct LoadRecordRaw {
    #[serde(rename = "Time (since start of data) [hrs]")]
    time_hrs: f64,
    #[serde(rename = "Electrical Load [kW]")]
    load_kw: f64,
}

/// The load every run must serve, with the time axis used for discounting.
///
/// The time axis must be strictly increasing and the load nonnegative and
/// finite. Interval durations are derived from the axis: `dt[i] = t[i+1] - t[i]`,
/// with the last interval repeating the previous one.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::load::ElectricalLoad;
///
/// let load = ElectricalLoad::hourly(vec![10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(load.n_points(), 3);
/// assert_eq!(load.mean_load_kw(), 20.0);
/// ```
#[derive(Debug, Clone)]
pub struct ElectricalLoad {
    time_vec_hrs: Vec<f64>,
    dt_vec_hrs: Vec<f64>,
    load_vec_kw: Vec<f64>,
    min_load_kw: f64,
    mean_load_kw: f64,
    max_load_kw: f64,
}

impl ElectricalLoad {
    /// Builds a load series from a time axis and matching load values.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the series is empty, the
    /// lengths differ, a time is non-finite, the axis starts before 0 or is
    /// not strictly increasing, or any load is negative or non-finite.
    pub fn new(time_vec_hrs: Vec<f64>, load_vec_kw: Vec<f64>) -> SimResult<Self> {
        if load_vec_kw.is_empty() {
            return Err(SimError::invalid("ElectricalLoad", "series is empty"));
        }
        if time_vec_hrs.len() != load_vec_kw.len() {
            return Err(SimError::invalid(
                "ElectricalLoad",
                format!(
                    "time axis has {} points but load has {}",
                    time_vec_hrs.len(),
                    load_vec_kw.len()
                ),
            ));
        }
        if let Some(i) = time_vec_hrs.iter().position(|t| !t.is_finite()) {
            return Err(SimError::invalid(
                "ElectricalLoad",
                format!("time at point {i} must be finite, got {}", time_vec_hrs[i]),
            ));
        }
        if time_vec_hrs[0] < 0.0 {
            return Err(SimError::invalid(
                "ElectricalLoad",
                format!("time axis must start at or after 0, got {}", time_vec_hrs[0]),
            ));
        }
        if let Some(i) = time_vec_hrs.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(SimError::invalid(
                "ElectricalLoad",
                format!("time axis not strictly increasing at point {}", i + 1),
            ));
        }
        if let Some(i) = load_vec_kw.iter().position(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(SimError::invalid(
                "ElectricalLoad",
                format!("load at point {i} must be finite and >= 0, got {}", load_vec_kw[i]),
            ));
        }

        let min_load_kw = load_vec_kw.iter().copied().fold(f64::INFINITY, f64::min);
        let max_load_kw = load_vec_kw.iter().copied().fold(0.0, f64::max);
        let mean_load_kw = load_vec_kw.iter().sum::<f64>() / load_vec_kw.len() as f64;

        Ok(Self {
            dt_vec_hrs: dt_vec_hrs(&time_vec_hrs),
            time_vec_hrs,
            load_vec_kw,
            min_load_kw,
            mean_load_kw,
            max_load_kw,
        })
    }

    /// Builds a load series on an hourly axis starting at 0.
    ///
    /// # Errors
    ///
    /// Same as [`ElectricalLoad::new`].
    pub fn hourly(load_vec_kw: Vec<f64>) -> SimResult<Self> {
        Self::with_step(load_vec_kw, 1.0)
    }

    /// Builds a load series on a uniform axis of `dt_hrs` starting at 0.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `dt_hrs` is not positive,
    /// otherwise the same as [`ElectricalLoad::new`].
    pub fn with_step(load_vec_kw: Vec<f64>, dt_hrs: f64) -> SimResult<Self> {
        if !(dt_hrs > 0.0) {
            return Err(SimError::invalid("ElectricalLoad", "dt_hrs must be > 0"));
        }
        let time_vec_hrs = (0..load_vec_kw.len()).map(|i| i as f64 * dt_hrs).collect();
        Self::new(time_vec_hrs, load_vec_kw)
    }

    /// Reads a load series from a CSV file with
    /// `Time (since start of data) [hrs]` and `Electrical Load [kW]` columns.
    ///
    /// # Errors
    ///
    /// Returns an IO or CSV error if the file cannot be read, otherwise the
    /// same as [`ElectricalLoad::new`].
    pub fn from_csv_path(path: &Path) -> SimResult<Self> {
        let records: Vec<LoadRecordRaw> = read_csv_records(path)?;
        let (time_vec_hrs, load_vec_kw) = records
            .into_iter()
            .map(|r| (r.time_hrs, r.load_kw))
            .unzip();
        Self::new(time_vec_hrs, load_vec_kw)
    }

    /// Load (kW) at `timestep`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataGap`] past the end of the series.
    pub fn load_kw(&self, timestep: usize) -> SimResult<f64> {
        self.load_vec_kw
            .get(timestep)
            .copied()
            .ok_or_else(|| SimError::DataGap {
                provider: "ElectricalLoad".to_string(),
                timestep,
            })
    }

    /// Elapsed hours since the start of the series at `timestep`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataGap`] past the end of the series.
    pub fn time_hrs(&self, timestep: usize) -> SimResult<f64> {
        self.time_vec_hrs
            .get(timestep)
            .copied()
            .ok_or_else(|| SimError::DataGap {
                provider: "ElectricalLoad time axis".to_string(),
                timestep,
            })
    }

    /// Duration of the interval starting at `timestep`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataGap`] past the end of the series.
    pub fn dt_hrs(&self, timestep: usize) -> SimResult<f64> {
        self.dt_vec_hrs
            .get(timestep)
            .copied()
            .ok_or_else(|| SimError::DataGap {
                provider: "ElectricalLoad time axis".to_string(),
                timestep,
            })
    }

    pub fn n_points(&self) -> usize {
        self.load_vec_kw.len()
    }

    /// Modelled span in years, including the final interval.
    pub fn n_years(&self) -> f64 {
        let last = self.n_points() - 1;
        (self.time_vec_hrs[last] + self.dt_vec_hrs[last] - self.time_vec_hrs[0]) / HOURS_PER_YEAR
    }

    pub fn time_vec_hrs(&self) -> &[f64] {
        &self.time_vec_hrs
    }

    pub fn dt_vec_hrs(&self) -> &[f64] {
        &self.dt_vec_hrs
    }

    pub fn load_vec_kw(&self) -> &[f64] {
        &self.load_vec_kw
    }

    pub fn min_load_kw(&self) -> f64 {
        self.min_load_kw
    }

    pub fn mean_load_kw(&self) -> f64 {
        self.mean_load_kw
    }

    pub fn max_load_kw(&self) -> f64 {
        self.max_load_kw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::import::{LOAD_HEADER, TIME_HEADER};
    use approx::assert_abs_diff_eq;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn hourly_axis_and_statistics() {
        let load = ElectricalLoad::hourly(vec![5.0, 15.0, 10.0]).expect("valid load");
        assert_eq!(load.time_vec_hrs(), &[0.0, 1.0, 2.0]);
        assert_eq!(load.dt_vec_hrs(), &[1.0, 1.0, 1.0]);
        assert_eq!(load.min_load_kw(), 5.0);
        assert_eq!(load.max_load_kw(), 15.0);
        assert_eq!(load.mean_load_kw(), 10.0);
    }

    #[test]
    fn one_year_hourly_is_one_year() {
        let load = ElectricalLoad::hourly(vec![1.0; 8760]).expect("valid load");
        assert_abs_diff_eq!(load.n_years(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            ElectricalLoad::hourly(Vec::new()),
            Err(SimError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn negative_load_is_rejected() {
        let err = ElectricalLoad::hourly(vec![1.0, -0.5]).unwrap_err();
        assert!(err.to_string().contains("point 1"));
    }

    #[test]
    fn non_increasing_time_is_rejected() {
        assert!(ElectricalLoad::new(vec![0.0, 1.0, 1.0], vec![1.0; 3]).is_err());
    }

    #[rstest]
    #[case::infinite_single(vec![f64::INFINITY], "must be finite")]
    #[case::infinite_tail(vec![-5.0, f64::INFINITY], "must be finite")]
    #[case::nan(vec![0.0, f64::NAN], "must be finite")]
    #[case::negative_start(vec![-1.0, 0.0], "start at or after 0")]
    fn bad_time_axis_is_rejected(#[case] time_vec_hrs: Vec<f64>, #[case] expected: &str) {
        let n = time_vec_hrs.len();
        let err = ElectricalLoad::new(time_vec_hrs, vec![1.0; n]).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn lookup_past_end_is_data_gap() {
        let load = ElectricalLoad::hourly(vec![1.0, 2.0]).expect("valid load");
        assert_eq!(load.load_kw(1).ok(), Some(2.0));
        assert!(matches!(
            load.load_kw(2),
            Err(SimError::DataGap { timestep: 2, .. })
        ));
    }

    #[test]
    fn reads_csv_with_uneven_intervals() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{TIME_HEADER},{LOAD_HEADER}").expect("write");
        writeln!(file, "0,10\n0.5,12\n2,8").expect("write");

        let load = ElectricalLoad::from_csv_path(file.path()).expect("valid csv");
        assert_eq!(load.n_points(), 3);
        assert_eq!(load.dt_vec_hrs(), &[0.5, 1.5, 1.5]);
        assert_eq!(load.load_kw(2).ok(), Some(8.0));
    }
}
