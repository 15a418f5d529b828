//! CSV ingestion for load and resource time series.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::SimResult;

/// Header of the time column shared by every input series.
pub const TIME_HEADER: &str = "Time (since start of data) [hrs]";
/// Header of the load column in an electrical load series.
pub const LOAD_HEADER: &str = "Electrical Load [kW]";
/// Header of the inflow column in a hydro resource series.
pub const HYDRO_INFLOW_HEADER: &str = "Hydro Inflow [m3/hr]";

/// Reads every record of a headed CSV file into `T`.
///
/// # Errors
///
/// Returns [`crate::error::SimError::Io`] if the file cannot be opened and
/// [`crate::error::SimError::Csv`] if a row does not deserialize.
pub fn read_csv_records<T: DeserializeOwned>(path: &Path) -> SimResult<Vec<T>> {
    let file = File::open(path)?;
    read_records(file)
}

/// Reads every record of headed CSV from any reader into `T`.
///
/// Fields are trimmed, so `1.0, 2.0` parses like `1.0,2.0`.
///
/// # Errors
///
/// Returns [`crate::error::SimError::Csv`] if a row does not deserialize.
pub fn read_records<T: DeserializeOwned>(reader: impl Read) -> SimResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = rdr.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}
