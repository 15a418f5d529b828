//! Per-timestep energy balance computations.

/// Returns how far a timestep's split departs from the energy balance.
///
/// Every committed timestep must satisfy
/// `production = dispatch + storage + curtailment`, so a correct split
/// yields zero (up to floating-point rounding).
///
/// # Arguments
///
/// * `production_kw` - Total production of the asset
/// * `dispatch_kw` - Production delivered to the load
/// * `storage_kw` - Production diverted to storage
/// * `curtailment_kw` - Production discarded
pub fn energy_balance_error_kw(
    production_kw: f64,
    dispatch_kw: f64,
    storage_kw: f64,
    curtailment_kw: f64,
) -> f64 {
    production_kw - (dispatch_kw + storage_kw + curtailment_kw)
}

/// Load left unserved after a fleet's dispatch, never negative.
pub fn unmet_load_kw(load_kw: f64, total_dispatch_kw: f64) -> f64 {
    (load_kw - total_dispatch_kw).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_split_has_zero_error() {
        assert_eq!(energy_balance_error_kw(10.0, 6.0, 1.0, 3.0), 0.0);
    }

    #[test]
    fn missing_curtailment_shows_up_as_positive_error() {
        assert_eq!(energy_balance_error_kw(10.0, 6.0, 0.0, 0.0), 4.0);
    }

    #[test]
    fn unmet_load_clamps_at_zero() {
        assert_eq!(unmet_load_kw(5.0, 3.0), 2.0);
        assert_eq!(unmet_load_kw(5.0, 7.0), 0.0);
    }
}
