//! Seeded synthetic series for loads and resource inflows.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::production::economics::HOURS_PER_YEAR;

/// Hours in a day, the period of a daily load cycle.
pub const HOURS_PER_DAY: f64 = 24.0;

/// A sinusoidal profile with Gaussian noise, clamped to be nonnegative.
///
/// `value(t) = base + amplitude * sin(2 pi t / period + phase) + noise`
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::profiles::SinusoidProfile;
///
/// // A daily load cycle around 50 kW
/// let mut profile = SinusoidProfile::daily(50.0, 20.0, 0.0, 2.0, 42);
/// let series = profile.series(&[0.0, 1.0, 2.0]);
/// assert_eq!(series.len(), 3);
/// assert!(series.iter().all(|&v| v >= 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct SinusoidProfile {
    /// Mean value
    pub base: f64,

    /// Amplitude of the sinusoidal variation
    pub amplitude: f64,

    /// Length of one cycle in hours
    pub period_hrs: f64,

    /// Phase offset in radians
    pub phase_rad: f64,

    /// Standard deviation of the Gaussian noise
    pub noise_std: f64,

    /// Random number generator for noise generation
    rng: StdRng,
}

impl SinusoidProfile {
    /// Creates a profile with the given cycle.
    ///
    /// # Arguments
    ///
    /// * `base` - Mean value
    /// * `amplitude` - Amplitude of the sinusoidal variation
    /// * `period_hrs` - Cycle length in hours (must be > 0)
    /// * `phase_rad` - Phase offset in radians
    /// * `noise_std` - Standard deviation of Gaussian noise (0 disables noise)
    /// * `seed` - Random seed for reproducible noise
    ///
    /// # Panics
    ///
    /// Panics if `period_hrs` is not positive.
    pub fn new(
        base: f64,
        amplitude: f64,
        period_hrs: f64,
        phase_rad: f64,
        noise_std: f64,
        seed: u64,
    ) -> Self {
        assert!(period_hrs > 0.0, "period_hrs must be > 0");
        Self {
            base,
            amplitude,
            period_hrs,
            phase_rad,
            noise_std,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A profile repeating every day, e.g. an electrical load.
    pub fn daily(base: f64, amplitude: f64, phase_rad: f64, noise_std: f64, seed: u64) -> Self {
        Self::new(base, amplitude, HOURS_PER_DAY, phase_rad, noise_std, seed)
    }

    /// A profile repeating every year, e.g. a river's seasonal inflow.
    pub fn seasonal(base: f64, amplitude: f64, phase_rad: f64, noise_std: f64, seed: u64) -> Self {
        Self::new(base, amplitude, HOURS_PER_YEAR, phase_rad, noise_std, seed)
    }

    /// Draws the value at `time_hrs`. Advances the noise generator.
    pub fn value_at(&mut self, time_hrs: f64) -> f64 {
        let cycle_pos = (time_hrs % self.period_hrs) / self.period_hrs; // [0,1)
        let angle = 2.0 * std::f64::consts::PI * cycle_pos + self.phase_rad;

        let noise = if self.noise_std > 0.0 {
            // Box-Muller
            let u1: f64 = self.rng.random::<f64>().clamp(1e-12, 1.0);
            let u2: f64 = self.rng.random::<f64>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            z0 * self.noise_std
        } else {
            0.0
        };

        (self.base + self.amplitude * angle.sin() + noise).max(0.0)
    }

    /// Draws one value per entry of a time axis.
    pub fn series(&mut self, time_vec_hrs: &[f64]) -> Vec<f64> {
        time_vec_hrs.iter().map(|&t| self.value_at(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn hourly_axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn noiseless_daily_profile_follows_sinusoid() {
        let mut profile = SinusoidProfile::daily(10.0, 5.0, 0.0, 0.0, 0);
        let series = profile.series(&hourly_axis(25));
        assert_abs_diff_eq!(series[0], 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series[6], 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(series[18], 5.0, epsilon = 1e-12);
        // wraps after a day
        assert_abs_diff_eq!(series[24], series[0], epsilon = 1e-12);
    }

    #[test]
    fn never_negative() {
        let mut profile = SinusoidProfile::daily(1.0, 5.0, 0.0, 3.0, 7);
        assert!(profile.series(&hourly_axis(500)).iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn same_seed_is_deterministic() {
        let mut a = SinusoidProfile::seasonal(40.0, 20.0, 0.0, 4.0, 42);
        let mut b = SinusoidProfile::seasonal(40.0, 20.0, 0.0, 4.0, 42);
        let axis = hourly_axis(100);
        assert_eq!(a.series(&axis), b.series(&axis));
    }

    #[test]
    fn different_seeds_differ() {
        let axis = hourly_axis(50);
        let a = SinusoidProfile::daily(40.0, 0.0, 0.0, 4.0, 1).series(&axis);
        let b = SinusoidProfile::daily(40.0, 0.0, 0.0, 4.0, 2).series(&axis);
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic]
    fn zero_period_panics() {
        SinusoidProfile::new(1.0, 1.0, 0.0, 0.0, 0.0, 0);
    }
}
