use crate::production::economics::dt_vec_hrs;

/// One timestep of the simulation horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Timestep index
    pub timestep: usize,
    /// Elapsed hours since the start of the horizon
    pub time_hrs: f64,
    /// Duration of this timestep in hours
    pub dt_hrs: f64,
}

/// A simulation clock that walks a time axis step by step.
///
/// The `Clock` yields each timestep exactly once, in order, with its elapsed
/// time and duration. Interval durations follow the axis: the last interval
/// repeats the previous one.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::clock::Clock;
///
/// let mut clock = Clock::hourly(3);
/// let mut steps = Vec::new();
///
/// clock.run(|tick| steps.push(tick.timestep));
/// assert_eq!(steps, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Next step to yield
    current: usize,
    /// Elapsed hours at each step
    time_vec_hrs: Vec<f64>,
    /// Duration of each step
    dt_vec_hrs: Vec<f64>,
}

impl Clock {
    /// Creates a clock over an explicit time axis.
    ///
    /// # Arguments
    ///
    /// * `time_vec_hrs` - Elapsed hours at each timestep, strictly increasing
    pub fn new(time_vec_hrs: Vec<f64>) -> Self {
        Self {
            current: 0,
            dt_vec_hrs: dt_vec_hrs(&time_vec_hrs),
            time_vec_hrs,
        }
    }

    /// Creates a clock over `total` hourly steps starting at hour 0.
    pub fn hourly(total: usize) -> Self {
        Self::new((0..total).map(|i| i as f64).collect())
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(tick)` - The current step before advancing
    /// * `None` - If the clock has reached the end of its axis
    pub fn tick(&mut self) -> Option<Tick> {
        let time_hrs = *self.time_vec_hrs.get(self.current)?;
        let tick = Tick {
            timestep: self.current,
            time_hrs,
            dt_hrs: self.dt_vec_hrs[self.current],
        };
        self.current += 1;
        Some(tick)
    }

    /// Runs a function for each remaining step in the clock.
    ///
    /// # Arguments
    ///
    /// * `f` - A function that takes the current tick as an argument
    pub fn run(&mut self, mut f: impl FnMut(Tick)) {
        while let Some(tick) = self.tick() {
            f(tick);
        }
    }

    /// Steps not yet yielded.
    pub fn remaining(&self) -> usize {
        self.time_vec_hrs.len() - self.current
    }
}
