/// Tunables for negotiation and the event pump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Per-axis slack within which a negotiated size counts as achieved.
    pub tolerance: f32,
    /// Cap on redistribution rounds in one geometry computation.
    pub max_negotiation_passes: usize,
    /// Cap on scheduling ticks in one `run_until_idle` call.
    pub max_ticks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            max_negotiation_passes: 32,
            max_ticks: 256,
        }
    }
}

impl Config {
    /// Construct the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the negotiation tolerance. Negative values clamp to zero.
    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Set the redistribution round cap. At least one round always runs.
    pub fn max_negotiation_passes(mut self, passes: usize) -> Self {
        self.max_negotiation_passes = passes.max(1);
        self
    }

    /// Set the tick cap for `run_until_idle`.
    pub fn max_ticks(mut self, ticks: usize) -> Self {
        self.max_ticks = ticks.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let c = Config::new()
            .tolerance(-1.0)
            .max_negotiation_passes(0)
            .max_ticks(8);
        assert_eq!(c.tolerance, 0.0);
        assert_eq!(c.max_negotiation_passes, 1);
        assert_eq!(c.max_ticks, 8);
        assert_eq!(Config::default().tolerance, 0.5);
    }
}
