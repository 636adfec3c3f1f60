//! Up and down counters.

/// Counting direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterDirection {
    /// CTU: +1 per rising edge, done when count >= preset
    Up,
    /// CTD: -1 per rising edge, done when count <= preset
    Down,
}

/// Result of one counter update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterOutput {
    /// New count
    pub count: f64,
    /// Whether a rising edge was seen this scan
    pub counted: bool,
    /// Rung continuity after the counter
    pub output: bool,
}

/// A counter function block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counter {
    pub direction: CounterDirection,
    pub preset: f64,
}

impl Counter {
    /// Create a new counter.
    pub fn new(direction: CounterDirection, preset: f64) -> Self {
        Self { direction, preset }
    }

    /// Evaluate the counter for one scan.
    ///
    /// `previous` is the enabling state seen on the previous scan; the
    /// caller stores `enable` as the next `previous` regardless of the
    /// result.
    pub fn update(&self, enable: bool, previous: bool, count: f64) -> CounterOutput {
        let counted = enable && !previous;
        let count = match (counted, self.direction) {
            (false, _) => count,
            (true, CounterDirection::Up) => count + 1.0,
            (true, CounterDirection::Down) => count - 1.0,
        };

        let done = match self.direction {
            CounterDirection::Up => count >= self.preset,
            CounterDirection::Down => count <= self.preset,
        };

        CounterOutput {
            count,
            counted,
            output: enable && done,
        }
    }
}
