//! Runtime configuration.

use std::time::Duration;

use crate::error::{LadderError, Result};
use crate::physics::SimulationParameters;
use crate::{DEFAULT_MOTOR_TAG, DEFAULT_SCAN_PERIOD_MS};

/// Configuration of a runtime session.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Nominal scan period; also the `dt` handed to timers
    pub scan_period: Duration,
    /// Tag whose truth value runs the simulated drive
    pub motor_tag: String,
    /// Whether the drive simulation steps after each scan
    pub simulation: bool,
    /// Drive ramp parameters
    pub simulation_params: SimulationParameters,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            scan_period: Duration::from_millis(DEFAULT_SCAN_PERIOD_MS),
            motor_tag: DEFAULT_MOTOR_TAG.to_string(),
            simulation: true,
            simulation_params: SimulationParameters::default(),
        }
    }
}

impl RuntimeConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scan period.
    pub fn with_scan_period(mut self, scan_period: Duration) -> Self {
        self.scan_period = scan_period;
        self
    }

    /// Set the tag that drives the motor simulation.
    pub fn with_motor_tag(mut self, motor_tag: impl Into<String>) -> Self {
        self.motor_tag = motor_tag.into();
        self
    }

    /// Enable or disable the drive simulation.
    pub fn with_simulation(mut self, simulation: bool) -> Self {
        self.simulation = simulation;
        self
    }

    /// Set the drive ramp parameters.
    pub fn with_simulation_params(mut self, params: SimulationParameters) -> Self {
        self.simulation_params = params;
        self
    }

    /// Scan period in milliseconds.
    pub fn dt_ms(&self) -> f64 {
        self.scan_period.as_secs_f64() * 1000.0
    }

    /// Check the configuration before a session is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.scan_period.is_zero() {
            return Err(LadderError::InvalidScanPeriod {
                message: "scan period must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.scan_period, Duration::from_millis(100));
        assert_eq!(config.motor_tag, "Q0.1");
        assert!(config.simulation);
        assert_relative_eq!(config.simulation_params.max_freq(), 60.0);
        assert_relative_eq!(config.dt_ms(), 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let params = SimulationParameters::new(2.0, 3.0, 50.0).unwrap();
        let config = RuntimeConfig::new()
            .with_scan_period(Duration::from_millis(20))
            .with_motor_tag("RO1")
            .with_simulation(false)
            .with_simulation_params(params);
        assert_eq!(config.motor_tag, "RO1");
        assert!(!config.simulation);
        assert_eq!(config.simulation_params, params);
        assert_relative_eq!(config.dt_ms(), 20.0);
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = RuntimeConfig::new().with_scan_period(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(LadderError::InvalidScanPeriod { .. })
        ));
    }
}
