//! Drive parameters, telemetry, and the ramp step.

use serde::{Deserialize, Serialize};

use super::{
    BASE_FREQUENCY_HZ, IDLE_CURRENT_AMPS, LOAD_CURRENT_SPAN_AMPS, RATED_RPM, SNAP_TOLERANCE,
};
use crate::error::{LadderError, Result};

/// Ramp configuration of the simulated drive.
///
/// Every field is strictly positive; construction through [`new`] is the
/// only way to obtain a value, so the step never divides by zero.
///
/// [`new`]: SimulationParameters::new
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    accel_time: f64,
    decel_time: f64,
    max_freq: f64,
}

impl SimulationParameters {
    /// Create validated parameters.
    ///
    /// # Arguments
    /// * `accel_time` - Seconds from standstill to maximum frequency
    /// * `decel_time` - Seconds from maximum frequency to standstill
    /// * `max_freq` - Maximum output frequency in Hz
    pub fn new(accel_time: f64, decel_time: f64, max_freq: f64) -> Result<Self> {
        check_positive("acceleration time", accel_time)?;
        check_positive("deceleration time", decel_time)?;
        check_positive("maximum frequency", max_freq)?;
        Ok(Self {
            accel_time,
            decel_time,
            max_freq,
        })
    }

    /// Acceleration time in seconds.
    pub fn accel_time(&self) -> f64 {
        self.accel_time
    }

    /// Deceleration time in seconds.
    pub fn decel_time(&self) -> f64 {
        self.decel_time
    }

    /// Maximum frequency in Hz.
    pub fn max_freq(&self) -> f64 {
        self.max_freq
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            accel_time: 5.0,
            decel_time: 5.0,
            max_freq: 60.0,
        }
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LadderError::invalid_simulation_param(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

/// Read-only drive telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationTelemetry {
    /// Output frequency in Hz
    pub frequency: f64,
    /// Motor speed in RPM
    pub speed_rpm: f64,
    /// Output current in A
    pub current_amps: f64,
}

/// Advance the drive by one tick of `dt_ms` milliseconds.
///
/// Pure: the returned telemetry depends only on the arguments.
pub fn step(
    params: &SimulationParameters,
    current: &SimulationTelemetry,
    run: bool,
    dt_ms: f64,
) -> SimulationTelemetry {
    let ticks_per_second = 1000.0 / dt_ms;
    let target = if run { params.max_freq } else { 0.0 };
    let diff = target - current.frequency;

    let step = if diff > 0.0 {
        params.max_freq / (params.accel_time * ticks_per_second)
    } else {
        -params.max_freq / (params.decel_time * ticks_per_second)
    };

    let frequency = if diff.abs() <= step.abs() + SNAP_TOLERANCE {
        target
    } else {
        current.frequency + step
    };

    let ratio = frequency / BASE_FREQUENCY_HZ;
    SimulationTelemetry {
        frequency,
        speed_rpm: ratio * RATED_RPM,
        current_amps: if run {
            IDLE_CURRENT_AMPS + ratio * LOAD_CURRENT_SPAN_AMPS
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 100.0;

    #[test]
    fn test_rejects_non_positive() {
        assert!(SimulationParameters::new(0.0, 5.0, 60.0).is_err());
        assert!(SimulationParameters::new(5.0, -1.0, 60.0).is_err());
        assert!(SimulationParameters::new(5.0, 5.0, f64::NAN).is_err());
        assert!(SimulationParameters::new(5.0, 5.0, 60.0).is_ok());
    }

    #[test]
    fn test_accelerates_to_max_without_overshoot() {
        let params = SimulationParameters::new(5.0, 5.0, 60.0).unwrap();
        let mut telemetry = SimulationTelemetry::default();
        let mut ticks = 0;

        while telemetry.frequency != 60.0 {
            let next = step(&params, &telemetry, true, DT);
            assert!(next.frequency <= 60.0);
            assert!(next.frequency > telemetry.frequency);
            telemetry = next;
            ticks += 1;
            assert!(ticks <= 100, "ramp did not converge");
        }

        // ceil(accel_time * ticks_per_second)
        assert_eq!(ticks, 50);
        assert_relative_eq!(telemetry.speed_rpm, 1800.0);
        assert_relative_eq!(telemetry.current_amps, 11.0);
    }

    #[test]
    fn test_first_step_size() {
        let params = SimulationParameters::new(5.0, 2.0, 60.0).unwrap();
        let up = step(&params, &SimulationTelemetry::default(), true, DT);
        assert_relative_eq!(up.frequency, 1.2);
        assert_relative_eq!(up.speed_rpm, 36.0);
        assert_relative_eq!(up.current_amps, 2.5 + 0.02 * 8.5);

        let running = SimulationTelemetry {
            frequency: 60.0,
            ..Default::default()
        };
        let down = step(&params, &running, false, DT);
        assert_relative_eq!(down.frequency, 57.0);
        assert_eq!(down.current_amps, 0.0);
    }

    #[test]
    fn test_decelerates_to_zero() {
        let params = SimulationParameters::new(5.0, 1.0, 60.0).unwrap();
        let mut telemetry = SimulationTelemetry {
            frequency: 60.0,
            speed_rpm: 1800.0,
            current_amps: 11.0,
        };
        for _ in 0..10 {
            telemetry = step(&params, &telemetry, false, DT);
            assert!(telemetry.frequency >= 0.0);
        }
        assert_eq!(telemetry.frequency, 0.0);
        assert_eq!(telemetry.speed_rpm, 0.0);
    }

    #[test]
    fn test_stays_at_target() {
        let params = SimulationParameters::default();
        let stopped = step(&params, &SimulationTelemetry::default(), false, DT);
        assert_eq!(stopped, SimulationTelemetry::default());
    }

    #[test]
    fn test_uneven_ramp_snaps() {
        // 7 Hz per tick never lands exactly on 60
        let params = SimulationParameters::new(1.0, 1.0, 70.0).unwrap();
        let mut telemetry = SimulationTelemetry::default();
        for _ in 0..10 {
            telemetry = step(&params, &telemetry, true, DT);
            assert!(telemetry.frequency <= 70.0);
        }
        assert_eq!(telemetry.frequency, 70.0);
    }
}
