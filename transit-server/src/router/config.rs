//! Routing configuration for graph construction.

use serde::Deserialize;

/// Error returned for unusable configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Wait time must be a non-negative number of minutes
    #[error("invalid bus wait time: {0}")]
    InvalidWaitTime(f64),

    /// Velocity must be a positive number of km/h
    #[error("invalid bus velocity: {0}")]
    InvalidVelocity(f64),
}

/// Wait and speed parameters shared by every stop and line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RoutingSettings {
    /// Time spent waiting at a stop before boarding, in minutes.
    pub bus_wait_time: f64,

    /// Average bus speed, in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create settings, validating both values.
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Result<Self, ConfigError> {
        let settings = Self {
            bus_wait_time,
            bus_velocity,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the wait time is non-negative and the velocity positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bus_wait_time.is_finite() || self.bus_wait_time < 0.0 {
            return Err(ConfigError::InvalidWaitTime(self.bus_wait_time));
        }
        if !self.bus_velocity.is_finite() || self.bus_velocity <= 0.0 {
            return Err(ConfigError::InvalidVelocity(self.bus_velocity));
        }
        Ok(())
    }

    /// Bus speed converted to meters per minute.
    pub fn meters_per_minute(&self) -> f64 {
        self.bus_velocity * 1000.0 / 60.0
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}
