// Error types: projectile construction failures and invalid match configuration

use thiserror::Error;

/// Simulation Errors
#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum SimError {
    #[error("Launch parameters are not finite (angle {angle}, speed {speed})")]
    NonFiniteLaunch { angle: f64, speed: f64 },
    #[error("Launch origin or mass is not finite")]
    NonFiniteBody,
}

/// Configuration Errors
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ConfigError {
    #[error("{name} must be greater than zero (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be a finite number")]
    NonFinite { name: &'static str },
    #[error("Restitution must lie in [0, 1] (got {0})")]
    RestitutionOutOfRange(f64),
    #[error("Bounce limit must be at least 1")]
    ZeroBounceLimit,
    #[error("Invalid shot '{0}', expected ANGLE,SPEED")]
    InvalidShot(String),
}
