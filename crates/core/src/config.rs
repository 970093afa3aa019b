//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in this crate reads process-wide environment variables during request handling;
//! binaries read them and hand the raw values to the `*_from_env_value` helpers below.

use crate::constants::{DEFAULT_MAX_RADIUS_KM, DEFAULT_RADIUS_KM};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_radius_km: f64,
    max_radius_km: f64,
    registry_file: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            max_radius_km: DEFAULT_MAX_RADIUS_KM,
            registry_file: None,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRadius` if either radius is not positive and finite, and
    /// `CoreError::InvalidInput` if the default radius exceeds the maximum.
    pub fn new(
        default_radius_km: f64,
        max_radius_km: f64,
        registry_file: Option<PathBuf>,
    ) -> CoreResult<Self> {
        crate::validation::validate_radius(default_radius_km)?;
        crate::validation::validate_radius(max_radius_km)?;

        if default_radius_km > max_radius_km {
            return Err(CoreError::InvalidInput(format!(
                "default radius {default_radius_km} km exceeds maximum radius {max_radius_km} km"
            )));
        }

        Ok(Self {
            default_radius_km,
            max_radius_km,
            registry_file,
        })
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    pub fn max_radius_km(&self) -> f64 {
        self.max_radius_km
    }

    pub fn registry_file(&self) -> Option<&Path> {
        self.registry_file.as_deref()
    }

    /// Resolve the radius for a single search request.
    ///
    /// `None` falls back to the configured default. Supplied values must be positive, finite
    /// and no larger than the configured maximum.
    pub fn resolve_radius(&self, requested: Option<f64>) -> CoreResult<f64> {
        let radius = requested.unwrap_or(self.default_radius_km);
        crate::validation::validate_radius(radius)?;

        if radius > self.max_radius_km {
            return Err(CoreError::InvalidInput(format!(
                "radius {radius} km exceeds the maximum of {} km",
                self.max_radius_km
            )));
        }

        Ok(radius)
    }
}

/// Parse a radius in kilometres from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn radius_from_env_value(value: Option<String>, default: f64) -> CoreResult<f64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(raw) = value else {
        return Ok(default);
    };

    let radius: f64 = raw
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("radius is not a number: {raw}")))?;
    crate::validation::validate_radius(radius)?;
    Ok(radius)
}

/// Parse the optional registry backing file.
///
/// Empty values mean "no backing file"; the registry then lives purely in memory.
pub fn registry_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
