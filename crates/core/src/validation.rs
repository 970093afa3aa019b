//! Input validation utilities.
//!
//! Range checks shared by the geo ranker, the registry and configuration parsing.

use crate::{CoreError, CoreResult};

/// Validates a latitude/longitude pair in decimal degrees.
///
/// Both values must be finite; latitude must lie in `[-90, 90]` and longitude in
/// `[-180, 180]`.
///
/// # Errors
///
/// Returns `CoreError::InvalidCoordinate` carrying the offending values.
pub fn validate_coordinate(latitude: f64, longitude: f64) -> CoreResult<()> {
    let ok = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);

    if !ok {
        return Err(CoreError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }

    Ok(())
}

/// Validates a search radius in kilometres: positive and finite.
///
/// # Errors
///
/// Returns `CoreError::InvalidRadius` otherwise.
pub fn validate_radius(radius_km: f64) -> CoreResult<()> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(CoreError::InvalidRadius(radius_km));
    }
    Ok(())
}
