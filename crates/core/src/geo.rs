//! Great-circle distance and nearby-facility ranking.
//!
//! Distances are computed with the Haversine formula on a sphere of radius 6371 km and
//! rounded to two decimal places. The rounded value is the only representation used: it is
//! what the radius filter compares, what the sort orders by, and what callers receive.

use crate::constants::{DISTANCE_DECIMALS, EARTH_RADIUS_KM};
use crate::facility::{Facility, RankedFacility};
use crate::validation::{validate_coordinate, validate_radius};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCoordinate` if either value is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        validate_coordinate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// Full-precision Haversine distance between two coordinates, in kilometres.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a distance to the precision used throughout ranking.
pub fn round_distance(km: f64) -> f64 {
    let factor = 10f64.powi(DISTANCE_DECIMALS);
    (km * factor).round() / factor
}

/// Haversine distance rounded to two decimal places.
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    round_distance(haversine_km(from, to))
}

/// Ranks `candidates` by distance from `origin`, keeping those within `radius_km`.
///
/// The radius boundary is inclusive. The sort is stable, so facilities at the same rounded
/// distance keep their input order. An empty candidate list yields an empty result.
///
/// # Errors
///
/// Returns `CoreError::InvalidRadius` if `radius_km` is not positive and finite.
pub fn rank_nearby(
    origin: Coordinate,
    candidates: impl IntoIterator<Item = Facility>,
    radius_km: f64,
) -> CoreResult<Vec<RankedFacility>> {
    validate_radius(radius_km)?;

    let mut ranked: Vec<RankedFacility> = candidates
        .into_iter()
        .map(|facility| {
            let distance_km = distance_km(origin, facility.coordinate);
            RankedFacility {
                facility,
                distance_km,
            }
        })
        .filter(|ranked| ranked.distance_km <= radius_km)
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::debug!(
        origin = %origin,
        radius_km,
        matched = ranked.len(),
        "ranked nearby facilities"
    );

    Ok(ranked)
}

/// Like [`rank_nearby`] but takes the origin as raw degrees.
///
/// # Errors
///
/// Returns `CoreError::InvalidCoordinate` for a bad origin and `CoreError::InvalidRadius`
/// for a bad radius. The origin is checked first.
pub fn rank_nearby_raw(
    latitude: f64,
    longitude: f64,
    candidates: impl IntoIterator<Item = Facility>,
    radius_km: f64,
) -> CoreResult<Vec<RankedFacility>> {
    let origin = Coordinate::new(latitude, longitude)?;
    rank_nearby(origin, candidates, radius_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    fn facility(id: &str, lat: f64, lon: f64) -> Facility {
        Facility::new(id, format!("Hospital {id}"), "Address not available", coord(lat, lon))
    }

    fn ids(ranked: &[RankedFacility]) -> Vec<&str> {
        ranked.iter().map(|r| r.facility.id.as_str()).collect()
    }

    fn sample_candidates() -> Vec<Facility> {
        vec![
            facility("far", 0.0, 0.3),
            facility("near", 0.0, 0.01),
            facility("mid", 0.05, 0.05),
            facility("north", 0.2, 0.0),
            facility("antipode", 0.0, 180.0),
        ]
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        assert_eq!(distance_km(coord(0.0, 0.0), coord(0.0, 1.0)), 111.19);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = [
            coord(18.5204, 73.8567),
            coord(51.5074, -0.1278),
            coord(-33.8688, 151.2093),
            coord(90.0, 0.0),
            coord(-90.0, 179.9),
        ];
        for a in points {
            for b in points {
                assert_eq!(haversine_km(a, b), haversine_km(b, a));
                assert_eq!(distance_km(a, b), distance_km(b, a));
            }
        }
    }

    #[test]
    fn test_empty_candidates_give_empty_result() {
        let ranked = rank_nearby(coord(10.0, 10.0), Vec::new(), 5.0).expect("valid input");
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_coincident_facility_has_zero_distance() {
        let origin = coord(18.5204, 73.8567);
        for radius in [0.001, 1.0, 500.0] {
            let ranked =
                rank_nearby(origin, vec![facility("here", 18.5204, 73.8567)], radius).unwrap();
            assert_eq!(ranked.len(), 1);
            assert_eq!(ranked[0].distance_km, 0.0);
        }
    }

    #[test]
    fn test_results_are_sorted_ascending() {
        let ranked = rank_nearby(coord(0.0, 0.0), sample_candidates(), 100.0).unwrap();
        assert_eq!(ids(&ranked), vec!["near", "mid", "north", "far"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_smaller_radius_result_is_subset_of_larger() {
        let origin = coord(0.0, 0.0);
        let radii = [1.0, 5.0, 10.0, 25.0, 40.0, 20_000.0];
        for window in radii.windows(2) {
            let small = rank_nearby(origin, sample_candidates(), window[0]).unwrap();
            let large = rank_nearby(origin, sample_candidates(), window[1]).unwrap();
            let large_ids = ids(&large);
            for id in ids(&small) {
                assert!(large_ids.contains(&id), "{id} missing at radius {}", window[1]);
            }
        }
    }

    #[test]
    fn test_facility_exactly_on_radius_is_included() {
        let origin = coord(0.0, 0.0);
        let edge = facility("edge", 0.0, 0.3);
        let radius = distance_km(origin, edge.coordinate);

        let ranked = rank_nearby(origin, vec![edge.clone()], radius).unwrap();
        assert_eq!(ids(&ranked), vec!["edge"]);

        let ranked = rank_nearby(origin, vec![edge], radius - 0.01).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_equidistant_facilities_keep_input_order() {
        let origin = coord(0.0, 0.0);
        let candidates = vec![
            facility("east", 0.0, 0.1),
            facility("west", 0.0, -0.1),
            facility("east-again", 0.0, 0.1),
        ];
        let ranked = rank_nearby(origin, candidates, 50.0).unwrap();
        assert_eq!(ids(&ranked), vec!["east", "west", "east-again"]);
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let err = rank_nearby_raw(91.0, 0.0, sample_candidates(), 5.0).expect_err("lat 91");
        assert!(matches!(err, CoreError::InvalidCoordinate { .. }));

        let err = rank_nearby_raw(0.0, f64::NAN, sample_candidates(), 5.0).expect_err("NaN");
        assert!(matches!(err, CoreError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_invalid_radius_is_rejected() {
        for radius in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = rank_nearby(coord(0.0, 0.0), sample_candidates(), radius)
                .expect_err("bad radius");
            assert!(matches!(err, CoreError::InvalidRadius(_)));
        }
    }

    #[test]
    fn test_coordinate_deserialises_with_validation() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude":12.5,"longitude":-45.0}"#)
            .expect("valid coordinate");
        assert_eq!(ok.latitude(), 12.5);

        let err = serde_json::from_str::<Coordinate>(r#"{"latitude":12.5,"longitude":-181.0}"#);
        assert!(err.is_err());
    }
}
