//! Facility records exchanged between upstream sources, the registry and the ranker.
//!
//! A `Facility` is built fresh for every query and dropped once the response is sent;
//! nothing in this module is persisted.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

/// Whether a facility is currently open.
///
/// On the wire this is the tri-state JSON value `true` / `false` / `null`, which is what the
/// upstream map sources expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum OpenStatus {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl From<Option<bool>> for OpenStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => OpenStatus::Open,
            Some(false) => OpenStatus::Closed,
            None => OpenStatus::Unknown,
        }
    }
}

impl From<OpenStatus> for Option<bool> {
    fn from(value: OpenStatus) -> Self {
        match value {
            OpenStatus::Open => Some(true),
            OpenStatus::Closed => Some(false),
            OpenStatus::Unknown => None,
        }
    }
}

/// A candidate healthcare location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Unique within a single result set only.
    pub id: String,
    pub name: String,
    /// Free text; `Address not available` when the source has nothing usable.
    pub address: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(rename = "isOpen", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<bool>))]
    pub open_status: OpenStatus,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub emergency: bool,
    /// Facility tags such as `Emergency Services` or `Pharmacy`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Facility {
    /// Creates a facility with every optional attribute unset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            coordinate,
            open_status: OpenStatus::Unknown,
            rating: None,
            rating_count: 0,
            phone: None,
            website: None,
            opening_hours: None,
            emergency: false,
            tags: Vec::new(),
        }
    }
}

/// A facility with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: Facility,
    pub distance_km: f64,
}
