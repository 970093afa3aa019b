//! Request and response bodies for the REST API.
//!
//! JSON field names are camelCase throughout.

use carefinder_core::services::{MedicalService, ServiceCategory};
use carefinder_core::{Coordinate, Hospital, RankedFacility};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
    /// Individual field problems, present for validation failures only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HospitalListRes {
    pub count: usize,
    pub data: Vec<Hospital>,
}

impl From<Vec<Hospital>> for HospitalListRes {
    fn from(data: Vec<Hospital>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisterHospitalRes {
    pub message: String,
    pub data: Hospital,
}

/// Body for switching a registered hospital on or off for nearby searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SetActiveReq {
    pub active: bool,
}

/// Nearby search against the hospital registry.
///
/// `radius` is in kilometres; the server default applies when it is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearbyReq {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRes {
    pub count: usize,
    pub data: Vec<RankedFacility>,
    pub user_location: Coordinate,
    /// Radius actually applied, in kilometres.
    pub radius: f64,
}

/// Query string for the upstream-backed facility search.
#[derive(Debug, Clone, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacilitiesNearbyQuery {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Search radius in kilometres.
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacilitiesNearbyRes {
    /// Provider that answered, or `none`.
    pub source: String,
    pub count: usize,
    pub data: Vec<RankedFacility>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceRes {
    pub id: String,
    pub name: String,
    /// One of `basic`, `moderate`, `serious`, `critical`.
    pub level: String,
}

impl From<&MedicalService> for ServiceRes {
    fn from(service: &MedicalService) -> Self {
        Self {
            id: service.id.to_string(),
            name: service.name.to_string(),
            level: service.level.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceCategoryRes {
    pub category: String,
    pub services: Vec<ServiceRes>,
}

impl From<&ServiceCategory> for ServiceCategoryRes {
    fn from(category: &ServiceCategory) -> Self {
        Self {
            category: category.category.to_string(),
            services: category.services.iter().map(ServiceRes::from).collect(),
        }
    }
}
