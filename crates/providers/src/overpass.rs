//! OpenStreetMap hospitals via the Overpass API.
//!
//! Public Overpass instances are frequently overloaded, so the provider holds a list of
//! endpoints and tries each once, in order, until one answers.

use crate::provider::read_json;
use crate::{FacilityProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use carefinder_core::constants::{ADDRESS_UNAVAILABLE, TAG_EMERGENCY};
use carefinder_core::{Coordinate, Facility, OpenStatus};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const DEFAULT_OVERPASS_ENDPOINTS: &[&str] = &[
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.openstreetmap.ru/api/interpreter",
];

const PROVIDER_NAME: &str = "overpass";

#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type", default)]
    kind: String,
    id: Option<u64>,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

pub struct OverpassProvider {
    client: reqwest::Client,
    endpoints: Vec<String>,
}

impl OverpassProvider {
    pub fn new(client: reqwest::Client, endpoints: Vec<String>) -> Self {
        Self { client, endpoints }
    }

    async fn query_endpoint(
        &self,
        endpoint: &str,
        query: &str,
    ) -> ProviderResult<OverpassResponse> {
        let response = self
            .client
            .get(endpoint)
            .query(&[("data", query)])
            .send()
            .await?;

        read_json(PROVIDER_NAME, response).await
    }
}

#[async_trait]
impl FacilityProvider for OverpassProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(&self, origin: Coordinate, radius_m: u32) -> ProviderResult<Vec<Facility>> {
        let query = build_query(origin, radius_m);
        let mut last_error = None;

        for endpoint in &self.endpoints {
            match self.query_endpoint(endpoint, &query).await {
                Ok(response) => {
                    tracing::debug!(
                        endpoint = %endpoint,
                        elements = response.elements.len(),
                        "overpass answered"
                    );
                    return Ok(normalise_response(response));
                }
                Err(err) => {
                    tracing::warn!(endpoint = %endpoint, error = %err, "overpass endpoint failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or(ProviderError::NoProviders))
    }
}

/// Overpass QL for hospital nodes, ways and relations within `radius_m` of `origin`.
///
/// `out center` makes ways and relations carry a representative point.
pub fn build_query(origin: Coordinate, radius_m: u32) -> String {
    let around = format!(
        "(around:{radius_m},{},{})",
        origin.latitude(),
        origin.longitude()
    );
    let statements: String = ["node", "way", "relation"]
        .iter()
        .map(|kind| format!("{kind}[\"amenity\"=\"hospital\"]{around};"))
        .collect();
    format!("[out:json][timeout:25];({statements});out center;")
}

pub(crate) fn normalise_response(response: OverpassResponse) -> Vec<Facility> {
    response
        .elements
        .into_iter()
        .filter_map(normalise_element)
        .collect()
}

fn normalise_element(element: OverpassElement) -> Option<Facility> {
    let tags = &element.tags;
    let name = tag(tags, "name").or_else(|| tag(tags, "name:en"))?;

    let latitude = element.lat.or(element.center.as_ref().map(|c| c.lat))?;
    let longitude = element.lon.or(element.center.as_ref().map(|c| c.lon))?;
    let coordinate = match Coordinate::new(latitude, longitude) {
        Ok(coordinate) => coordinate,
        Err(err) => {
            tracing::debug!(osm_id = ?element.id, error = %err, "skipping overpass element");
            return None;
        }
    };

    // OSM numbers nodes, ways and relations separately, so the bare number is not unique.
    let id = match element.id {
        Some(id) => format!("{}/{id}", element.kind),
        None => format!("osm-{}-{coordinate}", element.kind),
    };

    let mut facility = Facility::new(id, name, format_address(tags), coordinate);
    facility.open_status = open_status(tags);
    facility.phone = tag(tags, "phone").or_else(|| tag(tags, "contact:phone")).map(str::to_string);
    facility.website = tag(tags, "website")
        .or_else(|| tag(tags, "contact:website"))
        .map(str::to_string);
    facility.emergency = tag(tags, "emergency").map_or(true, |value| value != "no");
    facility.tags = facility_tags(tags);
    facility.opening_hours = tag(tags, "opening_hours").map(|hours| match hours {
        "24/7" => "24 Hours".to_string(),
        other => other.to_string(),
    });

    Some(facility)
}

/// Non-empty tag value.
fn tag<'a>(tags: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    tags.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn format_address(tags: &BTreeMap<String, String>) -> String {
    let parts: Vec<&str> = [
        "addr:housenumber",
        "addr:street",
        "addr:city",
        "addr:state",
        "addr:postcode",
    ]
    .iter()
    .filter_map(|key| tag(tags, key))
    .collect();

    if !parts.is_empty() {
        return parts.join(", ");
    }
    tag(tags, "address").unwrap_or(ADDRESS_UNAVAILABLE).to_string()
}

fn open_status(tags: &BTreeMap<String, String>) -> OpenStatus {
    match tag(tags, "opening_hours") {
        Some("24/7") => return OpenStatus::Open,
        Some("closed") => return OpenStatus::Closed,
        _ => {}
    }
    if tag(tags, "opening_hours:covid19") == Some("closed") {
        return OpenStatus::Closed;
    }
    match tag(tags, "emergency") {
        Some(value) if value != "no" => OpenStatus::Open,
        _ => OpenStatus::Unknown,
    }
}

fn facility_tags(tags: &BTreeMap<String, String>) -> Vec<String> {
    let mut out = Vec::new();

    if matches!(tag(tags, "emergency"), Some(value) if value != "no") {
        out.push(TAG_EMERGENCY.to_string());
    }

    if let Some(specialities) = tag(tags, "healthcare:speciality") {
        out.extend(
            specialities
                .split(';')
                .map(|s| s.trim().replace('_', " "))
                .filter(|s| !s.is_empty()),
        );
    }

    if tag(tags, "wheelchair") == Some("yes") {
        out.push("Wheelchair Accessible".to_string());
    }
    if tag(tags, "parking").is_some() {
        out.push("Parking Available".to_string());
    }
    if tag(tags, "wifi") == Some("yes") {
        out.push("Free WiFi".to_string());
    }
    if tag(tags, "amenity:pharmacy") == Some("yes") || tag(tags, "pharmacy") == Some("yes") {
        out.push("Pharmacy".to_string());
    }

    out
}
