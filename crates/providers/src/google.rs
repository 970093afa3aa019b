//! Google Places Nearby Search.

use crate::provider::read_json;
use crate::{FacilityProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use carefinder_core::constants::ADDRESS_UNAVAILABLE;
use carefinder_core::{Coordinate, Facility, OpenStatus};
use serde::Deserialize;

const PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

const PROVIDER_NAME: &str = "google";

#[derive(Debug, Deserialize)]
pub(crate) struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    place_id: Option<String>,
    name: Option<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    opening_hours: Option<PlaceHours>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PlaceHours {
    open_now: Option<bool>,
}

pub struct GooglePlacesProvider {
    client: reqwest::Client,
    api_key: String,
}

impl GooglePlacesProvider {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl FacilityProvider for GooglePlacesProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(&self, origin: Coordinate, radius_m: u32) -> ProviderResult<Vec<Facility>> {
        let location = format!("{},{}", origin.latitude(), origin.longitude());
        let radius = radius_m.to_string();

        let response = self
            .client
            .get(PLACES_URL)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", "hospital"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: PlacesResponse = read_json(PROVIDER_NAME, response).await?;
        normalise_response(body)
    }
}

/// Accepts `OK` and `ZERO_RESULTS`; any other Places status is an API error.
pub(crate) fn normalise_response(response: PlacesResponse) -> ProviderResult<Vec<Facility>> {
    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        other => {
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME.to_string(),
                status: other.to_string(),
            })
        }
    }

    Ok(response
        .results
        .into_iter()
        .filter_map(normalise_place)
        .collect())
}

fn normalise_place(place: Place) -> Option<Facility> {
    let location = place.geometry?.location;
    let coordinate = match Coordinate::new(location.lat, location.lng) {
        Ok(coordinate) => coordinate,
        Err(err) => {
            tracing::debug!(place_id = ?place.place_id, error = %err, "skipping place");
            return None;
        }
    };

    let id = place
        .place_id
        .unwrap_or_else(|| format!("place-{coordinate}"));
    let name = place.name.unwrap_or_else(|| "Hospital".to_string());
    let address = place
        .vicinity
        .or(place.formatted_address)
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string());

    let mut facility = Facility::new(id, name, address, coordinate);
    facility.open_status = OpenStatus::from(place.opening_hours.and_then(|h| h.open_now));
    facility.rating = place.rating;
    facility.rating_count = place.user_ratings_total.unwrap_or(0);
    facility.emergency = true;
    facility.tags = place.types;

    Some(facility)
}
