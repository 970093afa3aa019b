use crate::{ProviderError, ProviderResult};
use async_trait::async_trait;
use carefinder_core::{Coordinate, Facility};
use serde::de::DeserializeOwned;

/// An upstream source of healthcare facilities around a point.
///
/// Implementations normalise whatever the upstream returns into [`Facility`] values. They do
/// not filter by distance or sort; the aggregator ranks the winning result.
#[async_trait]
pub trait FacilityProvider: Send + Sync {
    /// Short label reported back to callers as the result `source`.
    fn name(&self) -> &str;

    async fn fetch(&self, origin: Coordinate, radius_m: u32) -> ProviderResult<Vec<Facility>>;
}

/// Converts a radius in kilometres to whole metres for upstream query parameters.
pub fn radius_to_metres(radius_km: f64) -> u32 {
    (radius_km * 1000.0).round().clamp(0.0, u32::MAX as f64) as u32
}

/// Checks the HTTP status and decodes a JSON body.
///
/// Overloaded upstreams often answer with an HTML error page; that surfaces as
/// `InvalidResponse` rather than a transport error.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &str,
    response: reqwest::Response,
) -> ProviderResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ProviderError::InvalidResponse(format!("{provider}: {e}")))
}
