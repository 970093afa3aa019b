//! Ordered fallback across upstream providers.

use crate::provider::radius_to_metres;
use crate::{FacilityProvider, ProviderError, ProviderResult};
use carefinder_core::validation::validate_radius;
use carefinder_core::{rank_nearby, Coordinate, RankedFacility};
use serde::Serialize;

/// `source` reported when no provider had anything within the radius.
pub const NO_SOURCE: &str = "none";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedNearby {
    pub source: String,
    pub facilities: Vec<RankedFacility>,
}

/// Queries providers in order and ranks the first non-empty answer.
pub struct NearbyAggregator {
    providers: Vec<Box<dyn FacilityProvider>>,
}

impl NearbyAggregator {
    pub fn new(providers: Vec<Box<dyn FacilityProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Finds facilities within `radius_km` of `origin`.
    ///
    /// A provider whose answer has nothing inside the radius counts as empty and the next
    /// provider is asked.
    ///
    /// # Errors
    ///
    /// `Core(InvalidRadius)` before any request is made, `NoProviders` for an empty list, or
    /// the last provider error when every provider failed. If at least one provider answered,
    /// an empty result with source `none` is returned instead.
    pub async fn find_nearby(
        &self,
        origin: Coordinate,
        radius_km: f64,
    ) -> ProviderResult<AggregatedNearby> {
        validate_radius(radius_km)?;
        if self.providers.is_empty() {
            return Err(ProviderError::NoProviders);
        }

        let radius_m = radius_to_metres(radius_km);
        let mut last_error = None;
        let mut answered = false;

        for provider in &self.providers {
            match provider.fetch(origin, radius_m).await {
                Ok(candidates) => {
                    answered = true;
                    let facilities = rank_nearby(origin, candidates, radius_km)?;
                    if facilities.is_empty() {
                        tracing::info!(
                            provider = provider.name(),
                            "provider returned no facilities in range"
                        );
                        continue;
                    }
                    tracing::info!(
                        provider = provider.name(),
                        count = facilities.len(),
                        "nearby facilities resolved"
                    );
                    return Ok(AggregatedNearby {
                        source: provider.name().to_string(),
                        facilities,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %err,
                        "provider failed, trying next"
                    );
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if !answered => Err(err),
            _ => Ok(AggregatedNearby {
                source: NO_SOURCE.to_string(),
                facilities: Vec::new(),
            }),
        }
    }
}
