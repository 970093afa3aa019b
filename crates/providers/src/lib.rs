//! # Carefinder Providers
//!
//! Upstream map-data sources for the nearby-hospital search. Each provider normalises its
//! upstream payload into [`carefinder_core::Facility`] values; [`NearbyAggregator`] asks them
//! in order and ranks the first useful answer with the core ranker.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod google;
pub mod overpass;
pub mod provider;

pub use aggregator::{AggregatedNearby, NearbyAggregator};
pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
pub use google::GooglePlacesProvider;
pub use overpass::OverpassProvider;
pub use provider::FacilityProvider;
