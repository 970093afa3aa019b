//! Upstream provider configuration.
//!
//! Values are resolved once at startup by the binaries and passed in; nothing here reads the
//! process environment directly.

use crate::google::GooglePlacesProvider;
use crate::overpass::{OverpassProvider, DEFAULT_OVERPASS_ENDPOINTS};
use crate::{FacilityProvider, NearbyAggregator, ProviderResult};
use carefinder_core::CoreError;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    overpass_endpoints: Vec<String>,
    google_api_key: Option<String>,
    timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            overpass_endpoints: default_endpoints(),
            google_api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    pub fn new(
        overpass_endpoints: Vec<String>,
        google_api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            overpass_endpoints,
            google_api_key,
            timeout,
        }
    }

    pub fn overpass_endpoints(&self) -> &[String] {
        &self.overpass_endpoints
    }

    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the shared HTTP client.
    pub fn build_client(&self) -> ProviderResult<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("carefinder/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }

    /// Google Places first when a key is configured, then Overpass.
    pub fn build_aggregator(&self) -> ProviderResult<NearbyAggregator> {
        let client = self.build_client()?;
        let mut providers: Vec<Box<dyn FacilityProvider>> = Vec::new();

        if let Some(key) = &self.google_api_key {
            providers.push(Box::new(GooglePlacesProvider::new(client.clone(), key.clone())));
        }
        if !self.overpass_endpoints.is_empty() {
            providers.push(Box::new(OverpassProvider::new(
                client,
                self.overpass_endpoints.clone(),
            )));
        }

        let aggregator = NearbyAggregator::new(providers);
        tracing::info!(providers = ?aggregator.provider_names(), "nearby aggregator ready");
        Ok(aggregator)
    }
}

fn default_endpoints() -> Vec<String> {
    DEFAULT_OVERPASS_ENDPOINTS
        .iter()
        .map(|endpoint| endpoint.to_string())
        .collect()
}

/// Parses a comma-separated endpoint list, falling back to the public Overpass instances.
pub fn endpoints_from_env_value(value: Option<String>) -> Vec<String> {
    let endpoints: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if endpoints.is_empty() {
        default_endpoints()
    } else {
        endpoints
    }
}

/// A blank key is treated as unset.
pub fn api_key_from_env_value(value: Option<String>) -> Option<String> {
    value
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Parses a request timeout in whole seconds.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` (wrapped) for non-numeric or zero values.
pub fn timeout_from_env_value(value: Option<String>) -> ProviderResult<Duration> {
    let Some(raw) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(CoreError::InvalidInput(format!("invalid provider timeout: {raw}")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderError;

    #[test]
    fn test_endpoints_default_when_unset_or_blank() {
        assert_eq!(endpoints_from_env_value(None).len(), 3);
        assert_eq!(endpoints_from_env_value(Some(" , ".into())).len(), 3);
    }

    #[test]
    fn test_endpoints_are_split_and_trimmed() {
        let endpoints =
            endpoints_from_env_value(Some("https://a.example/api , https://b.example/api".into()));
        assert_eq!(endpoints, vec!["https://a.example/api", "https://b.example/api"]);
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        assert_eq!(api_key_from_env_value(Some("  ".into())), None);
        assert_eq!(api_key_from_env_value(Some(" k ".into())), Some("k".to_string()));
        assert_eq!(api_key_from_env_value(None), None);
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(timeout_from_env_value(None).unwrap(), Duration::from_secs(10));
        assert_eq!(timeout_from_env_value(Some("3".into())).unwrap(), Duration::from_secs(3));
        assert!(matches!(
            timeout_from_env_value(Some("0".into())),
            Err(ProviderError::Core(CoreError::InvalidInput(_)))
        ));
        assert!(timeout_from_env_value(Some("soon".into())).is_err());
    }

    #[test]
    fn test_aggregator_orders_google_before_overpass() {
        let cfg = ProviderConfig::new(
            default_endpoints(),
            Some("key".into()),
            Duration::from_secs(1),
        );
        let aggregator = cfg.build_aggregator().unwrap();
        assert_eq!(aggregator.provider_names(), vec!["google", "overpass"]);

        let aggregator = ProviderConfig::default().build_aggregator().unwrap();
        assert_eq!(aggregator.provider_names(), vec!["overpass"]);
    }
}
