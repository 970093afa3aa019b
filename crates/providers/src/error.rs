use carefinder_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} returned HTTP {status}")]
    Status { provider: String, status: u16 },
    #[error("{provider} rejected the request with status {status}")]
    Api { provider: String, status: String },
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
    #[error("no upstream providers configured")]
    NoProviders,
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
