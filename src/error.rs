use thiserror::Error;

/// Errors surfaced by the normalization and encoding pipeline.
///
/// None of these are retried. The HTTP layer turns them into the adapter's
/// error envelope.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Required fields are missing or invalid in an upstream event.
    #[error("Malformed upstream data: {0}")]
    MalformedUpstreamData(String),

    /// Sport id not present in the classification table.
    #[error("Unsupported sport id: {0}")]
    UnsupportedSport(u32),

    /// A record value does not fit the consumer contract's field type.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Request parameters could not be interpreted.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider could not be reached or returned an unusable response.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl AdapterError {
    /// Short error name used in the response envelope.
    pub fn name(&self) -> &'static str {
        match self {
            AdapterError::MalformedUpstreamData(_) => "MalformedUpstreamData",
            AdapterError::UnsupportedSport(_) => "UnsupportedSport",
            AdapterError::Encoding(_) => "EncodingError",
            AdapterError::InvalidRequest(_) => "InvalidRequest",
            AdapterError::Provider(_) => "ProviderError",
        }
    }

    pub(crate) fn malformed(event_id: &str, what: &str) -> Self {
        AdapterError::MalformedUpstreamData(format!("event '{}': {}", event_id, what))
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
