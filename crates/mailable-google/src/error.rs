use thiserror::Error;

/// Errors returned by the Google Maps Platform client.
#[derive(Debug, Error)]
pub enum GoogleApiError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// non-2xx response statuses.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status and a message.
    #[error("Google API error: {0}")]
    ApiError(String),

    /// The geocoder found no match for the input address. Raised before any
    /// validation call is attempted.
    #[error("no geocoding results for address: {address}")]
    NoResults { address: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
