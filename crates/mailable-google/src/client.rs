//! HTTP client for the Google Maps Platform geocoding and address-validation
//! endpoints.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization. Both endpoint URLs can be overridden to point at a mock
//! server in tests.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GoogleApiError;
use crate::request::ValidationRequest;
use crate::types::{GeocodeResponse, GeocodeResult, ValidationResponse};

const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_VALIDATION_URL: &str = "https://addressvalidation.googleapis.com/v1:validateAddress";

/// Geocoding statuses that do not indicate an API-level failure. Anything
/// else (REQUEST_DENIED, OVER_QUERY_LIMIT, INVALID_REQUEST, ...) is an error.
const GEOCODE_OK_STATUSES: [&str; 2] = ["OK", "ZERO_RESULTS"];

/// Client for the two Google Maps Platform endpoints the verification
/// pipeline needs.
///
/// Use [`GoogleMapsClient::new`] for production or
/// [`GoogleMapsClient::with_base_urls`] to point at mock servers in tests.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    geocode_base_url: Url,
    validation_base_url: Url,
}

impl GoogleMapsClient {
    /// Creates a new client pointed at the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GoogleApiError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            user_agent,
            DEFAULT_GEOCODE_URL,
            DEFAULT_VALIDATION_URL,
        )
    }

    /// Creates a new client with custom endpoint URLs (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GoogleApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GoogleApiError::ApiError`] if either URL
    /// does not parse.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        geocode_base_url: &str,
        validation_base_url: &str,
    ) -> Result<Self, GoogleApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parse = |raw: &str| {
            Url::parse(raw)
                .map_err(|e| GoogleApiError::ApiError(format!("invalid base URL '{raw}': {e}")))
        };

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            geocode_base_url: parse(geocode_base_url)?,
            validation_base_url: parse(validation_base_url)?,
        })
    }

    /// Geocodes a free-text address and returns the first match.
    ///
    /// # Errors
    ///
    /// - [`GoogleApiError::NoResults`] when the geocoder finds no match.
    /// - [`GoogleApiError::ApiError`] when the API reports an error status.
    /// - [`GoogleApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GoogleApiError::Deserialize`] if the body is not the expected
    ///   shape.
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResult, GoogleApiError> {
        let url = self.geocode_request_url(address);
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let decoded: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GoogleApiError::Deserialize {
                context: format!("geocode({address})"),
                source: e,
            })?;

        if !decoded.status.is_empty() && !GEOCODE_OK_STATUSES.contains(&decoded.status.as_str()) {
            let message = decoded.error_message.unwrap_or(decoded.status);
            return Err(GoogleApiError::ApiError(message));
        }

        let Some(first) = decoded.results.into_iter().next() else {
            tracing::warn!(address, "geocoder returned no results");
            return Err(GoogleApiError::NoResults {
                address: address.to_owned(),
            });
        };
        Ok(first)
    }

    /// Submits a structured address for validation and returns the decoded
    /// response.
    ///
    /// # Errors
    ///
    /// - [`GoogleApiError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GoogleApiError::Deserialize`] if the body is not the expected
    ///   shape.
    pub async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResponse, GoogleApiError> {
        let url = self.validation_request_url();
        let response = self.client.post(url).json(request).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GoogleApiError::Deserialize {
            context: "validateAddress".to_owned(),
            source: e,
        })
    }

    /// Builds the geocoding URL with properly percent-encoded query
    /// parameters.
    fn geocode_request_url(&self, address: &str) -> Url {
        let mut url = self.geocode_base_url.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    /// Builds the validation URL; the API key travels as a query parameter,
    /// the address as the POST body.
    fn validation_request_url(&self) -> Url {
        let mut url = self.validation_base_url.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GoogleMapsClient {
        GoogleMapsClient::with_base_urls(
            "test-key",
            30,
            "mailable-test",
            DEFAULT_GEOCODE_URL,
            DEFAULT_VALIDATION_URL,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn geocode_url_carries_address_and_key() {
        let url = test_client().geocode_request_url("1 Main St");
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=1+Main+St&key=test-key"
        );
    }

    #[test]
    fn geocode_url_encodes_special_characters() {
        let url = test_client().geocode_request_url("5 Rue & Co, Paris");
        assert!(
            url.as_str().contains("5+Rue+%26+Co%2C+Paris")
                || url.as_str().contains("5%20Rue%20%26%20Co%2C%20Paris"),
            "address should be percent-encoded: {url}"
        );
    }

    #[test]
    fn validation_url_keeps_path_and_appends_key() {
        let url = test_client().validation_request_url();
        assert_eq!(
            url.as_str(),
            "https://addressvalidation.googleapis.com/v1:validateAddress?key=test-key"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GoogleMapsClient::with_base_urls(
            "test-key",
            30,
            "mailable-test",
            "not a url",
            DEFAULT_VALIDATION_URL,
        );
        assert!(matches!(result, Err(GoogleApiError::ApiError(_))));
    }
}
