//! Per-address verification pipeline shared by the batch and single-address
//! commands: geocode, build the validation request, validate, classify.

use mailable_core::AppConfig;
use mailable_google::{
    build_validation_request, classify_outcome, AddressVerdict, GoogleMapsClient,
};

/// Builds the Google Maps client from application config.
///
/// # Errors
///
/// Fails when no API key is configured or the HTTP client cannot be built.
pub(crate) fn build_google_client(config: &AppConfig) -> anyhow::Result<GoogleMapsClient> {
    let api_key = config.google_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("GOOGLE_MAPS_API_KEY is not set; export it or add it to .env")
    })?;
    let client = GoogleMapsClient::with_base_urls(
        api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.geocode_base_url,
        &config.validation_base_url,
    )?;
    Ok(client)
}

/// Verifies one address end to end. Every upstream failure degrades to an
/// error-path verdict, so the caller always gets exactly one record back
/// and decides for itself whether to keep going.
pub(crate) async fn verify_one(
    client: &GoogleMapsClient,
    address: &str,
    region_code: &str,
    enable_usps_cass: bool,
) -> AddressVerdict {
    let geocoded = match client.geocode(address).await {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(address, error = %err, "geocoding failed");
            return AddressVerdict::from_api_failure(address, &err);
        }
    };

    let request = build_validation_request(&geocoded, address, enable_usps_cass);
    let outcome = client.validate(&request).await;
    if let Err(err) = &outcome {
        tracing::warn!(address, error = %err, "validation call failed");
    }
    classify_outcome(&outcome, address, region_code, enable_usps_cass)
}
