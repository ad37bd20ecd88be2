//! Google Maps Platform response types.
//!
//! Geocoding API payloads use snake_case keys; Address Validation API
//! payloads use camelCase. Every field that can be absent on the wire is
//! optional or defaulted, so partial payloads still decode and the
//! classifier never has to guard against missing keys itself.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Geocoding API
// ---------------------------------------------------------------------------

/// Top-level envelope for a Geocoding API response.
///
/// `status` is `"OK"` on success, `"ZERO_RESULTS"` when nothing matched,
/// and an error code (with `error_message`) otherwise.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// A single geocoder match: the canonical formatted string plus its
/// structured components.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub address_components: Vec<AddressComponent>,
}

/// One structured component of a geocoded address (street number, city,
/// state, country, ...), tagged with the component types it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

// ---------------------------------------------------------------------------
// Address Validation API
// ---------------------------------------------------------------------------

/// Top-level envelope for an Address Validation API response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationResponse {
    pub result: Option<ValidationResult>,
}

/// The validation payload: verdict, standardized address, coordinates, and
/// US-only USPS data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationResult {
    pub verdict: Option<Verdict>,
    pub address: Option<ValidatedAddress>,
    pub geocode: Option<GeocodeInfo>,
    pub usps_data: Option<UspsData>,
    pub metadata: Option<AddressMetadata>,
}

/// The validator's judgement of how well the input resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Verdict {
    pub validation_granularity: Granularity,
    pub address_complete: bool,
    pub has_inferred_components: bool,
    pub has_replaced_components: bool,
    pub unconfirmed_component_types: Vec<String>,
    pub missing_component_types: Vec<String>,
    pub unresolved_tokens: Vec<String>,
}

/// Precision level to which the validator matched an address.
///
/// `Unknown` doubles as the catch-all for absent values and for codes this
/// enum does not model, so new granularities introduced by the API degrade
/// to the non-mailable row instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    SubPremise,
    Premise,
    Street,
    Locality,
    Region,
    Country,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

/// The standardized address echoed back by the validator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatedAddress {
    pub formatted_address: Option<String>,
}

/// Geocoding data attached to the validation result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeInfo {
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// USPS delivery-point data. Only populated for US addresses.
#[allow(clippy::struct_excessive_bools)] // mirrors the wire schema
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UspsData {
    /// DPV confirmation code: `Y`, `N`, `D`, `S`, `C`, or `B`.
    pub dpv_confirmation: Option<String>,
    pub dpv_vacant: bool,
    pub dpv_no_stat: bool,
    pub dpv_cmra: bool,
    pub undeliverable: bool,
}

/// Address-level metadata from the validator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressMetadata {
    pub po_box: bool,
}
