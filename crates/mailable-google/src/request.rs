//! Construction of Address Validation API requests from geocoder output.

use serde::Serialize;

use crate::types::GeocodeResult;
use crate::US_REGION_CODE;

/// Component types whose long name is kept as a salient address line.
const POI_TYPES: [&str; 3] = ["point_of_interest", "establishment", "university"];

/// Body of a `validateAddress` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub address: RequestAddress,
    pub enable_usps_cass: bool,
}

/// The structured postal address submitted for validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAddress {
    pub address_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    pub region_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Builds a validation request from a geocoder match and the user's
/// original free-text input. Pure transformation, no I/O.
///
/// Each address component is filed under the first category its type tags
/// match, and at most once: point-of-interest name, locality,
/// administrative area (short form), country (short form, becomes the
/// region code), or postal code.
///
/// `address_lines` keeps salient names ahead of the canonical string
/// without ever duplicating an entry: point-of-interest names in encounter
/// order, then the original input, then the geocoder's formatted address.
#[must_use]
pub fn build_validation_request(
    geocoded: &GeocodeResult,
    original_input: &str,
    enable_usps_cass: bool,
) -> ValidationRequest {
    let mut poi_names: Vec<String> = Vec::new();
    let mut locality = None;
    let mut administrative_area = None;
    let mut region_code = None;
    let mut postal_code = None;

    for component in &geocoded.address_components {
        let has = |wanted: &str| component.types.iter().any(|t| t == wanted);
        if POI_TYPES.iter().any(|t| has(t)) {
            if !poi_names.contains(&component.long_name) {
                poi_names.push(component.long_name.clone());
            }
        } else if has("locality") {
            locality = Some(component.long_name.clone());
        } else if has("administrative_area_level_1") {
            administrative_area = Some(component.short_name.clone());
        } else if has("country") {
            region_code = Some(component.short_name.clone());
        } else if has("postal_code") {
            postal_code = Some(component.long_name.clone());
        }
    }

    let mut address_lines = poi_names;
    if !address_lines.iter().any(|line| line == original_input) {
        address_lines.push(original_input.to_string());
    }
    let formatted = geocoded.formatted_address.as_str();
    if !formatted.is_empty() && !address_lines.iter().any(|line| line == formatted) {
        address_lines.push(formatted.to_string());
    }

    ValidationRequest {
        address: RequestAddress {
            address_lines,
            locality,
            administrative_area,
            region_code: region_code.unwrap_or_else(|| US_REGION_CODE.to_string()),
            postal_code,
        },
        enable_usps_cass,
    }
}
