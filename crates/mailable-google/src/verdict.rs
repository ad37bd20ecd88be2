//! Classification of Address Validation API responses into mailability
//! verdicts.
//!
//! [`classify`] is pure and total: the typed optional-field decode in
//! [`crate::types`] absorbs every malformed-payload hazard before the logic
//! here runs, so a batch caller gets exactly one [`AddressVerdict`] per
//! address no matter what came back off the wire. Client failures map onto
//! the two error paths ([`AddressVerdict::api_error`],
//! [`AddressVerdict::parse_error`]) instead of aborting the batch.

use serde::Serialize;

use crate::error::GoogleApiError;
use crate::types::{Granularity, ValidationResponse};
use crate::US_REGION_CODE;

/// Appended to the status text when components were inferred at a mailable
/// granularity.
const INFERRED_NOTE: &str = " — Note: Some components were inferred.";

/// Sentinel standing in for an absent `dpvConfirmation`. Deliberately not a
/// key of the description table, so missing USPS data reads as an unknown
/// code.
const DPV_ABSENT: &str = "N/A";

/// Mailability verdict for a single input address.
///
/// Exactly one is produced per address, including for upstream failures,
/// and `validation_status` is never empty.
#[allow(clippy::struct_excessive_bools)] // one flag column each in the output table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressVerdict {
    pub original_address: String,
    /// The validator's standardized address, or the original input when the
    /// response carried none.
    pub validated_address: String,
    pub is_valid: bool,
    pub validation_status: String,
    pub is_po_box: bool,
    pub is_dpv_confirmed: bool,
    /// High-confidence signal that no human review is needed. Overlaps with
    /// `is_dpv_confirmed` on purpose; the two are kept distinct.
    pub is_confirmed: bool,
    pub is_vacant: bool,
    pub is_no_stat: bool,
    pub is_cmra: bool,
    pub is_undeliverable: bool,
    pub dpv_confirmation_description: String,
}

impl AddressVerdict {
    /// Verdict for a failed geocoding or validation call.
    #[must_use]
    pub fn api_error(original_address: &str, message: &str) -> Self {
        Self::failure(original_address, format!("API Error: {message}"))
    }

    /// Verdict for a validation response that could not be decoded.
    #[must_use]
    pub fn parse_error(original_address: &str, message: &str) -> Self {
        Self::failure(original_address, format!("Parse Error: {message}"))
    }

    /// Maps a client failure onto the matching error path: undecodable
    /// bodies become parse errors, everything else an API error.
    #[must_use]
    pub fn from_api_failure(original_address: &str, err: &GoogleApiError) -> Self {
        match err {
            GoogleApiError::Deserialize { .. } => {
                Self::parse_error(original_address, &err.to_string())
            }
            _ => Self::api_error(original_address, &err.to_string()),
        }
    }

    fn failure(original_address: &str, validation_status: String) -> Self {
        Self {
            original_address: original_address.to_string(),
            validated_address: original_address.to_string(),
            is_valid: false,
            validation_status,
            is_po_box: false,
            is_dpv_confirmed: false,
            is_confirmed: false,
            is_vacant: false,
            is_no_stat: false,
            is_cmra: false,
            is_undeliverable: false,
            dpv_confirmation_description: DPV_ABSENT.to_string(),
        }
    }
}

/// Maps a validation granularity to its status text and mailability.
#[must_use]
pub fn mailability(granularity: Granularity) -> (&'static str, bool) {
    match granularity {
        Granularity::SubPremise => ("Highly Mailable Address (Validated to sub-unit)", true),
        Granularity::Premise => ("Standard Mailable Address (Validated to building)", true),
        Granularity::Street => (
            "Partial Address (Street-level only, may not be reliably mailable)",
            true,
        ),
        Granularity::Locality => ("Non-Mailable Address (Only city-level validated)", false),
        Granularity::Region => ("Non-Mailable Address (Only region/state validated)", false),
        Granularity::Country => ("Non-Mailable Address (Only country validated)", false),
        Granularity::Other => ("Non-Mailable Address (Unknown or unvalidated)", false),
        Granularity::Unknown => (
            "Non-Mailable Address (Unknown validation granularity)",
            false,
        ),
    }
}

/// Maps a DPV confirmation code to its human-readable description.
#[must_use]
pub fn dpv_confirmation_description(code: &str) -> &'static str {
    match code {
        "Y" => "Address confirmed (Primary and secondary if present).",
        "N" => "Address not confirmed (No primary or secondary match).",
        "D" => "Primary confirmed, but secondary information is missing.",
        "S" => "Primary confirmed, secondary information exists but was not provided in the input.",
        "C" => "Address confirmed, but it is a Commercial Mail Receiving Agency (CMRA).",
        "B" => "Primary confirmed, but it is a PO Box or equivalent.",
        _ => "Unknown DPV Confirmation Code",
    }
}

/// Classifies a decoded validation response into an [`AddressVerdict`].
///
/// USPS-derived gates (`is_po_box`, `is_dpv_confirmed`, the CASS re-check of
/// `is_confirmed`) only apply when `region_code` is `"US"`; the DPV
/// description lookup runs for every region.
#[must_use]
pub fn classify(
    response: &ValidationResponse,
    original_address: &str,
    region_code: &str,
    enable_usps_cass: bool,
) -> AddressVerdict {
    let result = response.result.as_ref();
    let verdict = result.and_then(|r| r.verdict.as_ref());

    let granularity = verdict.map_or(Granularity::Unknown, |v| v.validation_granularity);
    let (status, is_valid) = mailability(granularity);
    let mut validation_status = status.to_string();

    let mailable_granularity = matches!(
        granularity,
        Granularity::SubPremise | Granularity::Premise | Granularity::Street
    );
    if verdict.is_some_and(|v| v.has_inferred_components) && mailable_granularity {
        validation_status.push_str(INFERRED_NOTE);
    }

    let validated_address = result
        .and_then(|r| r.address.as_ref())
        .and_then(|a| a.formatted_address.as_deref())
        .filter(|formatted| !formatted.is_empty())
        .unwrap_or(original_address)
        .to_string();

    let usps = result.and_then(|r| r.usps_data.as_ref());
    let dpv_code = usps
        .and_then(|u| u.dpv_confirmation.as_deref())
        .unwrap_or(DPV_ABSENT);

    let is_us = region_code == US_REGION_CODE;
    let is_po_box = is_us
        && result
            .and_then(|r| r.metadata.as_ref())
            .is_some_and(|m| m.po_box);
    let is_dpv_confirmed = is_us && dpv_code == "Y";

    let mut is_confirmed = verdict.is_some_and(|v| {
        matches!(
            v.validation_granularity,
            Granularity::Premise | Granularity::SubPremise
        ) && v.address_complete
            && !v.has_inferred_components
            && !v.has_replaced_components
            && v.unconfirmed_component_types.is_empty()
            && v.missing_component_types.is_empty()
            && v.unresolved_tokens.is_empty()
    });
    if is_us && enable_usps_cass {
        is_confirmed = is_confirmed && dpv_code == "Y";
    }

    AddressVerdict {
        original_address: original_address.to_string(),
        validated_address,
        is_valid,
        validation_status,
        is_po_box,
        is_dpv_confirmed,
        is_confirmed,
        is_vacant: usps.is_some_and(|u| u.dpv_vacant),
        is_no_stat: usps.is_some_and(|u| u.dpv_no_stat),
        is_cmra: usps.is_some_and(|u| u.dpv_cmra),
        is_undeliverable: usps.is_some_and(|u| u.undeliverable),
        dpv_confirmation_description: dpv_confirmation_description(dpv_code).to_string(),
    }
}

/// Classifies the outcome of a validation call, mapping client failures onto
/// the error-path verdicts so one bad record never aborts a batch run.
#[must_use]
pub fn classify_outcome(
    outcome: &Result<ValidationResponse, GoogleApiError>,
    original_address: &str,
    region_code: &str,
    enable_usps_cass: bool,
) -> AddressVerdict {
    match outcome {
        Ok(response) => classify(response, original_address, region_code, enable_usps_cass),
        Err(err) => AddressVerdict::from_api_failure(original_address, err),
    }
}
