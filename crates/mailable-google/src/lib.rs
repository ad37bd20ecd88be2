//! Client for the Google Maps Platform geocoding and address-validation
//! endpoints, plus the classification of validation responses into
//! mailability verdicts.
//!
//! The usual flow is geocode → [`build_validation_request`] → validate →
//! [`classify`]. Classification is a pure function over the typed response;
//! client failures map onto dedicated error-path verdicts so a batch caller
//! never has to abort on a single bad record.

pub mod client;
pub mod error;
pub mod request;
pub mod types;
pub mod verdict;

pub use client::GoogleMapsClient;
pub use error::GoogleApiError;
pub use request::{build_validation_request, RequestAddress, ValidationRequest};
pub use types::{AddressComponent, GeocodeResult, Granularity, ValidationResponse};
pub use verdict::{classify, classify_outcome, AddressVerdict};

/// Region code whose addresses carry USPS-specific signals (DPV, CASS).
pub const US_REGION_CODE: &str = "US";
