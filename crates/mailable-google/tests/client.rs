//! Integration tests for `GoogleMapsClient` using wiremock HTTP mocks.

use mailable_google::request::{RequestAddress, ValidationRequest};
use mailable_google::types::Granularity;
use mailable_google::{GoogleApiError, GoogleMapsClient};
use wiremock::matchers::{body_partial_json, method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(geocode_url: &str, validation_url: &str) -> GoogleMapsClient {
    GoogleMapsClient::with_base_urls("test-key", 30, "mailable-test", geocode_url, validation_url)
        .expect("client construction should not fail")
}

fn request_for(lines: &[&str]) -> ValidationRequest {
    ValidationRequest {
        address: RequestAddress {
            address_lines: lines.iter().map(|l| (*l).to_string()).collect(),
            locality: None,
            administrative_area: None,
            region_code: "US".to_string(),
            postal_code: None,
        },
        enable_usps_cass: true,
    }
}

#[tokio::test]
async fn geocode_returns_first_result() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "OK",
        "results": [
            {
                "formatted_address": "Cambridge, MA 02138, USA",
                "address_components": [
                    {
                        "long_name": "Harvard University",
                        "short_name": "Harvard University",
                        "types": ["university", "establishment", "point_of_interest"]
                    },
                    {
                        "long_name": "Cambridge",
                        "short_name": "Cambridge",
                        "types": ["locality", "political"]
                    }
                ]
            },
            {
                "formatted_address": "Somewhere Else",
                "address_components": []
            }
        ]
    });

    Mock::given(method("GET"))
        .and(query_param("address", "Harvard"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), &server.uri());
    let result = client.geocode("Harvard").await.expect("should geocode");

    assert_eq!(result.formatted_address, "Cambridge, MA 02138, USA");
    assert_eq!(result.address_components.len(), 2);
    assert_eq!(result.address_components[0].long_name, "Harvard University");
}

#[tokio::test]
async fn geocode_empty_results_is_no_results_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), &server.uri());
    let result = client.geocode("asdfghjkl").await;

    assert!(
        matches!(result, Err(GoogleApiError::NoResults { ref address }) if address == "asdfghjkl"),
        "expected NoResults, got: {result:?}"
    );
}

#[tokio::test]
async fn geocode_error_status_surfaces_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid.",
        "results": []
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), &server.uri());
    let err = client.geocode("1 Main St").await.unwrap_err();

    let msg = err.to_string();
    assert!(
        msg.contains("The provided API key is invalid."),
        "expected error message to surface, got: {msg}"
    );
}

#[tokio::test]
async fn geocode_http_failure_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), &server.uri());
    let result = client.geocode("1 Main St").await;

    assert!(matches!(result, Err(GoogleApiError::Http(_))));
}

#[tokio::test]
async fn validate_posts_camel_case_body_and_decodes_response() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "result": {
            "verdict": {
                "validationGranularity": "PREMISE",
                "addressComplete": true
            },
            "address": { "formattedAddress": "123 Main St, Springfield, IL 62701-1234, USA" },
            "uspsData": { "dpvConfirmation": "Y" }
        }
    });

    Mock::given(method("POST"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "address": {
                "addressLines": ["123 Main St, Springfield"],
                "regionCode": "US"
            },
            "enableUspsCass": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), &server.uri());
    let response = client
        .validate(&request_for(&["123 Main St, Springfield"]))
        .await
        .expect("should validate");

    let result = response.result.expect("result should be present");
    let verdict = result.verdict.expect("verdict should be present");
    assert_eq!(verdict.validation_granularity, Granularity::Premise);
    assert!(verdict.address_complete);
    assert_eq!(
        result.usps_data.and_then(|u| u.dpv_confirmation).as_deref(),
        Some("Y")
    );
}

#[tokio::test]
async fn validate_malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), &server.uri());
    let result = client.validate(&request_for(&["1 Main St"])).await;

    assert!(
        matches!(result, Err(GoogleApiError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}
