//! Integration tests for `GeocodeClient` using wiremock HTTP mocks.

use serde_json::json;
use spotfinder_geocode::{GeocodeClient, GeocodeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> GeocodeClient {
    GeocodeClient::with_endpoint(
        "geo-key",
        5,
        "spotfinder-test/0.1",
        &format!("{}/maps/api/geocode/json", server.uri()),
    )
    .expect("client construction should not fail")
}

fn ok_body(lat: serde_json::Value, lng: serde_json::Value) -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [{
            "formatted_address": "Grant Park, Chicago, IL 60605, USA",
            "geometry": { "location": { "lat": lat, "lng": lng } }
        }]
    })
}

#[tokio::test]
async fn resolve_returns_first_result_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "Grant Park Chicago, IL"))
        .and(query_param("key", "geo-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_body(json!(41.8757), json!(-87.6243))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let coords = test_client(&server)
        .resolve("Grant Park Chicago, IL")
        .await
        .expect("should resolve")
        .expect("should have coordinates");
    assert!((coords.lat - 41.8757).abs() < 1e-9);
    assert!((coords.long + 87.6243).abs() < 1e-9);
}

#[tokio::test]
async fn string_coordinates_are_parsed_as_floats() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_body(json!("41.5"), json!("-87.5"))),
        )
        .mount(&server)
        .await;

    let coords = test_client(&server).resolve("x").await.unwrap().unwrap();
    assert!((coords.lat - 41.5).abs() < f64::EPSILON);
    assert!((coords.long + 87.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn zero_results_is_unresolved_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let result = test_client(&server).resolve("Nowhere Street").await;
    assert!(matches!(result, Ok(None)), "got: {result:?}");
}

#[tokio::test]
async fn ok_with_empty_results_is_unresolved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "OK", "results": [] })),
        )
        .mount(&server)
        .await;

    let result = test_client(&server).resolve("Nowhere Street").await;
    assert!(matches!(result, Ok(None)), "got: {result:?}");
}

#[tokio::test]
async fn request_denied_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_retries(3, 0);
    let err = client.resolve("1 Main St").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::Api { ref status, ref message }
            if status == "REQUEST_DENIED" && message.contains("invalid")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn over_query_limit_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "results": []
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!(1.0), json!(2.0))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_retries(1, 0);
    let coords = client.resolve("1 Main St").await.unwrap().unwrap();
    assert!((coords.lat - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn non_numeric_coordinates_are_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_body(json!("north"), json!(-87.6))),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).resolve("1 Main St").await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidCoordinates { .. }), "got: {err:?}");
}

#[tokio::test]
async fn server_error_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_client(&server).resolve("1 Main St").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Http(_)), "got: {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server).resolve("1 Main St").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn http_errors_do_not_expose_the_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GeocodeClient::with_endpoint(
        "geo-secret-456",
        5,
        "spotfinder-test/0.1",
        &format!("{}/maps/api/geocode/json", server.uri()),
    )
    .expect("client construction should not fail");
    let err = client.resolve("1 Main St").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Http(_)), "got: {err:?}");
    assert!(!err.to_string().contains("geo-secret-456"), "api key leaked: {err}");
    assert!(!format!("{err:?}").contains("geo-secret-456"), "api key leaked: {err:?}");
}

#[tokio::test]
async fn connect_errors_do_not_expose_the_api_key() {
    // Port 1 is never listening.
    let client = GeocodeClient::with_endpoint(
        "geo-secret-456",
        5,
        "spotfinder-test/0.1",
        "http://127.0.0.1:1/maps/api/geocode/json",
    )
    .expect("client construction should not fail");
    let err = client.resolve("1 Main St").await.unwrap_err();

    assert!(matches!(err, GeocodeError::Http(_)), "got: {err:?}");
    assert!(!err.to_string().contains("geo-secret-456"), "api key leaked: {err}");
    assert!(!format!("{err:?}").contains("geo-secret-456"), "api key leaked: {err:?}");
}
