//! Integration tests for `GeocodeClient` and `GeocodeResolver`.
//!
//! Uses `wiremock` to stand up a local geocoding endpoint for each test so no
//! real network traffic is made. Call counts are asserted with `.expect(n)`,
//! which wiremock verifies when the server is dropped.

use std::path::PathBuf;

use jobmap_core::LatLng;
use jobmap_geocode::{CacheStore, GeocodeCache, GeocodeClient, GeocodeError, GeocodeResolver};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeocodeClient {
    GeocodeClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
}

fn resolver(server: &MockServer) -> GeocodeResolver {
    GeocodeResolver::new(
        test_client(&server.uri()),
        GeocodeCache::new(CacheStore::Disabled),
    )
}

fn ok_body(lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [
            { "geometry": { "location": { "lat": lat, "lng": lng } } }
        ]
    })
}

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("jobmap-resolver-{}", uuid::Uuid::new_v4()))
}

// ---------------------------------------------------------------------------
// GeocodeClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_sends_address_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("address", "Phoenix, Arizona"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(33.4484, -112.074)))
        .expect(1)
        .mount(&server)
        .await;

    let position = test_client(&server.uri())
        .geocode("Phoenix, Arizona")
        .await
        .expect("should geocode");
    assert_eq!(position, Some(LatLng::new(33.4484, -112.074)));
}

#[tokio::test]
async fn client_surfaces_request_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("Phoenix, Arizona")
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::Api { ref status, .. } if status == "REQUEST_DENIED"));
}

#[tokio::test]
async fn client_retries_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(47.6062, -122.3321)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(2, 0);
    let position = client.geocode("Seattle, Washington").await.unwrap();
    assert_eq!(position, Some(LatLng::new(47.6062, -122.3321)));
}

#[tokio::test]
async fn client_maps_429_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("Miami, Florida")
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::RateLimited { .. }), "got: {err:?}");
}

#[tokio::test]
async fn client_reports_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("Dallas, Texas")
        .await
        .unwrap_err();
    assert!(matches!(err, GeocodeError::Deserialize { .. }), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// GeocodeResolver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_resolve_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("address", "Austin, Texas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(30.2672, -97.7431)))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&server);
    let first = resolver.resolve("Austin, Texas").await;
    let second = resolver.resolve("Austin, Texas").await;

    assert_eq!(first, Some(LatLng::new(30.2672, -97.7431)));
    assert_eq!(second, first);
    assert_eq!(resolver.cache().len(), 1);
}

#[tokio::test]
async fn empty_results_resolve_to_none_and_are_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let resolver = resolver(&server);
    assert!(resolver.resolve("Nowhere, Nevada").await.is_none());
    assert!(resolver.resolve("Nowhere, Nevada").await.is_none());
    assert!(resolver.cache().is_empty());
}

#[tokio::test]
async fn failure_is_retried_on_a_later_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(36.1627, -86.7816)))
        .mount(&server)
        .await;

    let resolver = resolver(&server);
    assert!(resolver.resolve("Nashville, Tennessee").await.is_none());
    assert_eq!(
        resolver.resolve("Nashville, Tennessee").await,
        Some(LatLng::new(36.1627, -86.7816))
    );
}

#[tokio::test]
async fn resolve_raw_normalizes_before_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("address", "Phoenix, Arizona"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(33.4484, -112.074)))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = resolver(&server);
    assert!(resolver.resolve_raw("phoenix,   az").await.is_some());
    assert!(resolver.resolve("Phoenix, Arizona").await.is_some());
}

#[tokio::test]
async fn empty_location_never_hits_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(0.0, 0.0)))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = resolver(&server);
    assert!(resolver.resolve("").await.is_none());
    assert!(resolver.resolve_raw("  ,  ").await.is_none());
}

#[tokio::test]
async fn offline_resolver_answers_from_cache_only() {
    let cache = GeocodeCache::new(CacheStore::Disabled);
    cache
        .insert("Chicago, Illinois", LatLng::new(41.8781, -87.6298))
        .await;
    let resolver = GeocodeResolver::offline(cache);

    assert!(resolver.resolve("Chicago, Illinois").await.is_some());
    assert!(resolver.resolve("Denver, Colorado").await.is_none());
}

#[tokio::test]
async fn resolutions_survive_a_restart() {
    let server = MockServer::start().await;
    let dir = temp_dir();

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(25.7617, -80.1918)))
        .expect(1)
        .mount(&server)
        .await;

    let first = GeocodeResolver::new(
        test_client(&server.uri()),
        GeocodeCache::hydrate(CacheStore::file_in(&dir)),
    );
    assert!(first.resolve("Miami, Florida").await.is_some());
    first.flush().await;

    let second = GeocodeResolver::new(
        test_client(&server.uri()),
        GeocodeCache::hydrate(CacheStore::file_in(&dir)),
    );
    assert_eq!(
        second.resolve("Miami, Florida").await,
        Some(LatLng::new(25.7617, -80.1918))
    );

    std::fs::remove_dir_all(dir).ok();
}
