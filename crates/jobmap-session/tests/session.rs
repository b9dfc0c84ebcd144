//! End-to-end tests: catalog loading and the view session against a
//! `wiremock` geocoding endpoint.

use std::sync::Arc;
use std::time::Duration;

use jobmap_core::{LatLng, QueryState, SeedJob, ZoomLevel};
use jobmap_geocode::{CacheStore, GeocodeCache, GeocodeClient, GeocodeResolver};
use jobmap_session::{CatalogLoader, Session, ViewEvent};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver(server: &MockServer) -> Arc<GeocodeResolver> {
    let client = GeocodeClient::with_base_url("test-key", 5, &server.uri())
        .expect("client construction should not fail")
        .with_retry_policy(0, 1);
    Arc::new(GeocodeResolver::new(
        client,
        GeocodeCache::new(CacheStore::Disabled),
    ))
}

fn ok_body(lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [ { "geometry": { "location": { "lat": lat, "lng": lng } } } ]
    })
}

fn zero_results() -> serde_json::Value {
    json!({ "status": "ZERO_RESULTS", "results": [] })
}

fn seed(title: &str, location: &str) -> SeedJob {
    SeedJob {
        title: title.to_owned(),
        company: "Acme".to_owned(),
        location: location.to_owned(),
        job_type: None,
        experience: None,
        salary: None,
        image: None,
    }
}

async fn geocodes(server: &MockServer, address: &str, body: serde_json::Value, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("address", address))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// CatalogLoader
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_keeps_seed_order_when_lookups_finish_out_of_order() {
    let server = MockServer::start().await;
    geocodes(&server, "Seattle, Washington", ok_body(47.6, -122.3), 150).await;
    geocodes(&server, "Austin, Texas", ok_body(30.3, -97.7), 0).await;
    geocodes(&server, "Boston, Massachusetts", ok_body(42.4, -71.1), 60).await;

    let loader = CatalogLoader::new(
        resolver(&server),
        vec![
            seed("First", "seattle, wa"),
            seed("Second", "Austin, TX"),
            seed("Third", "boston, ma"),
        ],
    );
    let catalog = loader.load_catalog().await;

    let titles: Vec<_> = catalog.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
    assert_eq!(catalog[0].position(), Some(LatLng::new(47.6, -122.3)));
    assert_eq!(catalog[1].position(), Some(LatLng::new(30.3, -97.7)));
    assert_eq!(catalog[2].position(), Some(LatLng::new(42.4, -71.1)));
}

#[tokio::test]
async fn shared_location_is_geocoded_once_per_load() {
    let server = MockServer::start().await;
    geocodes(&server, "Denver, Colorado", ok_body(39.7, -105.0), 0).await;

    // Sequential lookups so the second one sees the cached answer.
    let loader = CatalogLoader::new(
        resolver(&server),
        vec![seed("A", "Denver, CO"), seed("B", "denver, colorado")],
    )
    .with_max_concurrent(1);
    let catalog = loader.load_catalog().await;
    assert!(catalog.iter().all(|j| j.is_plottable()));
}

#[tokio::test]
async fn failed_lookup_leaves_record_listed_without_marker() {
    let server = MockServer::start().await;
    geocodes(&server, "Miami, Florida", ok_body(25.8, -80.2), 0).await;
    geocodes(&server, "Atlantis, Xx", zero_results(), 0).await;

    let loader = CatalogLoader::new(
        resolver(&server),
        vec![seed("A", "Atlantis, XX"), seed("B", "Miami, FL")],
    );
    let catalog = loader.load_catalog().await;
    assert_eq!(catalog.len(), 2);
    assert!(!catalog[0].is_plottable());
    assert!(catalog[1].is_plottable());
}

#[tokio::test]
async fn second_load_makes_no_requests() {
    let server = MockServer::start().await;
    geocodes(&server, "Mesa, Arizona", ok_body(33.4, -111.8), 0).await;

    let loader = CatalogLoader::new(resolver(&server), vec![seed("A", "Mesa, AZ")]);
    let first = loader.load_catalog().await;

    // Served from the geocode cache even after the catalog is rebuilt.
    loader.invalidate().await;
    let second = loader.load_catalog().await;
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unmatched_location_recenters_map_after_fallback() {
    let server = MockServer::start().await;
    geocodes(&server, "Tempe, Arizona", ok_body(33.42, -111.94), 0).await;
    geocodes(&server, "90210", ok_body(34.09, -118.41), 0).await;

    let loader = CatalogLoader::new(resolver(&server), vec![seed("A", "Tempe, AZ")]);
    let catalog = loader.load_catalog().await;
    let mut session = Session::new(catalog, Arc::clone(loader.resolver()));

    session.dispatch(ViewEvent::LocationChanged("90210".into()));
    session.dispatch(ViewEvent::EnterPressed);
    assert_eq!(session.in_flight(), 1);

    session.settle().await;
    let view = session.controller().view();
    assert_eq!(view.map_center, LatLng::new(34.09, -118.41));
    assert_eq!(view.zoom, ZoomLevel::City);
    assert!(view.selected_job.is_none());
    assert!(session.snapshot().empty_message().is_some());
}

#[tokio::test]
async fn superseded_fallback_does_not_move_map() {
    let server = MockServer::start().await;
    geocodes(&server, "90210", ok_body(34.09, -118.41), 100).await;

    let loader = CatalogLoader::new(resolver(&server), vec![seed("A", "Tempe, AZ")])
        .with_max_concurrent(1);
    // Tempe is not mocked; the lookup fails and the record stays unplotted.
    let catalog = loader.load_catalog().await;
    let mut session = Session::new(catalog, Arc::clone(loader.resolver()));

    session.dispatch(ViewEvent::LocationChanged("90210".into()));
    session.dispatch(ViewEvent::EnterPressed);
    session.dispatch(ViewEvent::LocationChanged("tempe".into()));
    session.settle().await;

    assert_eq!(
        session.controller().view().map_center,
        jobmap_core::DEFAULT_MAP_CENTER
    );
    assert_eq!(session.controller().filtered(), [0]);
}

#[tokio::test]
async fn deep_link_session_focuses_matching_job() {
    let server = MockServer::start().await;
    geocodes(&server, "Tempe, Arizona", ok_body(33.42, -111.94), 0).await;

    let loader = CatalogLoader::new(resolver(&server), vec![seed("Welder", "Tempe, AZ")]);
    let catalog = loader.load_catalog().await;
    let query: QueryState =
        jobmap_core::DeepLink::parse("/jobs?search=Welder&location=Tempe%2C%20Arizona").into_query();
    let session = Session::with_initial_query(catalog, Arc::clone(loader.resolver()), query);

    let view = session.controller().view();
    assert_eq!(view.selected_job, Some(0));
    assert_eq!(view.map_center, LatLng::new(33.42, -111.94));
    assert_eq!(view.zoom, ZoomLevel::ZoomedIn);
    session.shutdown().await;
}
