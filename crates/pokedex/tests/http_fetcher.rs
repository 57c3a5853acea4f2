//! Integration tests for the HTTP fetcher against a mock catalog service.
//!
//! The fetcher is blocking, so tests run on the multi-thread runtime to keep
//! the mock server responsive while a request is in flight.

use pokedex::{extract_lineage, CatalogCache, Fetcher, HttpFetcher};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer) -> HttpFetcher {
    HttpFetcher::new(format!("{}/api/v2/", server.uri()))
}

fn bulbasaur_body() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "types": [{"slot": 1, "type": {"name": "grass", "url": ""}}],
        "abilities": [{"ability": {"name": "overgrow", "url": ""}}],
        "moves": [{"move": {"name": "tackle", "url": ""}}]
    })
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .and(query_param("limit", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [
                {"name": "bulbasaur", "url": format!("{}/api/v2/pokemon/1/", server.uri())},
                {"name": "ivysaur", "url": format!("{}/api/v2/pokemon/2/", server.uri())}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_catalog_parses_results() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let entries = fetcher_for(&server).fetch_catalog(2000).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "bulbasaur");
    assert!(entries[1].locator.ends_with("/api/v2/pokemon/2/"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_catalog_server_error_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(fetcher_for(&server).fetch_catalog(2000).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_200_success_status_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(fetcher_for(&server).fetch_catalog(2000).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_entity_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/9999/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let locator = format!("{}/api/v2/pokemon/9999/", server.uri());
    assert!(fetcher_for(&server).fetch_entity(&locator).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_entity_malformed_json_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let locator = format!("{}/api/v2/pokemon/1/", server.uri());
    assert!(fetcher_for(&server).fetch_entity(&locator).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_refused_is_none() {
    // Nothing listens on port 9 (discard) in the test environment
    let fetcher = HttpFetcher::new("http://127.0.0.1:9/api/v2/");
    assert!(fetcher.fetch_catalog(10).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cache_builds_once_then_resolves() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulbasaur_body()))
        .mount(&server)
        .await;

    let mut cache = CatalogCache::new(fetcher_for(&server));
    let record = cache.resolve_by_name("bulbasaur").unwrap();
    assert_eq!(record.name, "bulbasaur");
    assert_eq!(record.types, vec!["grass"]);

    assert!(cache.resolve_by_name("bulbasaurr").is_none());
    // `expect(1)` on the catalog mock is verified when the server drops
}

#[tokio::test(flavor = "multi_thread")]
async fn test_evolution_chain_species_then_chain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon-species/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "bulbasaur",
            "evolution_chain": {"url": format!("{}/api/v2/evolution-chain/1/", server.uri())}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/evolution-chain/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "chain": {
                "species": {"name": "bulbasaur", "url": ""},
                "evolves_to": [{
                    "species": {"name": "ivysaur", "url": ""},
                    "evolves_to": [{
                        "species": {"name": "venusaur", "url": ""},
                        "evolves_to": []
                    }]
                }]
            }
        })))
        .mount(&server)
        .await;

    let cache = CatalogCache::new(fetcher_for(&server));
    let chain = cache.fetch_evolution_chain(1).unwrap();

    assert_eq!(
        extract_lineage(&chain),
        vec!["bulbasaur", "ivysaur", "venusaur"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_evolution_chain_missing_species_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/pokemon-species/10001"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = CatalogCache::new(fetcher_for(&server));
    assert!(cache.fetch_evolution_chain(10001).is_none());
}
