use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use reelgate_metadata::MetadataError;
use reelgate_metadata::provider::MetadataProvider;
use reelgate_metadata::tmdb::TmdbClient;
use reelgate_player::PlayerConfig;
use reelgate_server::routes::build_router;
use reelgate_server::state::AppState;
use serde_json::{Value, json};

type Calls = Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>;

/// Upstream stand-in: canned bodies by path, canned failures by path, and a call log.
#[derive(Default)]
struct StubProvider {
    bodies: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    network_down: bool,
    calls: Calls,
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, MetadataError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), query.to_vec()));
        if self.network_down {
            return Err(MetadataError::Network("connection refused".into()));
        }
        if let Some(status) = self.failures.get(path) {
            return Err(MetadataError::Upstream {
                status: *status,
                body: r#"{"status_message":"boom"}"#.into(),
            });
        }
        self.bodies
            .get(path)
            .cloned()
            .ok_or(MetadataError::Upstream {
                status: 404,
                body: r#"{"status_message":"The resource you requested could not be found."}"#
                    .into(),
            })
    }
}

fn server_with(provider: StubProvider) -> TestServer {
    let state = AppState {
        provider: Arc::new(provider),
        player: PlayerConfig::default(),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn catalog_stub() -> (StubProvider, Calls) {
    let mut bodies = HashMap::new();
    bodies.insert(
        "/trending/movie/week".to_string(),
        json!({ "page": 1, "total_pages": 1, "results": [{ "id": 550, "title": "Fight Club" }] }),
    );
    bodies.insert(
        "/movie/popular".to_string(),
        json!({ "page": 1, "total_pages": 3, "results": [] }),
    );
    bodies.insert(
        "/search/movie".to_string(),
        json!({ "page": 1, "total_pages": 1, "results": [{ "id": 11, "title": "Star Wars" }] }),
    );
    bodies.insert(
        "/movie/550".to_string(),
        json!({ "id": 550, "title": "Fight Club", "runtime": 139 }),
    );
    bodies.insert(
        "/tv/1396/similar".to_string(),
        json!({ "page": 1, "results": [{ "id": 60059, "name": "Better Call Saul" }] }),
    );
    bodies.insert(
        "/tv/1396/season/1".to_string(),
        json!({ "season_number": 1, "episodes": [{ "id": 62085, "name": "Pilot", "episode_number": 1, "season_number": 1 }] }),
    );
    let stub = StubProvider {
        bodies,
        ..Default::default()
    };
    let calls = stub.calls.clone();
    (stub, calls)
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = server_with(StubProvider::default());
    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "stub");
}

#[tokio::test]
async fn listing_is_passed_through_with_cache_headers() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    let resp = server.get("/api/trending/movie/week").await;
    resp.assert_status_ok();
    assert_eq!(resp.header("access-control-allow-origin"), "*");
    assert_eq!(resp.header("cache-control"), "public, s-maxage=60");
    assert_eq!(resp.header("content-type"), "application/json");

    let body: Value = resp.json();
    assert_eq!(body["results"][0]["title"], "Fight Club");
    assert_eq!(calls.lock().unwrap()[0].0, "/trending/movie/week");
}

#[tokio::test]
async fn numeric_paths_map_to_upstream_ids() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    server.get("/api/movie/550").await.assert_status_ok();
    server.get("/api/tv/1396/similar").await.assert_status_ok();
    let resp = server.get("/api/tv/1396/season/1").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["episodes"][0]["name"], "Pilot");

    let paths: Vec<String> = calls.lock().unwrap().iter().map(|c| c.0.clone()).collect();
    assert_eq!(
        paths,
        vec!["/movie/550", "/tv/1396/similar", "/tv/1396/season/1"]
    );
}

#[tokio::test]
async fn search_forwards_query_string() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    let resp = server
        .get("/api/search/movie")
        .add_query_param("query", "star wars")
        .await;
    resp.assert_status_ok();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, "/search/movie");
    assert_eq!(
        calls[0].1,
        vec![("query".to_string(), "star wars".to_string())]
    );
}

#[tokio::test]
async fn non_search_endpoints_drop_query_string() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    server
        .get("/api/movie/popular")
        .add_query_param("page", "2")
        .await
        .assert_status_ok();
    assert!(calls.lock().unwrap()[0].1.is_empty());
}

#[tokio::test]
async fn unmatched_path_returns_404_with_pattern() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    let resp = server.get("/api/person/287").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.header("access-control-allow-origin"), "*");
    let body: Value = resp.json();
    assert_eq!(body["error"], "Invalid endpoint");
    assert_eq!(body["requestedPath"], "/api/person/287");
    assert_eq!(body["pattern"], "/api/person/:id");
    assert_eq!(body["availableEndpoints"].as_array().unwrap().len(), 11);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_numeric_id_is_unmatched() {
    let server = server_with(StubProvider::default());
    let resp = server.get("/api/movie/12a").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["pattern"], "/api/movie/12a");
}

#[tokio::test]
async fn upstream_failure_returns_500_with_message() {
    let mut stub = StubProvider::default();
    stub.failures.insert("/tv/popular".to_string(), 503);
    let server = server_with(stub);

    let resp = server.get("/api/tv/popular").await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"], "Internal Server Error");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("TMDB API Error: 503")
    );
}

#[tokio::test]
async fn options_returns_204_on_any_path() {
    let server = server_with(StubProvider::default());

    for path in ["/api/movie/popular", "/api/nowhere", "/health", "/"] {
        let resp = server.method(Method::OPTIONS, path).await;
        resp.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(resp.header("access-control-allow-origin"), "*");
        assert_eq!(resp.header("access-control-allow-methods"), "GET");
        assert_eq!(resp.header("access-control-allow-headers"), "*");
        assert_eq!(resp.header("access-control-max-age"), "86400");
    }
}

#[tokio::test]
async fn trending_endpoint_keeps_upstream_status() {
    let mut stub = StubProvider::default();
    stub.failures.insert("/trending/movie/week".to_string(), 401);
    let server = server_with(stub);

    let resp = server.get("/api/trending-movies").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body, json!({ "error": "Failed to fetch trending movies" }));
}

#[tokio::test]
async fn trending_endpoint_network_error_is_500() {
    let server = server_with(StubProvider {
        network_down: true,
        ..Default::default()
    });

    let resp = server.get("/api/trending-movies").await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn trending_endpoint_success_has_no_cache_header() {
    let (stub, _) = catalog_stub();
    let server = server_with(stub);

    let resp = server.get("/api/trending-movies").await;
    resp.assert_status_ok();
    assert!(resp.headers().get("cache-control").is_none());
    let body: Value = resp.json();
    assert_eq!(body["results"][0]["id"], 550);
}

#[tokio::test]
async fn tv_shows_season_endpoint() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    let resp = server.get("/api/tv-shows/1396/season/1").await;
    resp.assert_status_ok();
    assert_eq!(resp.header("cache-control"), "public, s-maxage=60");
    assert_eq!(calls.lock().unwrap()[0].0, "/tv/1396/season/1");
}

#[tokio::test]
async fn tv_shows_missing_season_is_500() {
    let server = server_with(StubProvider::default());

    let resp = server.get("/api/tv-shows/1396").await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["message"], "Missing required parameters");
}

#[tokio::test]
async fn embed_urls() {
    let server = server_with(StubProvider::default());

    let resp = server.get("/embed/movie/550").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["url"], "https://vidapi.site/embed/movie/?id=550");

    let resp = server.get("/embed/tv/1396/2/3").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(
        body["url"],
        "https://vidapi.site/embed/tv/?id=1396&season=2&episode=3"
    );
}

#[tokio::test]
async fn embed_rejects_bad_id() {
    let server = server_with(StubProvider::default());

    let resp = server.get("/embed/movie/12a").await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn proxy_injects_bearer_token_upstream() {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/tv"))
        .and(query_param("query", "breaking"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "page": 1, "results": [{ "id": 1396, "name": "Breaking Bad" }] })),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let tmdb = TmdbClient::builder()
        .base_url(format!("{}/3/", upstream.uri()).parse().unwrap())
        .api_token("secret-token")
        .build()
        .unwrap();
    let server = TestServer::new(build_router(AppState {
        provider: Arc::new(tmdb),
        player: PlayerConfig::default(),
    }))
    .unwrap();

    let resp = server
        .get("/api/search/tv")
        .add_query_param("query", "breaking")
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["results"][0]["name"], "Breaking Bad");
}

#[tokio::test]
async fn dedicated_routes_answer_any_method() {
    let (stub, calls) = catalog_stub();
    let server = server_with(stub);

    let resp = server.post("/api/trending-movies").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["results"][0]["id"], 550);

    server
        .put("/api/tv-shows/1396/season/1")
        .await
        .assert_status_ok();
    assert_eq!(calls.lock().unwrap()[1].0, "/tv/1396/season/1");
}

#[tokio::test]
async fn embed_rejects_non_numeric_episode() {
    let server = server_with(StubProvider::default());

    let resp = server.get("/embed/tv/1396/one/2").await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "bad_request");
    assert_eq!(
        body["error"]["message"],
        "bad request: season must be a number: one"
    );
}

#[tokio::test]
async fn embed_host_that_fails_sanitizing_is_500() {
    let state = AppState {
        provider: Arc::new(StubProvider::default()),
        player: PlayerConfig {
            embed_host: "bad host".to_string(),
            ..Default::default()
        },
    };
    let server = TestServer::new(build_router(state)).unwrap();

    let resp = server.get("/embed/movie/550").await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "internal_error");
}
