use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;

use super::*;

fn test_app() -> Router {
    build_app(AppState {
        repo: Arc::new(StoreRepository::seed()),
        map: Arc::new(MapConfig::default()),
        map_credential_configured: false,
    })
}

async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, headers, json)
}

fn ids(items: &serde_json::Value) -> Vec<String> {
    items
        .as_array()
        .expect("items array")
        .iter()
        .map(|i| i["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn api_error_codes_map_to_statuses() {
    let status = |code| ApiError::new("req-1", code, "x").into_response().status();
    assert_eq!(status("not_found"), StatusCode::NOT_FOUND);
    assert_eq!(status("validation_error"), StatusCode::BAD_REQUEST);
    assert_eq!(status("bad_request"), StatusCode::BAD_REQUEST);
    assert_eq!(status("internal_error"), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn missing_filter_flags_default_to_enabled() {
    assert_eq!(filter_state(None, None), FilterState::default());
    assert!(!filter_state(Some(false), None).lotto);
}

#[tokio::test]
async fn health_reports_store_count() {
    let (status, headers, json) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["stores"], 8);
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        json["meta"]["request_id"].as_str(),
        headers.get("x-request-id").and_then(|v| v.to_str().ok())
    );
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"req-abc"[..])
    );
}

#[tokio::test]
async fn stores_are_type_filtered_by_primary_category() {
    let (status, _, json) = get("/api/v1/stores?pension=false").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json["data"]["items"]), vec!["1", "2", "4", "6", "7"]);
    assert_eq!(json["data"]["count"], 5);
    assert_eq!(json["data"]["items"][0]["marker"]["color"], "#ef4444");
    assert!(json["data"].get("empty_hint").is_none());
}

#[tokio::test]
async fn stores_without_any_type_carry_map_hint() {
    let (_, _, json) = get("/api/v1/stores?lotto=false&pension=false").await;
    assert_eq!(json["data"]["count"], 0);
    assert_eq!(json["data"]["empty_hint"], Tab::Map.empty_hint());
}

#[tokio::test]
async fn visible_stores_without_bounds_keep_repository_order() {
    let (status, _, json) = get("/api/v1/stores/visible").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&json["data"]["items"]),
        vec!["1", "2", "3", "4", "6", "7", "9", "15"]
    );
}

#[tokio::test]
async fn visible_stores_filter_by_bounds_and_sort_by_total() {
    let uri = "/api/v1/stores/visible?sw_lat=37.3&sw_lng=126.8&ne_lat=37.7&ne_lng=127.2";
    let (status, _, json) = get(uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json["data"]["items"]), vec!["3", "1", "9", "15", "4"]);
    assert_eq!(json["data"]["items"][0]["total_wins"], 10);
}

#[tokio::test]
async fn visible_stores_empty_viewport_has_hint() {
    let uri = "/api/v1/stores/visible?sw_lat=33.1&sw_lng=124.6&ne_lat=33.2&ne_lng=124.7";
    let (_, _, json) = get(uri).await;
    assert_eq!(json["data"]["empty_hint"], "move or zoom the map");
}

#[tokio::test]
async fn partial_bounds_are_rejected() {
    let (status, _, json) = get("/api/v1/stores/visible?sw_lat=37.0&sw_lng=126.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn store_detail_includes_history_with_draw_dates() {
    let (status, _, json) = get("/api/v1/stores/1").await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["name"], "스파 편의점");
    assert_eq!(data["region"], "서울");
    assert_eq!(data["district"], "노원구");
    assert_eq!(data["history"].as_array().map(Vec::len), Some(6));
    assert_eq!(data["history"][0]["type"], "LOTTO");
    assert_eq!(data["history"][0]["method"], "AUTO");
    // Round 1090 falls 1089 weeks after 2002-12-07.
    assert_eq!(data["history"][0]["draw_date"], "2023-10-21");
    assert_eq!(data["history_incomplete"], false);
}

#[tokio::test]
async fn unknown_store_is_not_found() {
    let (status, _, json) = get("/api/v1/stores/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn ranking_weights_first_prizes_and_awards_medals() {
    let (status, _, json) = get("/api/v1/ranking").await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["region"], "전체");
    assert_eq!(
        ids(&data["items"]),
        vec!["3", "1", "2", "9", "4", "6", "15", "7"]
    );
    assert_eq!(data["items"][0]["position"], 1);
    assert_eq!(data["items"][0]["medal"], "gold");
    assert_eq!(data["items"][2]["medal"], "bronze");
    assert!(data["items"][3].get("medal").is_none());
}

#[tokio::test]
async fn ranking_filters_by_region_and_district() {
    // 서울 / 강남구, percent-encoded.
    let uri = "/api/v1/ranking?region=%EC%84%9C%EC%9A%B8&district=%EA%B0%95%EB%82%A8%EA%B5%AC";
    let (_, _, json) = get(uri).await;
    assert_eq!(ids(&json["data"]["items"]), vec!["15"]);
    assert_eq!(json["data"]["district"], "강남구");
}

#[tokio::test]
async fn empty_ranking_carries_ranking_hint() {
    let (_, _, json) = get("/api/v1/ranking?region=%EC%A0%9C%EC%A3%BC").await;
    assert_eq!(json["data"]["count"], 0);
    assert_eq!(json["data"]["empty_hint"], "pick another region");
}

#[tokio::test]
async fn regions_and_districts() {
    let (_, _, json) = get("/api/v1/regions").await;
    assert_eq!(json["data"][0], "전체");
    assert_eq!(json["data"].as_array().map(Vec::len), Some(7));

    let (_, _, json) = get("/api/v1/regions/%EC%84%9C%EC%9A%B8/districts").await;
    assert_eq!(
        json["data"],
        serde_json::json!(["전체", "강남구", "노원구", "송파구"])
    );
}

#[tokio::test]
async fn map_config_reports_defaults_without_exposing_key() {
    let (status, _, json) = get("/api/v1/map/config").await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["level"], 7);
    assert_eq!(data["min_level"], 1);
    assert_eq!(data["max_level"], 13);
    assert_eq!(data["envelope"]["max_lat"], 38.6);
    assert_eq!(data["credential_configured"], false);
}
