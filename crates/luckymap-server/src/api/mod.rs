mod map;
mod ranking;
mod regions;
mod stores;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use luckymap_core::map::{MapConfig, MarkerSpec};
use luckymap_core::{FilterState, LotteryType, Store, StoreRepository, Tab, WinStats};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<StoreRepository>,
    pub map: Arc<MapConfig>,
    /// Whether a map credential is configured; the key itself is never served.
    pub map_credential_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    stores: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, req_id: RequestId) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(req_id.0),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// A list view plus the empty-state message for its tab.
#[derive(Debug, Serialize)]
pub(super) struct ListData<T: Serialize> {
    pub count: usize,
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_hint: Option<&'static str>,
}

impl<T: Serialize> ListData<T> {
    pub(super) fn new(items: Vec<T>, tab: Tab) -> Self {
        Self {
            count: items.len(),
            empty_hint: items.is_empty().then(|| tab.empty_hint()),
            items,
        }
    }
}

/// Store summary as listed on the map and ranking tabs.
#[derive(Debug, Serialize)]
pub(super) struct StoreItem {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub primary_category: LotteryType,
    pub wins: WinStats,
    pub total_wins: u64,
    pub first_prize_wins: u64,
    pub marker: MarkerSpec,
}

impl From<&Store> for StoreItem {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
            address: store.address.clone(),
            lat: store.lat,
            lng: store.lng,
            primary_category: store.primary_category,
            wins: store.wins,
            total_wins: store.wins.total(),
            first_prize_wins: store.wins.first_prize_total(),
            marker: MarkerSpec::for_store(store),
        }
    }
}

/// Missing flags mean enabled.
pub(super) fn filter_state(lotto: Option<bool>, pension: Option<bool>) -> FilterState {
    FilterState {
        lotto: lotto.unwrap_or(true),
        pension: pension.unwrap_or(true),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/stores", get(stores::list_stores))
        .route("/api/v1/stores/visible", get(stores::list_visible_stores))
        .route("/api/v1/stores/{id}", get(stores::get_store))
        .route("/api/v1/ranking", get(ranking::list_ranking))
        .route("/api/v1/regions", get(regions::list_regions))
        .route(
            "/api/v1/regions/{region}/districts",
            get(regions::list_districts),
        )
        .route("/api/v1/map/config", get(map::get_map_config))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    ApiResponse::new(
        HealthData {
            status: "ok",
            stores: state.repo.len(),
        },
        req_id,
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
