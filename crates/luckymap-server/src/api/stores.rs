use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use luckymap_core::geo::{Bounds, LatLng};
use luckymap_core::lottery::draw_date;
use luckymap_core::{views, Store, Tab, WinRecord};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{filter_state, ApiError, ApiResponse, AppState, ListData, StoreItem};

#[derive(Debug, Deserialize)]
pub(super) struct StoresQuery {
    pub lotto: Option<bool>,
    pub pension: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct VisibleStoresQuery {
    pub lotto: Option<bool>,
    pub pension: Option<bool>,
    pub sw_lat: Option<f64>,
    pub sw_lng: Option<f64>,
    pub ne_lat: Option<f64>,
    pub ne_lng: Option<f64>,
}

impl VisibleStoresQuery {
    /// All four corners, or none.
    fn bounds(&self) -> Result<Option<Bounds>, String> {
        match (self.sw_lat, self.sw_lng, self.ne_lat, self.ne_lng) {
            (None, None, None, None) => Ok(None),
            (Some(sw_lat), Some(sw_lng), Some(ne_lat), Some(ne_lng)) => {
                if [sw_lat, sw_lng, ne_lat, ne_lng].iter().all(|v| v.is_finite()) {
                    Ok(Some(Bounds::new(
                        LatLng::new(sw_lat, sw_lng),
                        LatLng::new(ne_lat, ne_lng),
                    )))
                } else {
                    Err("bounds must be finite numbers".to_string())
                }
            }
            _ => Err("sw_lat, sw_lng, ne_lat and ne_lng must be given together".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct HistoryItem {
    #[serde(flatten)]
    pub record: WinRecord,
    /// Computed weekly draw date for the round.
    pub draw_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(super) struct StoreDetail {
    #[serde(flatten)]
    pub summary: StoreItem,
    pub region: Option<String>,
    pub district: Option<String>,
    pub history: Vec<HistoryItem>,
    /// Stored counters disagree with a recount of `history`.
    pub history_incomplete: bool,
}

impl From<&Store> for StoreDetail {
    fn from(store: &Store) -> Self {
        Self {
            summary: StoreItem::from(store),
            region: store.region().map(str::to_owned),
            district: store.district().map(str::to_owned),
            history: store
                .history
                .iter()
                .map(|record| HistoryItem {
                    draw_date: draw_date(record.kind, record.round),
                    record: record.clone(),
                })
                .collect(),
            history_incomplete: store.wins_diverge_from_history(),
        }
    }
}

/// Type-filtered stores: the marker set.
pub(super) async fn list_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<StoresQuery>,
) -> Json<ApiResponse<ListData<StoreItem>>> {
    let filters = filter_state(query.lotto, query.pension);
    let items = views::type_filtered(state.repo.all(), &filters)
        .into_iter()
        .map(StoreItem::from)
        .collect();
    ApiResponse::new(ListData::new(items, Tab::Map), req_id)
}

/// Map-tab list for the given viewport.
pub(super) async fn list_visible_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<VisibleStoresQuery>,
) -> Result<Json<ApiResponse<ListData<StoreItem>>>, ApiError> {
    let bounds = query
        .bounds()
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let filters = filter_state(query.lotto, query.pension);
    let filtered = views::type_filtered(state.repo.all(), &filters);
    let items = views::visible_stores(&filtered, bounds.as_ref())
        .into_iter()
        .map(StoreItem::from)
        .collect();
    Ok(ApiResponse::new(ListData::new(items, Tab::Map), req_id))
}

pub(super) async fn get_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StoreDetail>>, ApiError> {
    let Some(store) = state.repo.get(&id) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("store '{id}' not found"),
        ));
    };
    Ok(ApiResponse::new(StoreDetail::from(store), req_id))
}
