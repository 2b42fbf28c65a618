use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use luckymap_core::views;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{filter_state, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RegionsQuery {
    pub lotto: Option<bool>,
    pub pension: Option<bool>,
}

/// Region selector options, ALL first.
pub(super) async fn list_regions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RegionsQuery>,
) -> Json<ApiResponse<Vec<String>>> {
    let filters = filter_state(query.lotto, query.pension);
    let stores = views::type_filtered(state.repo.all(), &filters);
    ApiResponse::new(views::regions(&stores), req_id)
}

/// District selector options for one region, ALL first.
pub(super) async fn list_districts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(region): Path<String>,
    Query(query): Query<RegionsQuery>,
) -> Json<ApiResponse<Vec<String>>> {
    let filters = filter_state(query.lotto, query.pension);
    let stores = views::type_filtered(state.repo.all(), &filters);
    ApiResponse::new(views::districts(&stores, &region), req_id)
}
