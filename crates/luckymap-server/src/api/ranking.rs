use axum::{
    extract::{Query, State},
    Extension, Json,
};
use luckymap_core::{views, Medal, Tab, ALL};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{filter_state, ApiResponse, AppState, ListData, StoreItem};

#[derive(Debug, Deserialize)]
pub(super) struct RankingQuery {
    pub lotto: Option<bool>,
    pub pension: Option<bool>,
    pub region: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct RankingRow {
    /// 1-based.
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<Medal>,
    #[serde(flatten)]
    pub store: StoreItem,
}

#[derive(Debug, Serialize)]
pub(super) struct RankingData {
    pub region: String,
    pub district: String,
    #[serde(flatten)]
    pub list: ListData<RankingRow>,
}

/// Blank or missing selectors mean ALL.
fn selector(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ALL.to_owned())
}

pub(super) async fn list_ranking(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RankingQuery>,
) -> Json<ApiResponse<RankingData>> {
    let filters = filter_state(query.lotto, query.pension);
    let region = selector(query.region);
    let district = selector(query.district);

    let filtered = views::type_filtered(state.repo.all(), &filters);
    let rows = views::ranking(&filtered, &region, &district)
        .into_iter()
        .enumerate()
        .map(|(index, store)| RankingRow {
            position: index + 1,
            medal: Medal::for_position(index + 1),
            store: StoreItem::from(store),
        })
        .collect();

    ApiResponse::new(
        RankingData {
            region,
            district,
            list: ListData::new(rows, Tab::Ranking),
        },
        req_id,
    )
}
