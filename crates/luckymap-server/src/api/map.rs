use axum::{extract::State, Extension, Json};
use luckymap_core::map::MapConfig;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct MapConfigData {
    #[serde(flatten)]
    pub config: MapConfig,
    pub credential_configured: bool,
}

/// Initial view and pan envelope for the map front end.
pub(super) async fn get_map_config(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<MapConfigData>> {
    ApiResponse::new(
        MapConfigData {
            config: state.map.as_ref().clone(),
            credential_configured: state.map_credential_configured,
        },
        req_id,
    )
}
