use serde::Serialize;

use crate::geo::LatLng;
use crate::lottery::LotteryType;
use crate::stores::Store;

/// First-place wins at or above which a marker is drawn large with a badge.
const HIGH_VALUE_THRESHOLD: u64 = 3;

/// Everything a widget needs to draw one store marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub store_id: String,
    pub position: LatLng,
    pub category: LotteryType,
    pub color: &'static str,
    pub ring_color: &'static str,
    pub size_px: u32,
    pub icon_px: u32,
    /// First-place win count, shown only on high-value markers.
    pub badge: Option<u64>,
}

impl MarkerSpec {
    #[must_use]
    pub fn for_store(store: &Store) -> Self {
        let first_prizes = store.wins.first_prize_total();
        let high_value = first_prizes >= HIGH_VALUE_THRESHOLD;
        let (color, ring_color) = match store.primary_category {
            LotteryType::Lotto => ("#ef4444", "#fecaca"),
            LotteryType::Pension => ("#3b82f6", "#bfdbfe"),
        };

        Self {
            store_id: store.id.clone(),
            position: LatLng::new(store.lat, store.lng),
            category: store.primary_category,
            color,
            ring_color,
            size_px: if high_value { 40 } else { 32 },
            icon_px: if high_value { 20 } else { 16 },
            badge: high_value.then_some(first_prizes),
        }
    }
}
