//! In-memory stand-in for the map widget.

use std::collections::BTreeMap;

use luckymap_core::map::{MapWidget, MarkerSpec, OverlayId};
use luckymap_core::{Bounds, LatLng};

/// Viewport is a fixed angular size per level; animations settle instantly.
#[derive(Debug, Default)]
pub struct FakeMap {
    pub center: Option<LatLng>,
    pub level: u8,
    pub range: Option<(u8, u8)>,
    pub overlays: BTreeMap<u64, MarkerSpec>,
    pub pans: Vec<LatLng>,
    next_id: u64,
}

impl FakeMap {
    /// Latitude span of the viewport at `level`.
    pub fn span(level: u8) -> f64 {
        0.05 * f64::from(level)
    }

    pub fn bounds_at(center: LatLng, level: u8) -> Bounds {
        Bounds::around(center, Self::span(level), Self::span(level) * 1.25)
    }

    /// Simulate the user dragging the map; no event is fired.
    pub fn drag_to(&mut self, center: LatLng) {
        self.center = Some(center);
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.overlays.values().map(|m| m.store_id.clone()).collect()
    }
}

impl MapWidget for FakeMap {
    fn center(&self) -> LatLng {
        self.center.unwrap_or(LatLng::new(0.0, 0.0))
    }

    fn set_center(&mut self, center: LatLng) {
        self.center = Some(center);
    }

    fn pan_to(&mut self, center: LatLng) {
        self.pans.push(center);
        self.center = Some(center);
    }

    fn level(&self) -> u8 {
        self.level
    }

    fn set_level(&mut self, level: u8) {
        self.level = match self.range {
            Some((min, max)) => level.clamp(min, max),
            None => level,
        };
    }

    fn set_level_range(&mut self, min: u8, max: u8) {
        self.range = Some((min, max));
    }

    fn bounds(&self) -> Bounds {
        Self::bounds_at(self.center(), self.level)
    }

    fn add_overlay(&mut self, marker: &MarkerSpec) -> OverlayId {
        self.next_id += 1;
        self.overlays.insert(self.next_id, marker.clone());
        OverlayId(self.next_id)
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id.0);
    }
}
