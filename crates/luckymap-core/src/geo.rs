//! Coordinates, viewport bounds and the fixed pan envelope.
//!
//! All rectangles are plain axis-aligned boxes in decimal degrees; nothing
//! here handles the anti-meridian or the poles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Visible map viewport as a southwest/northeast corner pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl Bounds {
    #[must_use]
    pub const fn new(sw: LatLng, ne: LatLng) -> Self {
        Self { sw, ne }
    }

    /// Bounds of a viewport of the given angular size centred on `center`.
    #[must_use]
    pub fn around(center: LatLng, lat_span: f64, lng_span: f64) -> Self {
        Self {
            sw: LatLng::new(center.lat - lat_span / 2.0, center.lng - lng_span / 2.0),
            ne: LatLng::new(center.lat + lat_span / 2.0, center.lng + lng_span / 2.0),
        }
    }

    /// Inclusive on every edge: a point on a boundary line is inside.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.sw.lat <= lat && lat <= self.ne.lat && self.sw.lng <= lng && lng <= self.ne.lng
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lng + self.ne.lng) / 2.0,
        )
    }
}

/// Fixed rectangle the map viewport may not leave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Envelope {
    /// South Korea, Jeju to the DMZ and the western islands to Dokdo.
    pub const KOREA: Envelope = Envelope {
        min_lat: 33.0,
        max_lat: 38.6,
        min_lng: 124.5,
        max_lng: 132.0,
    };

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    /// Both viewport corners must lie inside the envelope.
    #[must_use]
    pub fn admits(&self, bounds: &Bounds) -> bool {
        self.contains(bounds.sw) && self.contains(bounds.ne)
    }
}
