use crate::geo::{Bounds, LatLng};

use super::MarkerSpec;

/// Handle for an overlay placed on a [`MapWidget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// The interactive map the application drives.
///
/// Implemented by whatever hosts the map SDK. Event delivery is inverted:
/// the host calls [`super::MapSession::on_pan_completed`] and
/// [`super::MapSession::on_zoom_changed`] when the widget reports those events,
/// including when a programmatic animation settles.
pub trait MapWidget {
    fn center(&self) -> LatLng;

    /// Move the view immediately.
    fn set_center(&mut self, center: LatLng);

    /// Move the view with a smooth animation.
    fn pan_to(&mut self, center: LatLng);

    fn level(&self) -> u8;

    /// Request a zoom level. The widget clamps it to its configured range.
    fn set_level(&mut self, level: u8);

    fn set_level_range(&mut self, min: u8, max: u8);

    fn bounds(&self) -> Bounds;

    /// Place a marker. Clicking it should dispatch a selection of
    /// `marker.store_id` back to the controller.
    fn add_overlay(&mut self, marker: &MarkerSpec) -> OverlayId;

    fn remove_overlay(&mut self, id: OverlayId);
}
