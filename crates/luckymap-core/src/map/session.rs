use serde::Serialize;

use crate::geo::{Bounds, Envelope, LatLng};
use crate::stores::Store;

use super::guard::{PanOutcome, ViewportGuard};
use super::{MapError, MapWidget, MarkerSpec, OverlayId};

const KM_PER_LAT_DEGREE: f64 = 111.0;
/// Reference screen width used for the approximate scale denominator.
const SCALE_REFERENCE_WIDTH_PX: f64 = 800.0;

#[derive(Debug, Clone, Serialize)]
pub struct MapConfig {
    pub center: LatLng,
    pub level: u8,
    pub min_level: u8,
    pub max_level: u8,
    /// Level requested when focusing a selected store. This is a real zoom-in:
    /// asking for a level above `max_level` would be clamped to the widest view
    /// instead of closing in on the store.
    pub focus_level: u8,
    pub envelope: Envelope,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(36.5, 127.8),
            level: 7,
            min_level: 1,
            max_level: 13,
            focus_level: 3,
            envelope: Envelope::KOREA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    /// No credential; the map will never initialize.
    Unavailable,
    Failed,
}

/// Snapshot of the current view for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct MapInfo {
    pub zoom_level: u8,
    pub center: LatLng,
    pub bounds: Bounds,
    pub diagonal_km: f64,
    pub lat_km: f64,
    pub lng_km: f64,
    /// Approximate `1:scale` denominator.
    pub scale: u64,
}

impl MapInfo {
    fn measure(zoom_level: u8, center: LatLng, bounds: Bounds) -> Self {
        let lat_km = (bounds.ne.lat - bounds.sw.lat) * KM_PER_LAT_DEGREE;
        let mid_lat = ((bounds.sw.lat + bounds.ne.lat) / 2.0).to_radians();
        let lng_km = (bounds.ne.lng - bounds.sw.lng) * KM_PER_LAT_DEGREE * mid_lat.cos();
        let diagonal_km = lat_km.hypot(lng_km);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scale = (diagonal_km * 1000.0 / SCALE_REFERENCE_WIDTH_PX).round() as u64;

        Self {
            zoom_level,
            center,
            bounds,
            diagonal_km,
            lat_km,
            lng_km,
            scale,
        }
    }
}

/// Owned handle on the map widget and everything placed on it.
///
/// Nothing touches the widget until [`MapSession::attach`] delivers it; marker
/// updates requested earlier are held and applied on attach.
pub struct MapSession<W: MapWidget> {
    config: MapConfig,
    state: SessionState,
    widget: Option<W>,
    guard: ViewportGuard,
    overlays: Vec<OverlayId>,
    pending_markers: Option<Vec<MarkerSpec>>,
}

impl<W: MapWidget> MapSession<W> {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        let guard = ViewportGuard::new(config.envelope, config.center);
        Self {
            config,
            state: SessionState::Idle,
            widget: None,
            guard,
            overlays: Vec::new(),
            pending_markers: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Start loading the map SDK with `credential`. Repeated calls while
    /// loading or ready are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::MissingCredential`] when no credential is
    /// configured. The session then stays unavailable; the rest of the
    /// application keeps working without markers.
    pub fn begin_load(&mut self, credential: Option<&str>) -> Result<(), MapError> {
        if matches!(self.state, SessionState::Loading | SessionState::Ready) {
            tracing::debug!(state = ?self.state, "map load already in progress");
            return Ok(());
        }

        match credential.map(str::trim) {
            Some(key) if !key.is_empty() => {
                tracing::info!("loading map script");
                self.state = SessionState::Loading;
                Ok(())
            }
            _ => {
                tracing::error!(
                    "map credential is not set; add KAKAO_MAP_API_KEY to the environment or .env"
                );
                self.state = SessionState::Unavailable;
                Err(MapError::MissingCredential)
            }
        }
    }

    /// Record that the map script failed to load. There is no retry.
    pub fn load_failed(&mut self, reason: &str) -> MapError {
        tracing::error!(reason, "map script failed to load");
        tracing::error!(
            "possible causes: the key is invalid; no web platform is registered for it; \
             a REST key was used instead of a JavaScript key; the domain is not allow-listed"
        );
        self.state = SessionState::Failed;
        MapError::LoadFailed(reason.to_owned())
    }

    /// Ready signal: take ownership of the initialized widget.
    ///
    /// Applies the configured center, level and level range, records the
    /// default center as last-known-good, places any markers requested while
    /// loading, and returns the initial bounds to publish.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotLoading`] unless [`MapSession::begin_load`]
    /// succeeded first.
    pub fn attach(&mut self, mut widget: W) -> Result<Bounds, MapError> {
        if self.state != SessionState::Loading {
            return Err(MapError::NotLoading { state: self.state });
        }

        widget.set_level_range(self.config.min_level, self.config.max_level);
        widget.set_center(self.config.center);
        widget.set_level(self.config.level);
        self.guard.remember(self.config.center);

        let bounds = widget.bounds();
        self.widget = Some(widget);
        self.state = SessionState::Ready;
        tracing::info!(level = self.config.level, "map ready");

        if let Some(pending) = self.pending_markers.take() {
            self.place_markers(pending);
        }

        Ok(bounds)
    }

    /// Replace every marker with one per store (clear, then add).
    pub fn replace_markers(&mut self, stores: &[&Store]) {
        let specs: Vec<MarkerSpec> = stores.iter().map(|s| MarkerSpec::for_store(s)).collect();
        if self.is_ready() {
            self.place_markers(specs);
        } else {
            self.pending_markers = Some(specs);
        }
    }

    fn place_markers(&mut self, specs: Vec<MarkerSpec>) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        for id in self.overlays.drain(..) {
            widget.remove_overlay(id);
        }
        self.overlays = specs.iter().map(|spec| widget.add_overlay(spec)).collect();
        tracing::debug!(markers = self.overlays.len(), "markers replaced");
    }

    /// Handle the widget's "pan completed" event.
    ///
    /// Returns the bounds to publish, or `None` when the map is not ready or
    /// the pan left the envelope (the view is then animated back and the
    /// settle of that animation produces the next publication).
    pub fn on_pan_completed(&mut self) -> Option<Bounds> {
        let widget = self.widget.as_mut()?;
        match self.guard.evaluate_pan(widget.bounds(), widget.center()) {
            PanOutcome::Accepted(bounds) => Some(bounds),
            PanOutcome::Rejected { recenter } => {
                tracing::debug!(
                    lat = recenter.lat,
                    lng = recenter.lng,
                    "pan left the envelope; returning to last good center"
                );
                widget.pan_to(recenter);
                None
            }
        }
    }

    /// Handle the widget's "zoom changed" event. Zoom is always accepted.
    pub fn on_zoom_changed(&mut self) -> Option<Bounds> {
        self.widget.as_ref().map(MapWidget::bounds)
    }

    /// Zoom in on a store and pan to it.
    pub fn focus(&mut self, store: &Store) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        widget.set_level(self.config.focus_level);
        widget.pan_to(LatLng::new(store.lat, store.lng));
    }

    #[must_use]
    pub fn zoom_level(&self) -> Option<u8> {
        self.widget.as_ref().map(MapWidget::level)
    }

    #[must_use]
    pub fn current_bounds(&self) -> Option<Bounds> {
        self.widget.as_ref().map(MapWidget::bounds)
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn info(&self) -> Option<MapInfo> {
        let widget = self.widget.as_ref()?;
        Some(MapInfo::measure(
            widget.level(),
            widget.center(),
            widget.bounds(),
        ))
    }

    /// Borrow the widget, e.g. to forward host-specific calls.
    #[must_use]
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }
}
