//! Application state owner.
//!
//! Each action mutates one piece of state; every view is recomputed from the
//! repository on access, so there is nothing to invalidate.

use crate::geo::Bounds;
use crate::lottery::LotteryType;
use crate::map::{MapConfig, MapError, MapSession, MapWidget};
use crate::stores::{Store, StoreRepository};
use crate::views::{self, FilterState, ALL};

pub struct AppController<W: MapWidget> {
    repo: StoreRepository,
    filters: FilterState,
    selected: Option<String>,
    bounds: Option<Bounds>,
    region: String,
    district: String,
    map: MapSession<W>,
}

impl<W: MapWidget> AppController<W> {
    #[must_use]
    pub fn new(repo: StoreRepository, map_config: MapConfig) -> Self {
        let mut controller = Self {
            repo,
            filters: FilterState::default(),
            selected: None,
            bounds: None,
            region: ALL.to_owned(),
            district: ALL.to_owned(),
            map: MapSession::new(map_config),
        };
        controller.refresh_markers();
        controller
    }

    /// Start loading the map. Without a credential the map stays unavailable
    /// and the lists keep working, unbounded by any viewport.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::MissingCredential`] when `credential` is absent or blank.
    pub fn start_map(&mut self, credential: Option<&str>) -> Result<(), MapError> {
        self.map.begin_load(credential)
    }

    /// The map SDK finished loading and `widget` is ready to use.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotLoading`] if [`AppController::start_map`] did not
    /// succeed first.
    pub fn map_ready(&mut self, widget: W) -> Result<(), MapError> {
        let bounds = self.map.attach(widget)?;
        self.bounds = Some(bounds);
        Ok(())
    }

    pub fn map_load_failed(&mut self, reason: &str) -> MapError {
        self.map.load_failed(reason)
    }

    pub fn toggle_filter(&mut self, kind: LotteryType) {
        self.filters.toggle(kind);
        tracing::debug!(%kind, enabled = self.filters.is_enabled(kind), "filter toggled");
        self.refresh_markers();
    }

    /// Select `store_id`, or clear the selection if it is already selected.
    ///
    /// A newly selected store is focused on the map. Unknown ids are ignored.
    pub fn select(&mut self, store_id: &str) {
        if self.selected.as_deref() == Some(store_id) {
            self.selected = None;
            return;
        }

        let Some(store) = self.repo.get(store_id) else {
            tracing::warn!(store_id, "ignoring selection of unknown store");
            return;
        };
        self.selected = Some(store.id.clone());
        self.map.focus(store);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Forward the widget's pan-completed event; accepted bounds are published.
    pub fn handle_pan_completed(&mut self) {
        if let Some(bounds) = self.map.on_pan_completed() {
            self.bounds = Some(bounds);
        }
    }

    pub fn handle_zoom_changed(&mut self) {
        if let Some(bounds) = self.map.on_zoom_changed() {
            self.bounds = Some(bounds);
        }
    }

    /// Change the region selector. The district selector resets to ALL.
    pub fn select_region(&mut self, region: &str) {
        region.clone_into(&mut self.region);
        self.district = ALL.to_owned();
    }

    pub fn select_district(&mut self, district: &str) {
        district.clone_into(&mut self.district);
    }

    fn refresh_markers(&mut self) {
        let stores = views::type_filtered(self.repo.all(), &self.filters);
        self.map.replace_markers(&stores);
    }

    #[must_use]
    pub fn repository(&self) -> &StoreRepository {
        &self.repo
    }

    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.filters
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn selected_store(&self) -> Option<&Store> {
        self.selected.as_deref().and_then(|id| self.repo.get(id))
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn district(&self) -> &str {
        &self.district
    }

    #[must_use]
    pub fn map(&self) -> &MapSession<W> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapSession<W> {
        &mut self.map
    }

    /// Stores shown as markers.
    #[must_use]
    pub fn filtered_stores(&self) -> Vec<&Store> {
        views::type_filtered(self.repo.all(), &self.filters)
    }

    /// Map-tab list.
    #[must_use]
    pub fn visible_stores(&self) -> Vec<&Store> {
        views::visible_stores(&self.filtered_stores(), self.bounds.as_ref())
    }

    #[must_use]
    pub fn regions(&self) -> Vec<String> {
        views::regions(&self.filtered_stores())
    }

    #[must_use]
    pub fn districts(&self) -> Vec<String> {
        views::districts(&self.filtered_stores(), &self.region)
    }

    /// Ranking-tab list.
    #[must_use]
    pub fn ranking(&self) -> Vec<&Store> {
        views::ranking(&self.filtered_stores(), &self.region, &self.district)
    }
}
