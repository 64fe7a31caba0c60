mod surface;
pub mod headless;

pub use surface::{MapEvent, MapSurface, MarkerKey, PopupSession};

use crate::config::MapConfig;
use crate::geometry::bounds::Bounds;
use crate::model::{LatLng, Location, RecordId};
use crate::popup::{render_fit_control, render_popup, DeleteRequest};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MapState {
    Ready,
    Populated { markers: usize, open: Option<RecordId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeolocationFailure {
    Unsupported,
    Failed(String),
}

impl fmt::Display for GeolocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationFailure::Unsupported => f.write_str("Error: Your browser doesn't support geolocation."),
            GeolocationFailure::Failed(reason) if reason.is_empty() => f.write_str("Error: The Geolocation service failed."),
            GeolocationFailure::Failed(reason) => write!(f, "Error: The Geolocation service failed. ({})", reason),
        }
    }
}

/// Result of feeding a [`MapEvent`] to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum MapOutcome {
    Ignored,
    PopupOpened(PopupSession),
    Fitted,
    /// The page must fill and show the delete confirmation dialog.
    DeleteRequested(DeleteRequest),
    PopupDismissed,
}

struct TrackedMarker<S: MapSurface> {
    key: MarkerKey,
    location: Location,
    marker: S::Marker,
    popup: S::Popup,
}

/// Owns the map surface, the rendered markers and the single active popup.
pub struct MapController<S: MapSurface> {
    surface: S,
    config: MapConfig,
    markers: Vec<TrackedMarker<S>>,
    generation: u32,
    active: Option<PopupSession>,
    next_serial: u64,
}

impl<S: MapSurface> MapController<S> {
    /// Centers `surface` on the default view, renders `locations` when non-empty and
    /// installs the fit control.
    pub fn initialize(mut surface: S, config: MapConfig, locations: &[Location]) -> Self {
        surface.set_center(config.default_center);
        surface.set_zoom(config.default_zoom);
        let mut ctl = MapController { surface, config, markers: Vec::new(), generation: 0, active: None, next_serial: 0 };
        if !locations.is_empty() {
            ctl.render_all(locations);
        }
        let html = render_fit_control(&ctl.config);
        let title = ctl.config.fit_control_title.clone();
        ctl.surface.add_fit_control(&html, &title);
        ctl
    }

    pub fn config(&self) -> &MapConfig { &self.config }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn marker_count(&self) -> usize { self.markers.len() }
    pub fn active_session(&self) -> Option<PopupSession> { self.active }

    pub fn marker_keys(&self) -> Vec<MarkerKey> { self.markers.iter().map(|m| m.key).collect() }

    pub fn location(&self, key: MarkerKey) -> Option<&Location> { self.tracked(key).map(|m| &m.location) }

    pub fn active_location(&self) -> Option<&Location> { self.active.and_then(|s| self.location(s.key)) }

    pub fn state(&self) -> MapState {
        if self.markers.is_empty() {
            return MapState::Ready;
        }
        MapState::Populated { markers: self.markers.len(), open: self.active_location().map(|l| l.id.clone()) }
    }

    /// Replaces every marker with one per location, then fits the view to them.
    /// Returns the number of markers on the map.
    pub fn render_all(&mut self, locations: &[Location]) -> usize {
        self.clear_all();
        self.generation = self.generation.wrapping_add(1);
        for (i, loc) in locations.iter().enumerate() {
            let key = MarkerKey { generation: self.generation, index: i as u32 };
            self.create_marker(key, loc);
        }
        tracing::debug!(generation = self.generation, markers = self.markers.len(), "rendered markers");
        if !self.markers.is_empty() {
            self.fit_to_all();
        }
        self.markers.len()
    }

    pub fn refresh(&mut self, locations: &[Location]) -> usize { self.render_all(locations) }

    fn create_marker(&mut self, key: MarkerKey, loc: &Location) {
        let marker = self.surface.add_marker(key, loc, &self.config);
        let html = render_popup(loc, &self.config);
        let popup = self.surface.create_popup(&html, self.config.popup_max_width);
        self.markers.push(TrackedMarker { key, location: loc.clone(), marker, popup });
    }

    /// Detaches every marker. The open popup, if any, goes with its marker.
    pub fn clear_all(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        if let Some(s) = self.active.take() {
            self.close_popup_of(s.key);
        }
        for m in self.markers.drain(..) {
            self.surface.remove_marker(&m.marker);
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Fits the view to all markers without zooming past `max_fit_zoom`.
    /// Returns `false` when there is nothing to fit.
    pub fn fit_to_all(&mut self) -> bool {
        if self.markers.is_empty() {
            return false;
        }
        let bounds = Bounds::from_points(self.markers.iter().map(|m| m.location.position()));
        self.surface.fit_bounds(&bounds);
        let max = self.config.max_fit_zoom;
        if self.surface.zoom().map_or(false, |z| z > max) {
            self.surface.set_zoom(max);
        }
        true
    }

    /// Closes the active popup, opens the one of `key` and makes it active.
    pub fn open_marker(&mut self, key: MarkerKey) -> Option<PopupSession> {
        let idx = self.index_of(key)?;
        if let Some(prev) = self.active.take() {
            self.close_popup_of(prev.key);
        }
        self.next_serial += 1;
        let session = PopupSession { key, serial: self.next_serial };
        let m = &self.markers[idx];
        self.surface.open_popup(&m.popup, &m.marker, session);
        self.active = Some(session);
        Some(session)
    }

    /// Centers on `pos` at the focus zoom, then opens the marker of `id` as if clicked.
    pub fn recenter_and_open(&mut self, pos: LatLng, id: &RecordId) -> Option<PopupSession> {
        self.recenter(pos);
        let key = self.markers.iter().find(|m| &m.location.id == id).map(|m| m.key)?;
        self.open_marker(key)
    }

    /// Centers on `pos` at the focus zoom without touching markers or popups.
    pub fn recenter(&mut self, pos: LatLng) {
        self.surface.set_center(pos);
        self.surface.set_zoom(self.config.focus_zoom);
    }

    /// Delete clicked inside the popup opened as `session`. Stale sessions are ignored.
    pub fn request_delete(&mut self, session: PopupSession) -> Option<DeleteRequest> {
        if self.active != Some(session) {
            tracing::debug!(?session, "ignoring delete from inactive popup");
            return None;
        }
        let req = DeleteRequest::for_location(&self.tracked(session.key)?.location, &self.config);
        self.close_popup_of(session.key);
        self.active = None;
        Some(req)
    }

    /// The user closed the popup through its own close button.
    pub fn dismiss_popup(&mut self, session: PopupSession) -> bool {
        if self.active == Some(session) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn geolocation_resolved(&mut self, result: Result<LatLng, GeolocationFailure>) {
        match result {
            Ok(pos) if pos.is_finite() => {
                tracing::info!(lat = pos.lat, lng = pos.lng, "centering on user position");
                self.surface.set_center(pos);
                self.surface.set_zoom(self.config.geolocated_zoom);
            }
            Ok(_) => tracing::info!("geolocation returned a non-finite position; keeping default view"),
            Err(e) => tracing::info!(reason = %e, "geolocation unavailable; keeping default view"),
        }
    }

    pub fn handle_event(&mut self, event: MapEvent) -> MapOutcome {
        match event {
            MapEvent::MarkerClicked(key) => self.open_marker(key).map_or(MapOutcome::Ignored, MapOutcome::PopupOpened),
            MapEvent::FitControlClicked => {
                if self.fit_to_all() { MapOutcome::Fitted } else { MapOutcome::Ignored }
            }
            MapEvent::DeleteClicked(session) => self.request_delete(session).map_or(MapOutcome::Ignored, MapOutcome::DeleteRequested),
            MapEvent::PopupCloseClicked(session) => {
                if self.dismiss_popup(session) { MapOutcome::PopupDismissed } else { MapOutcome::Ignored }
            }
        }
    }

    fn index_of(&self, key: MarkerKey) -> Option<usize> {
        if key.generation != self.generation {
            return None;
        }
        let idx = key.index as usize;
        (idx < self.markers.len()).then_some(idx)
    }

    fn close_popup_of(&mut self, key: MarkerKey) {
        if let Some(idx) = self.index_of(key) {
            self.surface.close_popup(&self.markers[idx].popup);
        }
    }

    fn tracked(&self, key: MarkerKey) -> Option<&TrackedMarker<S>> { self.index_of(key).map(|i| &self.markers[i]) }
}
