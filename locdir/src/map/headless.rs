//! In-memory [`MapSurface`] that keeps the view and overlays as plain data.
//!
//! It computes `fit_bounds` with the same Web Mercator math the SDK uses, which makes it
//! suitable for running the controller outside a browser.

use super::surface::{MapSurface, MarkerKey, PopupSession};
use crate::config::MapConfig;
use crate::geometry::bounds::{Bounds, Viewport};
use crate::limits::clamp_zoom;
use crate::model::{LatLng, Location, RecordId};

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessMarker {
    pub slot: usize,
    pub key: MarkerKey,
    pub id: RecordId,
    pub title: String,
    pub position: LatLng,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessPopup {
    pub slot: usize,
    pub html: String,
    pub max_width: u32,
}

#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    pub viewport: Option<Viewport>,
    pub center: Option<LatLng>,
    pub zoom: Option<f64>,
    pub fit_calls: usize,
    pub controls: Vec<String>,
    /// Markers ever created; `None` once removed from the map.
    pub markers: Vec<Option<HeadlessMarker>>,
    pub popups: Vec<HeadlessPopup>,
    /// (popup slot, session) of every currently open popup, in opening order.
    pub open: Vec<(usize, PopupSession)>,
    /// Every popup slot closed, in order.
    pub closed: Vec<usize>,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        HeadlessSurface { viewport: Some(viewport), ..Default::default() }
    }

    pub fn live_markers(&self) -> impl Iterator<Item = &HeadlessMarker> {
        self.markers.iter().filter_map(|m| m.as_ref())
    }

    pub fn open_popup_html(&self) -> Option<&str> {
        self.open.last().map(|(slot, _)| self.popups[*slot].html.as_str())
    }
}

impl MapSurface for HeadlessSurface {
    type Marker = usize;
    type Popup = usize;

    fn set_center(&mut self, center: LatLng) { self.center = Some(center); }

    fn set_zoom(&mut self, zoom: f64) { self.zoom = Some(clamp_zoom(zoom)); }

    fn zoom(&self) -> Option<f64> { self.zoom }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.fit_calls += 1;
        let vp = self.viewport.unwrap_or(Viewport { width: 640.0, height: 480.0 });
        if let (Some(c), Some(z)) = (bounds.center(), bounds.fit_zoom(vp)) {
            self.center = Some(c);
            self.zoom = Some(z);
        }
    }

    fn add_fit_control(&mut self, _html: &str, title: &str) { self.controls.push(title.to_string()); }

    fn add_marker(&mut self, key: MarkerKey, location: &Location, _cfg: &MapConfig) -> usize {
        let slot = self.markers.len();
        self.markers.push(Some(HeadlessMarker {
            slot,
            key,
            id: location.id.clone(),
            title: location.name.clone(),
            position: location.position(),
        }));
        slot
    }

    fn remove_marker(&mut self, marker: &usize) {
        if let Some(m) = self.markers.get_mut(*marker) { *m = None; }
    }

    fn create_popup(&mut self, html: &str, max_width: u32) -> usize {
        let slot = self.popups.len();
        self.popups.push(HeadlessPopup { slot, html: html.to_string(), max_width });
        slot
    }

    fn open_popup(&mut self, popup: &usize, _marker: &usize, session: PopupSession) {
        self.open.push((*popup, session));
    }

    fn close_popup(&mut self, popup: &usize) {
        self.open.retain(|(slot, _)| slot != popup);
        self.closed.push(*popup);
    }
}
