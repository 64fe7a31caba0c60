use crate::config::MapConfig;
use crate::geometry::bounds::Bounds;
use crate::model::{LatLng, Location};
use serde::{Deserialize, Serialize};

/// Identity of a rendered marker. `generation` changes on every re-render, so keys held
/// by callbacks of discarded markers never resolve to a live marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerKey {
    pub generation: u32,
    pub index: u32,
}

/// One open period of one popup. Handlers bound on open carry it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PopupSession {
    pub key: MarkerKey,
    pub serial: u64,
}

/// User interactions reported back by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(MarkerKey),
    FitControlClicked,
    DeleteClicked(PopupSession),
    PopupCloseClicked(PopupSession),
}

/// The mapping SDK as seen by the controller.
///
/// Implementations own SDK objects and forward user interactions as [`MapEvent`]s to
/// whatever sink they were built with. None of these calls may synchronously dispatch
/// an event back into the controller.
pub trait MapSurface {
    type Marker;
    type Popup;

    fn set_center(&mut self, center: LatLng);
    fn set_zoom(&mut self, zoom: f64);
    /// Current zoom, if the SDK has settled on one.
    fn zoom(&self) -> Option<f64>;
    fn fit_bounds(&mut self, bounds: &Bounds);

    /// Installs the "fit to all" control; clicks arrive as [`MapEvent::FitControlClicked`].
    fn add_fit_control(&mut self, html: &str, title: &str);

    /// Places a marker; clicks arrive as [`MapEvent::MarkerClicked`] with `key`.
    fn add_marker(&mut self, key: MarkerKey, location: &Location, cfg: &MapConfig) -> Self::Marker;
    fn remove_marker(&mut self, marker: &Self::Marker);

    fn create_popup(&mut self, html: &str, max_width: u32) -> Self::Popup;
    /// Opens `popup` anchored at `marker`. Delete and close clicks inside this open
    /// period arrive tagged with `session`, at most once each.
    fn open_popup(&mut self, popup: &Self::Popup, marker: &Self::Marker, session: PopupSession);
    fn close_popup(&mut self, popup: &Self::Popup);
}
