use crate::error;
use crate::interop::{get_kv, global_path, to_js};
use crate::surface::{EventSink, GoogleMapSurface};
use locdir::catalog;
use locdir::map::{GeolocationFailure, MapController, MapEvent, MapOutcome};
use locdir::{LatLng, Location, LocdirError, MapConfig, RecordId, SelectorConfig};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type Controller = MapController<GoogleMapSurface>;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn from_js<T: DeserializeOwned + Default>(v: JsValue) -> locdir::Result<T> {
    if v.is_undefined() || v.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(v).map_err(|e| LocdirError::invalid_config(e.to_string()))
}

fn map_config(v: JsValue) -> locdir::Result<MapConfig> {
    let cfg: MapConfig = from_js(v)?;
    cfg.validate()?;
    Ok(cfg)
}

fn locations_from(v: JsValue) -> Result<Vec<Location>, JsValue> {
    serde_wasm_bindgen::from_value(v).map_err(|e| error::invalid_locations(e.to_string()))
}

/// Locations passed in explicitly, else `window.locations`, else none.
fn page_locations(v: JsValue) -> Result<Vec<Location>, JsValue> {
    let v = if v.is_undefined() || v.is_null() { global_path("locations") } else { v };
    if v.is_undefined() || v.is_null() {
        return Ok(Vec::new());
    }
    locations_from(v)
}

fn record_id(v: &JsValue) -> Option<RecordId> {
    if let Some(s) = v.as_string() {
        return Some(RecordId::Text(s));
    }
    v.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| RecordId::Int(f as i64))
}

#[wasm_bindgen]
pub fn init_selectors(config: JsValue) -> JsValue {
    let r = from_js::<SelectorConfig>(config)
        .and_then(|cfg| cfg.validate().map(|_| cfg))
        .and_then(crate::selectors::init)
        .map(|_| JsValue::TRUE);
    error::result(r)
}

/// The map page: one controller per page session.
#[wasm_bindgen]
pub struct MapView {
    inner: Rc<RefCell<Controller>>,
}

#[wasm_bindgen]
impl MapView {
    /// Creates the map, renders the page's locations and asks for the user's position.
    /// Throws an error envelope when the container or the SDK is missing.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, locations: JsValue) -> Result<MapView, JsValue> {
        let cfg = map_config(config).map_err(|e| error::from_error(&e))?;
        let locations = page_locations(locations)?;
        let doc = crate::dom::document().map_err(|e| error::from_error(&e))?;

        // The sink is installed before the controller exists; it only ever sees a Weak.
        let slot: Rc<RefCell<Weak<RefCell<Controller>>>> = Rc::new(RefCell::new(Weak::new()));
        let sink_slot = Rc::clone(&slot);
        let sink: EventSink = Rc::new(move |event: MapEvent| {
            let weak = sink_slot.borrow().clone();
            wasm_bindgen_futures::spawn_local(async move { dispatch(&weak, event) });
        });

        let surface = GoogleMapSurface::create(doc, &cfg, sink)?;
        let inner = Rc::new(RefCell::new(MapController::initialize(surface, cfg, &locations)));
        *slot.borrow_mut() = Rc::downgrade(&inner);
        request_geolocation(Rc::downgrade(&inner));
        Ok(MapView { inner })
    }

    /// Replaces all markers; `{ok, value: markerCount}`.
    pub fn update_markers(&self, locations: JsValue) -> JsValue {
        match locations_from(locations) {
            Ok(locs) => error::ok(JsValue::from_f64(self.inner.borrow_mut().refresh(&locs) as f64)),
            Err(e) => e,
        }
    }

    /// Centers on `(lat, lng)` at focus zoom and opens the popup of `id` if rendered;
    /// `{ok, value: opened}`. An id that is neither a string nor an integer matches no
    /// marker, so only the view moves.
    pub fn center_map(&self, lat: f64, lng: f64, id: JsValue) -> JsValue {
        if !lat.is_finite() {
            return error::from_error(&LocdirError::NonFinite { param: "lat" });
        }
        if !lng.is_finite() {
            return error::from_error(&LocdirError::NonFinite { param: "lng" });
        }
        let pos = LatLng::new(lat, lng);
        let mut inner = self.inner.borrow_mut();
        let opened = match record_id(&id) {
            Some(id) => inner.recenter_and_open(pos, &id).is_some(),
            None => {
                inner.recenter(pos);
                false
            }
        };
        error::ok(JsValue::from_bool(opened))
    }

    pub fn clear_markers(&self) { self.inner.borrow_mut().clear_all(); }

    pub fn fit_to_markers(&self) -> bool { self.inner.borrow_mut().fit_to_all() }

    pub fn marker_count(&self) -> u32 { self.inner.borrow().marker_count() as u32 }

    /// `{state: "ready"}` or `{state: "populated", markers, open}`.
    pub fn state(&self) -> JsValue { to_js(&self.inner.borrow().state()) }
}

fn dispatch(weak: &Weak<RefCell<Controller>>, event: MapEvent) {
    let Some(inner) = weak.upgrade() else { return };
    let outcome = inner.borrow_mut().handle_event(event);
    if let MapOutcome::DeleteRequested(req) = outcome {
        let ids = inner.borrow().config().delete_dialog.clone();
        let shown = crate::dom::document().and_then(|doc| crate::dom::show_delete_dialog(&doc, &ids, &req));
        if let Err(e) = shown {
            crate::log::warn(&e.to_string());
        }
    }
}

fn resolve_geolocation(weak: &Weak<RefCell<Controller>>, result: Result<LatLng, GeolocationFailure>) {
    if let Err(e) = &result {
        crate::log::info(&e.to_string());
    }
    if let Some(inner) = weak.upgrade() {
        inner.borrow_mut().geolocation_resolved(result);
    }
}

fn request_geolocation(weak: Weak<RefCell<Controller>>) {
    let geo = web_sys::window().and_then(|w| w.navigator().geolocation().ok());
    let Some(geo) = geo else {
        resolve_geolocation(&weak, Err(GeolocationFailure::Unsupported));
        return;
    };
    let w_ok = weak.clone();
    let on_ok = Closure::once_into_js(move |pos: JsValue| {
        let coords = get_kv(&pos, "coords");
        let lat = get_kv(&coords, "latitude").as_f64().unwrap_or(f64::NAN);
        let lng = get_kv(&coords, "longitude").as_f64().unwrap_or(f64::NAN);
        resolve_geolocation(&w_ok, Ok(LatLng::new(lat, lng)));
    });
    let w_err = weak.clone();
    let on_err = Closure::once_into_js(move |err: JsValue| {
        let reason = get_kv(&err, "message").as_string().unwrap_or_default();
        resolve_geolocation(&w_err, Err(GeolocationFailure::Failed(reason)));
    });
    if geo.get_current_position_with_error_callback(on_ok.unchecked_ref(), Some(on_err.unchecked_ref())).is_err() {
        resolve_geolocation(&weak, Err(GeolocationFailure::Failed(String::new())));
    }
}

/// Locations whose name or description contains `query` (case-insensitive).
#[wasm_bindgen]
pub fn search_locations(locations: JsValue, query: &str) -> JsValue {
    match locations_from(locations) {
        Ok(locs) => error::ok(to_js(&catalog::search(&locs, query))),
        Err(e) => e,
    }
}

#[wasm_bindgen]
pub fn filter_locations(locations: JsValue, category: &str) -> JsValue {
    match locations_from(locations) {
        Ok(locs) => error::ok(to_js(&catalog::filter_by_category(&locs, category))),
        Err(e) => e,
    }
}

#[wasm_bindgen]
pub fn location_categories(locations: JsValue) -> JsValue {
    match locations_from(locations) {
        Ok(locs) => error::ok(to_js(&catalog::categories(&locs))),
        Err(e) => e,
    }
}
