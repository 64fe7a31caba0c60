use crate::gmaps::{self, ControlSlot, GMap, InfoWindow, LatLngBounds, Marker};
use crate::interop::{new_obj, set_kv, to_js};
use locdir::map::{MapEvent, MapSurface, MarkerKey, PopupSession};
use locdir::popup::DELETE_BUTTON_CLASS;
use locdir::{Bounds, LatLng, Location, LocdirError, MapConfig};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Receives user interactions from SDK and DOM callbacks.
pub type EventSink = Rc<dyn Fn(MapEvent)>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions<'a> {
    center: LatLng,
    zoom: f64,
    styles: &'a [locdir::config::MapStyle],
}

pub struct GoogleMarker {
    marker: Marker,
    _click: Closure<dyn FnMut()>,
}

impl Drop for GoogleMarker {
    fn drop(&mut self) { self.marker.set_map(&JsValue::NULL) }
}

// Listeners bound for one open period of a popup.
struct OpenBindings {
    button: Option<Element>,
    on_delete: Closure<dyn FnMut()>,
    close_listener: JsValue,
    _on_close: Closure<dyn FnMut()>,
}

pub struct GoogleInfoWindow {
    window: InfoWindow,
    content: Option<Element>,
    bindings: RefCell<Option<OpenBindings>>,
}

impl GoogleInfoWindow {
    fn unbind(&self) {
        if let Some(b) = self.bindings.borrow_mut().take() {
            if let Some(button) = &b.button {
                let _ = button.remove_event_listener_with_callback("click", b.on_delete.as_ref().unchecked_ref());
            }
            gmaps::remove_listener(&b.close_listener);
        }
    }
}

impl Drop for GoogleInfoWindow {
    fn drop(&mut self) {
        self.unbind();
        self.window.close();
    }
}

// The custom control lives in `map.controls`, outside anything the SDK tears down for us.
struct FitControl {
    element: Element,
    button: Option<Element>,
    on_click: Closure<dyn FnMut()>,
}

impl Drop for FitControl {
    fn drop(&mut self) {
        if let Some(button) = &self.button {
            let _ = button.remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        }
        self.element.remove();
    }
}

/// [`MapSurface`] backed by a live `google.maps.Map`.
pub struct GoogleMapSurface {
    map: GMap,
    document: Document,
    sink: EventSink,
    fit_control: Option<FitControl>,
}

impl GoogleMapSurface {
    pub fn create(document: Document, cfg: &MapConfig, sink: EventSink) -> Result<Self, JsValue> {
        let container = document
            .get_element_by_id(&cfg.container_id)
            .ok_or_else(|| crate::error::from_error(&LocdirError::missing_element(cfg.container_id.clone())))?;
        let opts = MapOptions { center: cfg.default_center, zoom: cfg.default_zoom, styles: &cfg.styles };
        let map = GMap::new(&container, &to_js(&opts)).map_err(|e| crate::error::sdk_unavailable("google.maps.Map", &e))?;
        Ok(GoogleMapSurface { map, document, sink, fit_control: None })
    }

    fn emit(&self, event: MapEvent) -> Closure<dyn FnMut()> {
        let sink = self.sink.clone();
        Closure::wrap(Box::new(move || sink(event)) as Box<dyn FnMut()>)
    }
}

impl MapSurface for GoogleMapSurface {
    type Marker = GoogleMarker;
    type Popup = GoogleInfoWindow;

    fn set_center(&mut self, center: LatLng) { self.map.set_center(&to_js(&center)); }

    fn set_zoom(&mut self, zoom: f64) { self.map.set_zoom(zoom); }

    fn zoom(&self) -> Option<f64> { self.map.get_zoom() }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        let (Some(sw), Some(ne)) = (bounds.south_west(), bounds.north_east()) else { return };
        let b = LatLngBounds::new();
        b.extend(&to_js(&sw));
        b.extend(&to_js(&ne));
        self.map.fit_bounds(&b);
    }

    fn add_fit_control(&mut self, html: &str, _title: &str) {
        let Ok(div) = self.document.create_element("div") else { return };
        div.set_class_name("map-control");
        div.set_inner_html(html);
        let on_click = self.emit(MapEvent::FitControlClicked);
        let button = div.query_selector("button").ok().flatten();
        if let Some(b) = &button {
            let _ = b.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
        if let Some(pos) = gmaps::control_position("RIGHT_BOTTOM") {
            let slot: ControlSlot = self.map.controls().get(pos).unchecked_into();
            slot.push(&div);
        }
        // Replacing an earlier control detaches it.
        self.fit_control = Some(FitControl { element: div, button, on_click });
    }

    fn add_marker(&mut self, key: MarkerKey, location: &Location, cfg: &MapConfig) -> GoogleMarker {
        let opts = new_obj();
        set_kv(&opts, "position", &to_js(&location.position()));
        set_kv(&opts, "map", self.map.as_ref());
        set_kv(&opts, "title", &JsValue::from_str(&location.name));
        set_kv(&opts, "id", &to_js(&location.id));
        if cfg.drop_animation {
            set_kv(&opts, "animation", &gmaps::drop_animation());
        }
        let marker = Marker::new(&opts.into());
        let click = self.emit(MapEvent::MarkerClicked(key));
        marker.add_listener("click", click.as_ref().unchecked_ref());
        GoogleMarker { marker, _click: click }
    }

    fn remove_marker(&mut self, marker: &GoogleMarker) { marker.marker.set_map(&JsValue::NULL); }

    fn create_popup(&mut self, html: &str, max_width: u32) -> GoogleInfoWindow {
        // Element content keeps the Delete button addressable per popup instance.
        let opts = new_obj();
        let content = self.document.create_element("div").ok();
        match &content {
            Some(el) => {
                el.set_inner_html(html);
                set_kv(&opts, "content", el.as_ref());
            }
            None => set_kv(&opts, "content", &JsValue::from_str(html)),
        }
        set_kv(&opts, "maxWidth", &JsValue::from_f64(max_width as f64));
        GoogleInfoWindow { window: InfoWindow::new(&opts.into()), content, bindings: RefCell::new(None) }
    }

    fn open_popup(&mut self, popup: &GoogleInfoWindow, marker: &GoogleMarker, session: PopupSession) {
        popup.unbind();
        popup.window.open(&self.map, &marker.marker);
        let selector = format!(".{}", DELETE_BUTTON_CLASS);
        let button = popup.content.as_ref().and_then(|c| c.query_selector(&selector).ok().flatten());
        let on_delete = self.emit(MapEvent::DeleteClicked(session));
        if let Some(b) = &button {
            let _ = b.add_event_listener_with_callback("click", on_delete.as_ref().unchecked_ref());
        }
        let on_close = self.emit(MapEvent::PopupCloseClicked(session));
        let close_listener = popup.window.add_listener("closeclick", on_close.as_ref().unchecked_ref());
        *popup.bindings.borrow_mut() = Some(OpenBindings { button, on_delete, close_listener, _on_close: on_close });
    }

    fn close_popup(&mut self, popup: &GoogleInfoWindow) {
        popup.unbind();
        popup.window.close();
    }
}
