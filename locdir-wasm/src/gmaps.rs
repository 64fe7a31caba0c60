// Bindings for the parts of the Google Maps JS API and Bootstrap the page uses

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    pub type GMap;

    #[wasm_bindgen(catch, constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &web_sys::Element, opts: &JsValue) -> Result<GMap, JsValue>;

    #[wasm_bindgen(method, js_name = setCenter)]
    pub fn set_center(this: &GMap, center: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    pub fn set_zoom(this: &GMap, zoom: f64);

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &GMap) -> Option<f64>;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &GMap, bounds: &LatLngBounds);

    #[wasm_bindgen(method, getter)]
    pub fn controls(this: &GMap) -> js_sys::Array;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = LatLngBounds)]
    pub type LatLngBounds;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "LatLngBounds")]
    pub fn new() -> LatLngBounds;

    #[wasm_bindgen(method)]
    pub fn extend(this: &LatLngBounds, point: &JsValue) -> LatLngBounds;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    pub type Marker;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    pub fn new(opts: &JsValue) -> Marker;

    /// `null` detaches the marker.
    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Marker, map: &JsValue);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &Marker, event: &str, handler: &js_sys::Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = InfoWindow)]
    pub type InfoWindow;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "InfoWindow")]
    pub fn new(opts: &JsValue) -> InfoWindow;

    #[wasm_bindgen(method)]
    pub fn open(this: &InfoWindow, map: &GMap, anchor: &Marker);

    #[wasm_bindgen(method)]
    pub fn close(this: &InfoWindow);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &InfoWindow, event: &str, handler: &js_sys::Function) -> JsValue;

    /// Pushable `MVCArray` slot of `map.controls`.
    pub type ControlSlot;

    #[wasm_bindgen(method)]
    pub fn push(this: &ControlSlot, el: &web_sys::Element) -> u32;

    #[wasm_bindgen(js_namespace = ["google", "maps", "event"], js_name = removeListener)]
    pub fn remove_listener(listener: &JsValue);

    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    pub type BootstrapModal;

    #[wasm_bindgen(catch, constructor, js_namespace = bootstrap, js_class = "Modal")]
    pub fn new(el: &web_sys::Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method)]
    pub fn show(this: &BootstrapModal);
}

/// Numeric value of `google.maps.ControlPosition[name]`.
pub fn control_position(name: &str) -> Option<u32> {
    crate::interop::global_path(&format!("google.maps.ControlPosition.{}", name)).as_f64().map(|v| v as u32)
}

pub fn drop_animation() -> JsValue {
    crate::interop::global_path("google.maps.Animation.DROP")
}
