use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}

pub fn get_kv(obj: &JsValue, k: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(k)).unwrap_or(JsValue::UNDEFINED)
}

/// Walks a dotted path from the global object, e.g. `google.maps.Animation.DROP`.
pub fn global_path(path: &str) -> JsValue {
    let mut cur: JsValue = js_sys::global().into();
    for part in path.split('.') {
        if cur.is_undefined() || cur.is_null() { return JsValue::UNDEFINED; }
        cur = get_kv(&cur, part);
    }
    cur
}

/// Plain-object conversion; maps serialize as objects, not `Map`s.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    v.serialize(&ser).unwrap_or(JsValue::NULL)
}
