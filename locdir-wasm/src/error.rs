use crate::interop::{new_obj, set_kv};
use locdir::LocdirError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

pub fn from_error(e: &LocdirError) -> JsValue {
    let data = match e {
        LocdirError::MissingElement { id } => {
            let d = new_obj(); set_kv(&d, "id", &JsValue::from_str(id));
            Some(d.into())
        }
        LocdirError::NonFinite { param } => {
            let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
            Some(d.into())
        }
        LocdirError::Fetch { url, .. } => {
            let d = new_obj(); set_kv(&d, "url", &JsValue::from_str(url));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

pub fn result(r: locdir::Result<JsValue>) -> JsValue {
    match r {
        Ok(v) => ok(v),
        Err(e) => from_error(&e),
    }
}

#[inline]
pub fn sdk_unavailable(what: &str, cause: &JsValue) -> JsValue {
    let d = new_obj(); set_kv(&d, "cause", cause);
    err("sdk_unavailable", format!("{} could not be created; is the Maps SDK loaded?", what), Some(d.into()))
}

#[inline]
pub fn invalid_locations(message: impl Into<String>) -> JsValue {
    err("invalid_locations", message, None)
}
