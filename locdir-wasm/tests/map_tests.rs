use js_sys::Reflect;
use locdir::popup::DeleteRequest;
use locdir::{DeleteDialogIds, RecordId};
use locdir_wasm::{dom, filter_locations, location_categories, search_locations, MapView};
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::HtmlFormElement;

wasm_bindgen_test_configure!(run_in_browser);

fn err_code(v: &JsValue) -> Option<String> {
    let e = Reflect::get(v, &JsValue::from_str("error")).ok()?;
    Reflect::get(&e, &JsValue::from_str("code")).ok()?.as_string()
}

fn value<T: for<'de> Deserialize<'de>>(v: &JsValue) -> T {
    assert_eq!(Reflect::get(v, &JsValue::from_str("ok")).unwrap().as_bool(), Some(true));
    serde_wasm_bindgen::from_value(Reflect::get(v, &JsValue::from_str("value")).unwrap()).unwrap()
}

fn locations() -> JsValue {
    let v = serde_json::json!([
        {"id": 1, "name": "Shop A", "category": "Retail", "description": "desc", "lat": 25.2, "lng": 55.3},
        {"id": 2, "name": "Cafe", "category": "Food", "description": "coffee shop", "lat": 25.1, "lng": 55.2}
    ]);
    serde_wasm_bindgen::to_value(&v).unwrap()
}

#[wasm_bindgen_test]
fn delete_dialog_is_filled_from_request() {
    let doc = dom::document().unwrap();
    let body = doc.body().unwrap();
    body.insert_adjacent_html(
        "beforeend",
        "<span id=\"delete-location-name\"></span><form id=\"delete-form\" action=\"/\"></form><div id=\"deleteModal\"></div>",
    )
    .unwrap();
    let req = DeleteRequest { id: RecordId::Int(1), name: "Shop A".into(), action: "/delete/1".into() };
    dom::show_delete_dialog(&doc, &DeleteDialogIds::default(), &req).unwrap();

    let name = doc.get_element_by_id("delete-location-name").unwrap();
    assert_eq!(name.text_content().as_deref(), Some("Shop A"));
    let form: HtmlFormElement = doc.get_element_by_id("delete-form").unwrap().dyn_into().unwrap();
    assert!(form.action().ends_with("/delete/1"));
}

#[wasm_bindgen_test]
fn map_view_without_container_fails_with_envelope() {
    let cfg = serde_wasm_bindgen::to_value(&serde_json::json!({ "container_id": "no-such-map" })).unwrap();
    let err = MapView::new(cfg, JsValue::UNDEFINED).err().expect("constructor throws");
    assert_eq!(err_code(&err).as_deref(), Some("missing_element"));
}

#[wasm_bindgen_test]
fn map_view_rejects_invalid_config() {
    let cfg = serde_wasm_bindgen::to_value(&serde_json::json!({ "max_fit_zoom": 99 })).unwrap();
    let err = MapView::new(cfg, JsValue::UNDEFINED).err().expect("constructor throws");
    assert_eq!(err_code(&err).as_deref(), Some("invalid_config"));
}

#[wasm_bindgen_test]
fn catalog_exports() {
    let hits: Vec<serde_json::Value> = value(&search_locations(locations(), "shop"));
    assert_eq!(hits.len(), 2);
    let retail: Vec<serde_json::Value> = value(&filter_locations(locations(), "retail"));
    assert_eq!(retail.len(), 1);
    assert_eq!(retail[0]["name"], "Shop A");
    let cats: Vec<String> = value(&location_categories(locations()));
    assert_eq!(cats, vec!["Food", "Retail"]);
}

#[wasm_bindgen_test]
fn catalog_rejects_non_arrays() {
    let r = search_locations(JsValue::from_str("nope"), "");
    assert_eq!(err_code(&r).as_deref(), Some("invalid_locations"));
}
