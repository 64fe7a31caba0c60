use js_sys::Reflect;
use locdir::cascade::{Level, OptionList, SelectOption};
use locdir_wasm::{dom, init_selectors};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false)
}

fn err_code(v: &JsValue) -> Option<String> {
    let e = Reflect::get(v, &JsValue::from_str("error")).ok()?;
    Reflect::get(&e, &JsValue::from_str("code")).ok()?.as_string()
}

fn make_select(id: &str, options: &[(&str, &str)]) -> HtmlSelectElement {
    let doc = dom::document().unwrap();
    let sel: HtmlSelectElement = doc.create_element("select").unwrap().dyn_into().unwrap();
    sel.set_id(id);
    for (value, label) in options {
        let o = web_sys::HtmlOptionElement::new_with_text_and_value(label, value).unwrap();
        sel.append_child(&o).unwrap();
    }
    doc.body().unwrap().append_child(&sel).unwrap();
    sel
}

fn labels(sel: &HtmlSelectElement) -> Vec<String> {
    let opts = sel.options();
    (0..opts.length())
        .filter_map(|i| opts.item(i))
        .filter_map(|o| o.text_content())
        .collect()
}

fn config(prefix: &str) -> JsValue {
    let cfg = serde_json::json!({
        "region_id": format!("{}-region", prefix),
        "city_id": format!("{}-city", prefix),
        "district_id": format!("{}-district", prefix),
        "city_placeholder": "Pick city",
        "district_placeholder": "Pick district",
    });
    serde_wasm_bindgen::to_value(&cfg).unwrap()
}

#[wasm_bindgen_test]
fn render_options_replaces_in_order() {
    let sel = make_select("render-target", &[("", "old"), ("1", "stale")]);
    let list = OptionList {
        level: Level::City,
        options: vec![
            SelectOption { value: String::new(), label: "Pick".into() },
            SelectOption { value: "9".into(), label: "<b>Zulfi</b>".into() },
            SelectOption { value: "2".into(), label: "Abha".into() },
        ],
    };
    dom::render_options(&sel, &list).unwrap();
    assert_eq!(labels(&sel), vec!["Pick", "<b>Zulfi</b>", "Abha"]);
    assert_eq!(sel.options().length(), 3);
}

#[wasm_bindgen_test]
fn clearing_region_resets_city_and_district() {
    let region = make_select("t1-region", &[("", "Region"), ("4", "Riyadh")]);
    let city = make_select("t1-city", &[("", "x"), ("7", "Old city")]);
    let district = make_select("t1-district", &[("", "y"), ("8", "Old district")]);

    let r = init_selectors(config("t1"));
    assert!(is_ok(&r));

    region.set_value("");
    region.dispatch_event(&Event::new("change").unwrap()).unwrap();
    assert_eq!(labels(&city), vec!["Pick city"]);
    assert_eq!(labels(&district), vec!["Pick district"]);
}

#[wasm_bindgen_test]
fn clearing_city_resets_only_district() {
    let _region = make_select("t2-region", &[("", "Region")]);
    let city = make_select("t2-city", &[("", "x"), ("7", "Old city")]);
    let district = make_select("t2-district", &[("", "y"), ("8", "Old district")]);

    assert!(is_ok(&init_selectors(config("t2"))));
    city.set_value("");
    city.dispatch_event(&Event::new("change").unwrap()).unwrap();
    assert_eq!(labels(&city), vec!["x", "Old city"]);
    assert_eq!(labels(&district), vec!["Pick district"]);
}

#[wasm_bindgen_test]
fn missing_selects_return_typed_error() {
    let r = init_selectors(config("absent"));
    assert!(!is_ok(&r));
    assert_eq!(err_code(&r).as_deref(), Some("missing_element"));
}

#[wasm_bindgen_test]
fn bad_config_returns_typed_error() {
    let cfg = serde_wasm_bindgen::to_value(&serde_json::json!({ "nope": 1 })).unwrap();
    assert_eq!(err_code(&init_selectors(cfg)).as_deref(), Some("invalid_config"));
}
