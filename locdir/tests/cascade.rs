use locdir::cascade::{Cascade, Level};
use locdir::model::parse_option_entries;
use locdir::{OptionEntry, RecordId, SelectorConfig};
use proptest::prelude::*;

fn entries(names: &[(i64, &str)]) -> Vec<OptionEntry> {
    names.iter().map(|(id, n)| OptionEntry { id: RecordId::Int(*id), name: n.to_string() }).collect()
}

#[test]
fn region_selection_fetches_cities_in_server_order() {
    let mut c = Cascade::new(SelectorConfig::default());
    let change = c.on_region_change("3");
    assert!(change.resets.is_empty());
    let req = change.fetch.expect("fetch issued");
    assert_eq!(req.level, Level::City);
    assert_eq!(req.endpoint, "/api/cities");
    assert_eq!(req.query(), [("region_id", "3")]);
    assert_eq!(req.url(), "/api/cities?region_id=3");

    let list = c.apply_response(&req, &entries(&[(9, "Zulfi"), (2, "Abha")])).expect("current");
    let labels: Vec<&str> = list.options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["اختر المدينة...", "Zulfi", "Abha"]);
    assert_eq!(list.options[0].value, "");
    assert_eq!(list.options[1].value, "9");
}

#[test]
fn empty_region_resets_city_and_district() {
    let mut c = Cascade::new(SelectorConfig::default());
    let change = c.on_region_change("");
    assert!(change.fetch.is_none());
    assert_eq!(change.resets.len(), 2);
    assert_eq!(change.resets[0].level, Level::City);
    assert_eq!(change.resets[1].level, Level::District);
    assert!(change.resets.iter().all(|l| l.is_placeholder_only()));
    assert_eq!(change.resets[1].options[0].label, "اختر الحي...");
}

#[test]
fn empty_city_resets_only_district() {
    let mut c = Cascade::new(SelectorConfig::default());
    let change = c.on_city_change("");
    assert_eq!(change.resets.len(), 1);
    assert_eq!(change.resets[0].level, Level::District);
    assert_eq!(c.current_ticket(Level::City), 0);
}

#[test]
fn city_selection_fetches_districts() {
    let mut c = Cascade::new(SelectorConfig::default());
    let req = c.on_city_change("12").fetch.unwrap();
    assert_eq!(req.level, Level::District);
    assert_eq!(req.url(), "/api/districts?city_id=12");
    let body = r#"[{"id": 1, "name": "Olaya"}, {"id": "x7", "name": "Malaz"}]"#;
    let list = c.apply_response(&req, &parse_option_entries(body).unwrap()).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.options[2].value, "x7");
}

#[test]
fn stale_response_is_dropped() {
    let mut c = Cascade::new(SelectorConfig::default());
    let first = c.on_region_change("1").fetch.unwrap();
    let second = c.on_region_change("2").fetch.unwrap();
    assert!(c.apply_response(&first, &entries(&[(1, "Old")])).is_none());
    assert!(c.apply_response(&second, &entries(&[(2, "New")])).is_some());
}

#[test]
fn response_after_reset_is_dropped() {
    let mut c = Cascade::new(SelectorConfig::default());
    let pending = c.on_city_change("5").fetch.unwrap();
    c.on_region_change("");
    assert!(c.apply_response(&pending, &entries(&[(1, "Late")])).is_none());
}

#[test]
fn custom_endpoints_and_placeholders() {
    let cfg = SelectorConfig {
        cities_endpoint: "/v2/cities".into(),
        city_placeholder: "Choose city".into(),
        ..Default::default()
    };
    let mut c = Cascade::new(cfg);
    let req = c.on_region_change("1").fetch.unwrap();
    assert_eq!(req.endpoint, "/v2/cities");
    assert_eq!(c.placeholder_only(Level::City).options[0].label, "Choose city");
}

#[test]
fn malformed_options_body_is_an_error() {
    assert!(parse_option_entries("{\"id\":1}").is_err());
    assert!(parse_option_entries("not json").is_err());
}

proptest! {
    #[test]
    fn only_latest_request_applies(values in prop::collection::vec("[0-9]{0,3}", 1..16)) {
        let mut c = Cascade::new(SelectorConfig::default());
        let mut issued = Vec::new();
        for v in &values {
            if let Some(req) = c.on_region_change(v).fetch { issued.push(req); }
        }
        let last_value = values.last().unwrap();
        for (i, req) in issued.iter().enumerate() {
            let applied = c.apply_response(req, &[]).is_some();
            let is_latest = i + 1 == issued.len() && !last_value.is_empty();
            prop_assert_eq!(applied, is_latest);
        }
    }
}
