use locdir::{LocdirError, MapConfig, RecordId, SelectorConfig};

#[test]
fn empty_json_yields_defaults() {
    let cfg = MapConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, MapConfig::default());
    assert_eq!(cfg.default_zoom, 3.0);
    assert_eq!(cfg.max_fit_zoom, 15.0);
    assert_eq!(cfg.popup_max_width, 300);
    assert_eq!(cfg.styles.len(), 3);
    assert_eq!(SelectorConfig::from_json_str("{}").unwrap(), SelectorConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = MapConfig::from_json_str(r#"{"focus_zoom": 12, "delete_dialog": {"modal": "confirm"}}"#).unwrap();
    assert_eq!(cfg.focus_zoom, 12.0);
    assert_eq!(cfg.delete_dialog.modal, "confirm");
    assert_eq!(cfg.delete_dialog.form, "delete-form");
}

#[test]
fn unknown_fields_are_rejected() {
    let err = MapConfig::from_json_str(r#"{"zoom": 4}"#).unwrap_err();
    assert_eq!(err.code(), "invalid_json");
}

#[test]
fn out_of_range_values_fail_validation() {
    let err = MapConfig::from_json_str(r#"{"max_fit_zoom": 40}"#).unwrap_err();
    assert!(matches!(err, LocdirError::InvalidConfig { .. }));
    assert!(MapConfig::from_json_str(r#"{"default_center": {"lat": 95.0, "lng": 0.0}}"#).is_err());
    assert!(MapConfig::from_json_str(r#"{"popup_max_width": 0}"#).is_err());
    assert!(SelectorConfig::from_json_str(r#"{"region_id": " "}"#).is_err());
}

#[test]
fn styles_serialize_in_sdk_shape() {
    let v = serde_json::to_value(&MapConfig::default().styles[0]).unwrap();
    assert_eq!(v, serde_json::json!({"elementType": "geometry", "stylers": [{"color": "#242f3e"}]}));
}

#[test]
fn link_targets() {
    let cfg = MapConfig::default();
    assert_eq!(cfg.edit_href(&RecordId::Int(7)), "/edit/7");
    assert_eq!(cfg.delete_action(&RecordId::from("abc")), "/delete/abc");
}
