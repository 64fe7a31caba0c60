use crate::error::{LocdirError, Result};
use crate::limits;
use crate::model::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the SDK `styles` array, passed through to the map constructor as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    pub stylers: Vec<BTreeMap<String, serde_json::Value>>,
}

impl MapStyle {
    fn color(element_type: &str, color: &str) -> Self {
        let mut styler = BTreeMap::new();
        styler.insert("color".to_string(), serde_json::Value::from(color));
        MapStyle { feature_type: None, element_type: Some(element_type.to_string()), stylers: vec![styler] }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteDialogIds {
    pub name: String,
    pub form: String,
    pub modal: String,
}

impl Default for DeleteDialogIds {
    fn default() -> Self {
        DeleteDialogIds {
            name: "delete-location-name".into(),
            form: "delete-form".into(),
            modal: "deleteModal".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub container_id: String,
    pub default_center: LatLng,
    pub default_zoom: f64,
    /// Zoom applied once the browser reports the user's position.
    pub geolocated_zoom: f64,
    /// Zoom used by `recenter_and_open`.
    pub focus_zoom: f64,
    /// Upper bound applied after fitting the view to all markers.
    pub max_fit_zoom: f64,
    pub popup_max_width: u32,
    pub drop_animation: bool,
    pub styles: Vec<MapStyle>,
    pub edit_path: String,
    pub delete_path: String,
    pub fit_control_title: String,
    pub delete_dialog: DeleteDialogIds,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            container_id: "map".into(),
            // Dubai
            default_center: LatLng::new(25.276987, 55.296249),
            default_zoom: 3.0,
            geolocated_zoom: 10.0,
            focus_zoom: 15.0,
            max_fit_zoom: 15.0,
            popup_max_width: 300,
            drop_animation: true,
            styles: vec![
                MapStyle::color("geometry", "#242f3e"),
                MapStyle::color("labels.text.stroke", "#242f3e"),
                MapStyle::color("labels.text.fill", "#746855"),
            ],
            edit_path: "/edit/".into(),
            delete_path: "/delete/".into(),
            fit_control_title: "Fit to all locations".into(),
            delete_dialog: DeleteDialogIds::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: MapConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let c = self.default_center;
        if !limits::in_lat_bounds(c.lat) || !limits::in_lng_bounds(c.lng) {
            return Err(LocdirError::invalid_config("default_center out of range"));
        }
        for (name, z) in [
            ("default_zoom", self.default_zoom),
            ("geolocated_zoom", self.geolocated_zoom),
            ("focus_zoom", self.focus_zoom),
            ("max_fit_zoom", self.max_fit_zoom),
        ] {
            if !limits::in_zoom_bounds(z) {
                return Err(LocdirError::invalid_config(format!("{} must be within 0..=21", name)));
            }
        }
        if self.popup_max_width == 0 || self.popup_max_width > limits::MAX_POPUP_WIDTH {
            return Err(LocdirError::invalid_config("popup_max_width out of range"));
        }
        non_empty("container_id", &self.container_id)?;
        non_empty("delete_dialog.name", &self.delete_dialog.name)?;
        non_empty("delete_dialog.form", &self.delete_dialog.form)?;
        non_empty("delete_dialog.modal", &self.delete_dialog.modal)?;
        Ok(())
    }

    pub fn edit_href(&self, id: &crate::RecordId) -> String { format!("{}{}", self.edit_path, id) }

    pub fn delete_action(&self, id: &crate::RecordId) -> String { format!("{}{}", self.delete_path, id) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub region_id: String,
    pub city_id: String,
    pub district_id: String,
    pub cities_endpoint: String,
    pub districts_endpoint: String,
    pub city_placeholder: String,
    pub district_placeholder: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        SelectorConfig {
            region_id: "region_id".into(),
            city_id: "city_id".into(),
            district_id: "district_id".into(),
            cities_endpoint: "/api/cities".into(),
            districts_endpoint: "/api/districts".into(),
            city_placeholder: "اختر المدينة...".into(),
            district_placeholder: "اختر الحي...".into(),
        }
    }
}

impl SelectorConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: SelectorConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        non_empty("region_id", &self.region_id)?;
        non_empty("city_id", &self.city_id)?;
        non_empty("district_id", &self.district_id)?;
        non_empty("cities_endpoint", &self.cities_endpoint)?;
        non_empty("districts_endpoint", &self.districts_endpoint)?;
        Ok(())
    }
}

fn non_empty(name: &str, v: &str) -> Result<()> {
    if v.trim().is_empty() {
        return Err(LocdirError::invalid_config(format!("{} must not be empty", name)));
    }
    Ok(())
}
