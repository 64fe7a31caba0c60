// Zoom and projection bounds shared by the controller and config validation

// Google Maps raster tiles
pub const TILE_SIZE: f64 = 256.0;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 21.0;

// Web Mercator is undefined at the poles; clamp like the SDK does
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

// Popup width cap accepted from config (px)
pub const MAX_POPUP_WIDTH: u32 = 2_000;

#[inline]
pub fn in_zoom_bounds(z: f64) -> bool { z.is_finite() && (MIN_ZOOM..=MAX_ZOOM).contains(&z) }

#[inline]
pub fn clamp_zoom(z: f64) -> f64 { z.max(MIN_ZOOM).min(MAX_ZOOM) }

#[inline]
pub fn in_lat_bounds(lat: f64) -> bool { lat.is_finite() && (-90.0..=90.0).contains(&lat) }

#[inline]
pub fn in_lng_bounds(lng: f64) -> bool { lng.is_finite() && (-180.0..=180.0).contains(&lng) }
