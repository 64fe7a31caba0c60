use crate::limits::{clamp_zoom, MAX_MERCATOR_LAT, MAX_ZOOM, TILE_SIZE};
use crate::model::LatLng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Map viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned lat/lng box. Does not wrap across the antimeridian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    extent: Option<(LatLng, LatLng)>, // (south-west, north-east)
}

impl Bounds {
    pub fn new() -> Self { Bounds { extent: None } }

    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Self {
        let mut b = Bounds::new();
        for p in points { b.extend(p); }
        b
    }

    /// Grows the box to cover `p`. Non-finite points are ignored.
    pub fn extend(&mut self, p: LatLng) {
        if !p.is_finite() { return; }
        self.extent = Some(match self.extent {
            None => (p, p),
            Some((sw, ne)) => (
                LatLng::new(sw.lat.min(p.lat), sw.lng.min(p.lng)),
                LatLng::new(ne.lat.max(p.lat), ne.lng.max(p.lng)),
            ),
        });
    }

    pub fn is_empty(&self) -> bool { self.extent.is_none() }

    pub fn south_west(&self) -> Option<LatLng> { self.extent.map(|(sw, _)| sw) }

    pub fn north_east(&self) -> Option<LatLng> { self.extent.map(|(_, ne)| ne) }

    pub fn contains(&self, p: LatLng) -> bool {
        match self.extent {
            Some((sw, ne)) => p.lat >= sw.lat && p.lat <= ne.lat && p.lng >= sw.lng && p.lng <= ne.lng,
            None => false,
        }
    }

    pub fn center(&self) -> Option<LatLng> {
        self.extent.map(|(sw, ne)| LatLng::new((sw.lat + ne.lat) * 0.5, (sw.lng + ne.lng) * 0.5))
    }

    /// Largest integer zoom at which the whole box fits in `viewport`, clamped to the
    /// SDK range. A single point (zero span) yields the maximum zoom.
    pub fn fit_zoom(&self, viewport: Viewport) -> Option<f64> {
        let (sw, ne) = self.extent?;
        let dx = (ne.lng - sw.lng) / 360.0;
        let dy = (mercator_y(sw.lat) - mercator_y(ne.lat)).abs();
        let zx = axis_zoom(viewport.width, dx);
        let zy = axis_zoom(viewport.height, dy);
        Some(clamp_zoom(zx.min(zy).floor()))
    }
}

// Normalized world y in [0, 1], 0 at the north edge.
fn mercator_y(lat: f64) -> f64 {
    let phi = lat.max(-MAX_MERCATOR_LAT).min(MAX_MERCATOR_LAT).to_radians();
    (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / PI) * 0.5
}

fn axis_zoom(px: f64, span: f64) -> f64 {
    if span <= 0.0 || px <= 0.0 { return MAX_ZOOM; }
    (px / (TILE_SIZE * span)).log2()
}
