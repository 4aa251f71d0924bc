use std::f64::consts::PI;
use crate::constants::{MAX_MAP_ZOOM, MIN_MAP_ZOOM};
use crate::models::LatLng;

/// Size of a zoom-0 world in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator square
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Candidate graticule spacings in degrees
const GRATICULE_STEPS: [f64; 14] = [
    0.000_1, 0.000_2, 0.000_5, 0.001, 0.002, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 5.0,
];

/// Minimum pixel distance between graticule lines
const GRATICULE_MIN_SPACING_PX: f64 = 80.0;

/// A map view centered on a point, projected with Web Mercator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl MapView {
    #[must_use]
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM),
            width: 0.0,
            height: 0.0,
        }
    }

    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self { width, height, ..self }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    /// Screen pixel of a geographic point, origin at the top-left corner
    #[must_use]
    pub fn project(&self, point: LatLng) -> (f64, f64) {
        let scale = self.world_size();
        let (cx, cy) = world_xy(self.center, scale);
        let (x, y) = world_xy(point, scale);
        (x - cx + self.width / 2.0, y - cy + self.height / 2.0)
    }

    /// Geographic point under a screen pixel
    #[must_use]
    pub fn unproject(&self, x: f64, y: f64) -> LatLng {
        let scale = self.world_size();
        let (cx, cy) = world_xy(self.center, scale);
        from_world_xy(x - self.width / 2.0 + cx, y - self.height / 2.0 + cy, scale)
    }

    /// Shift the view by a screen-space drag
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.center = self.unproject(self.width / 2.0 - dx, self.height / 2.0 - dy);
    }

    /// Change zoom, clamped to the supported range
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM);
    }

    /// Whether a point falls inside the view, with a pixel margin
    #[must_use]
    pub fn contains(&self, point: LatLng, margin: f64) -> bool {
        let (x, y) = self.project(point);
        x >= -margin && y >= -margin && x <= self.width + margin && y <= self.height + margin
    }

    /// Smallest graticule spacing (degrees) that keeps lines readable
    #[must_use]
    pub fn graticule_step(&self) -> f64 {
        let degrees_per_px = 360.0 / self.world_size();
        let wanted = degrees_per_px * GRATICULE_MIN_SPACING_PX;
        GRATICULE_STEPS
            .iter()
            .copied()
            .find(|step| *step >= wanted)
            .unwrap_or(GRATICULE_STEPS[GRATICULE_STEPS.len() - 1])
    }
}

fn world_xy(point: LatLng, scale: f64) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

fn from_world_xy(x: f64, y: f64, scale: f64) -> LatLng {
    let lng = x / scale * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / scale);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}
