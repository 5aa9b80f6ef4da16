//! Page zoom steps.

pub const ZOOM_STEP: f64 = 1.2;
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 5.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

pub fn zoom_in(current: f64) -> f64 {
    (current * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
}

pub fn zoom_out(current: f64) -> f64 {
    (current / ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM)
}

pub fn zoom_reset() -> f64 {
    DEFAULT_ZOOM
}
