//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level at which one world unit is one screen unit.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Smallest zoom level any camera accepts.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom level any camera accepts.
pub const MAX_ZOOM: f64 = 20.0;

/// Camera manages the view transform for the canvas.
///
/// The forward mapping is `screen = (world + offset) * scale - scale_offset`,
/// where `scale_offset` recenters the zoom on the middle of the viewport.
/// Pan offsets are in world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in world units
    pub offset: Vec2,
    /// Current zoom level, always within `[min_zoom, max_zoom]`
    scale: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Size of the drawing surface in screen units
    pub viewport: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: DEFAULT_SCALE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            viewport: Size::ZERO,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow the zoom bounds, re-clamping the current scale.
    ///
    /// Bounds are kept inside `[MIN_ZOOM, MAX_ZOOM]`; an inverted or
    /// NaN pair falls back to the full range.
    pub fn with_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        let min = min_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let max = max_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if min <= max {
            self.min_zoom = min;
            self.max_zoom = max;
        } else {
            log::warn!("Ignoring inverted zoom limits [{}, {}]", min_zoom, max_zoom);
            self.min_zoom = MIN_ZOOM;
            self.max_zoom = MAX_ZOOM;
        }
        self.set_scale(self.scale);
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom level, clamped to the configured bounds.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.min_zoom, self.max_zoom);
    }

    /// Adjust the zoom level additively.
    pub fn zoom(&mut self, delta: f64) {
        self.set_scale(self.scale + delta);
    }

    /// Shift introduced by scaling around the viewport center.
    pub fn scale_offset(&self) -> Vec2 {
        let factor = (self.scale - 1.0) / 2.0;
        Vec2::new(self.viewport.width * factor, self.viewport.height * factor)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(-self.scale_offset()) * Affine::scale(self.scale) * Affine::translate(self.offset)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.offset) * Affine::scale(1.0 / self.scale) * Affine::translate(self.scale_offset())
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in world units.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.set_scale(DEFAULT_SCALE);
    }
}
