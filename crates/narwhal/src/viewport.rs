use euclid::Transform2D;

use crate::config::ZoomBounds;
use crate::geom::{ScreenPoint, ScreenSpace, ScreenVector, WorldPoint, WorldSpace};

const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Pan/zoom transform: `screen = world * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Viewport {
    pub const IDENTITY: Viewport = Viewport {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn transform(&self) -> Transform2D<f64, WorldSpace, ScreenSpace> {
        Transform2D::scale(self.k, self.k).then_translate(euclid::vec2(self.x, self.y))
    }

    pub fn to_screen(&self, p: WorldPoint) -> ScreenPoint {
        self.transform().transform_point(p)
    }

    pub fn to_world(&self, p: ScreenPoint) -> WorldPoint {
        euclid::point2((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    pub fn pan_by(&mut self, delta: ScreenVector) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Absolute pan for a gesture that began at `origin` with the viewport at `start`.
    pub fn pan_to(origin: ScreenPoint, start: Viewport, current: ScreenPoint) -> Viewport {
        let delta = current - origin;
        Viewport {
            x: start.x + delta.x,
            y: start.y + delta.y,
            k: start.k,
        }
    }

    /// Scales by `factor` (clamped to `bounds`) while keeping the world point under `focal` fixed.
    pub fn zoom(&mut self, focal: ScreenPoint, factor: f64, bounds: ZoomBounds) {
        if !(factor.is_finite() && factor > 0.0) || !bounds.is_valid() {
            return;
        }
        let k = (self.k * factor).clamp(bounds.min, bounds.max);
        let ratio = k / self.k;
        self.x = focal.x - (focal.x - self.x) * ratio;
        self.y = focal.y - (focal.y - self.y) * ratio;
        self.k = k;
    }
}

/// Zoom factor for a wheel event: scrolling up zooms in.
pub fn wheel_factor(delta_y: f64) -> f64 {
    if delta_y < 0.0 {
        WHEEL_ZOOM_IN
    } else {
        WHEEL_ZOOM_OUT
    }
}
