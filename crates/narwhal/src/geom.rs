//! Coordinate spaces.
//!
//! Layout positions live in [`WorldSpace`]; pointer input arrives in [`ScreenSpace`] and goes
//! through the [`crate::Viewport`] transform. The embedder works in an untyped unit square.

pub type Unit = euclid::UnknownUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSpace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpace;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub type WorldPoint = euclid::Point2D<f64, WorldSpace>;
pub type WorldVector = euclid::Vector2D<f64, WorldSpace>;
pub type ScreenPoint = euclid::Point2D<f64, ScreenSpace>;
pub type ScreenVector = euclid::Vector2D<f64, ScreenSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn world(x: f64, y: f64) -> WorldPoint {
    euclid::point2(x, y)
}

pub fn screen(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}
