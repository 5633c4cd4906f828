//! Image-space points and the radius math behind radius handles.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in image space (pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between `center` and `point`.
#[must_use]
pub fn distance(center: Point, point: Point) -> f64 {
    (point.x - center.x).hypot(point.y - center.y)
}

/// Direction of `point` as seen from `center`, in radians (`atan2(dy, dx)`).
///
/// Coincident points yield `0.0`.
#[must_use]
pub fn angle(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x)
}

/// Build a drag-move handler that turns a dragged point into a radius.
///
/// `center` is fixed for the lifetime of the returned handler, so build a
/// fresh handler whenever the center may have moved.
pub fn radius_handler<F>(center: Point, mut on_radius: F) -> impl FnMut(Point)
where
    F: FnMut(f64),
{
    move |point| on_radius(distance(center, point))
}

/// Position of a radius handle: on the horizontal axis, left of `center`.
#[must_use]
pub fn handle_at_radius(center: Point, radius: f64) -> Point {
    Point { x: center.x - radius, y: center.y }
}
