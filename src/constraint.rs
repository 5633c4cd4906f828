//! Pure clamps applied to candidate handle positions.
//!
//! Every drag tick maps the raw pointer position through a [`Constraint`]
//! before anything is derived from it, so the handle snaps to the valid
//! region live rather than only at drop. A constraint never rejects a point:
//! it returns the nearest valid one, and colliding radius handles clamp to
//! equality.

#[cfg(test)]
#[path = "constraint_test.rs"]
mod constraint_test;

use crate::geometry::Point;

/// A mapping from any candidate point to the nearest valid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Keep the point inside `[0, width] × [0, height]`.
    InRect { width: f64, height: f64 },
    /// Outer-radius handle: pinned to the center row and never right of the
    /// inner handle, so the outer radius stays at or above the inner one.
    OuterRadius { inner_handle_x: f64, cy: f64 },
    /// Inner-radius handle: pinned to the center row, between the outer
    /// handle and the center.
    InnerRadius { outer_handle_x: f64, cx: f64, cy: f64 },
    /// Pinned to the center row; x is free.
    KeepOnCy { cy: f64 },
}

impl Constraint {
    /// Map `p` into the valid region.
    #[must_use]
    pub fn apply(self, p: Point) -> Point {
        match self {
            Self::InRect { width, height } => Point { x: clamp(p.x, 0.0, width), y: clamp(p.y, 0.0, height) },
            Self::OuterRadius { inner_handle_x, cy } => Point { x: p.x.min(inner_handle_x), y: cy },
            Self::InnerRadius { outer_handle_x, cx, cy } => Point { x: clamp(p.x, outer_handle_x, cx), y: cy },
            Self::KeepOnCy { cy } => Point { x: p.x, y: cy },
        }
    }
}

/// Clamp that tolerates an inverted range by preferring `lo`.
///
/// `f64::clamp` panics when `lo > hi`; an inverted range only shows up for
/// degenerate geometry and pinning to `lo` keeps the radius ordering.
fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}
