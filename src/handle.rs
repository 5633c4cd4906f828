//! Handle model: which parameter a handle edits, host hooks, and the gesture
//! state machine.
//!
//! A [`HandleKind`] binds one shape parameter to its constraint and to the
//! accessor that places the handle on screen. Both are rebuilt from the
//! latest proposed [`Shapes`] at each drag tick, so nothing here holds on to a
//! center or a neighbouring radius from an earlier moment. [`Gesture`] is the
//! drag being tracked between drag-start and drop.

#[cfg(test)]
#[path = "handle_test.rs"]
mod handle_test;

use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;
use crate::geometry::Point;
use crate::image::ImageMeta;
use crate::shape::Shapes;

/// The parameter a draggable handle edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    /// Inner radius of the Fourier-space ring.
    RingInner,
    /// Outer radius of the Fourier-space ring.
    RingOuter,
    /// Center of the real-space disk.
    DiskCenter,
    /// Radius of the real-space disk.
    DiskRadius,
}

impl HandleKind {
    /// Where the handle sits for the given state.
    #[must_use]
    pub fn position(self, shapes: &Shapes) -> Point {
        match self {
            Self::RingInner => shapes.ring.inner_handle(),
            Self::RingOuter => shapes.ring.outer_handle(),
            Self::DiskCenter => shapes.disk.center_handle(),
            Self::DiskRadius => shapes.disk.radius_handle(),
        }
    }

    /// The constraint for this handle given the latest proposed state.
    #[must_use]
    pub fn constraint(self, shapes: &Shapes, image: &ImageMeta) -> Constraint {
        let ring = &shapes.ring;
        match self {
            Self::RingInner => Constraint::InnerRadius {
                outer_handle_x: ring.outer_handle().x,
                cx: ring.center.x,
                cy: ring.center.y,
            },
            Self::RingOuter => Constraint::OuterRadius { inner_handle_x: ring.inner_handle().x, cy: ring.center.y },
            Self::DiskCenter => Constraint::InRect { width: image.width(), height: image.height() },
            Self::DiskRadius => Constraint::KeepOnCy { cy: shapes.disk.center.y },
        }
    }

    /// Center the handle's radius is measured from, if it edits a radius.
    #[must_use]
    pub fn radius_center(self, shapes: &Shapes) -> Option<Point> {
        match self {
            Self::RingInner | Self::RingOuter => Some(shapes.ring.center),
            Self::DiskRadius => Some(shapes.disk.center),
            Self::DiskCenter => None,
        }
    }

    /// The job slot whose frame this handle is drawn over.
    #[must_use]
    pub fn job_slot(self) -> u32 {
        match self {
            Self::RingInner | Self::RingOuter => crate::consts::FOURIER_JOB_SLOT,
            Self::DiskCenter | Self::DiskRadius => crate::consts::REAL_JOB_SLOT,
        }
    }
}

/// Hooks the host invokes around each gesture, e.g. to suspend image panning.
pub trait DragHost: Send {
    fn on_drag_start(&mut self, kind: HandleKind);
    fn on_drop(&mut self, kind: HandleKind);
}

/// Host that ignores gesture notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl DragHost for NoopHost {
    fn on_drag_start(&mut self, _kind: HandleKind) {}
    fn on_drop(&mut self, _kind: HandleKind) {}
}

/// The drag being tracked between drag-start and drop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A handle is being dragged.
    Dragging {
        kind: HandleKind,
        /// Handle position when the gesture started.
        start: Point,
        /// Last constrained position, which is where the handle is drawn.
        last: Point,
    },
}

impl Gesture {
    /// The handle being dragged, if any.
    #[must_use]
    pub fn active(&self) -> Option<HandleKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { kind, .. } => Some(*kind),
        }
    }
}
