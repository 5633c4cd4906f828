//! Shapes being edited and the committed store overlays subscribe to.
//!
//! Handle positions are never stored: [`Ring`] and [`Disk`] expose them as
//! accessors derived from the current parameters, so a handle can never drift
//! from its shape. [`ShapeStore`] holds the committed (post-debounce) state
//! and notifies subscribed observers, in subscription order, after every
//! commit that changes something.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Point, handle_at_radius};
use crate::image::ImageMeta;

// =============================================================================
// SHAPES
// =============================================================================

/// Annulus in Fourier space. Invariant: `0 <= rad_in <= rad_out`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub center: Point,
    pub rad_in: f64,
    pub rad_out: f64,
}

impl Ring {
    #[must_use]
    pub fn inner_handle(&self) -> Point {
        handle_at_radius(self.center, self.rad_in)
    }

    #[must_use]
    pub fn outer_handle(&self) -> Point {
        handle_at_radius(self.center, self.rad_out)
    }
}

/// Disk in real space. Invariant: `radius >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub center: Point,
    pub radius: f64,
}

impl Disk {
    #[must_use]
    pub fn center_handle(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn radius_handle(&self) -> Point {
        handle_at_radius(self.center, self.radius)
    }
}

/// Either region-of-interest variant, for consumers that draw one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Ring(Ring),
    Disk(Disk),
}

/// Every shape a session edits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shapes {
    pub ring: Ring,
    pub disk: Disk,
}

impl Shapes {
    /// Default geometry for a frame: both shapes centered, ring at a quarter
    /// and half of the smaller dimension, disk at a quarter.
    #[must_use]
    pub fn initial(image: &ImageMeta) -> Self {
        let center = image.center();
        Self {
            ring: Ring { center, rad_in: image.default_ring_inner(), rad_out: image.default_ring_outer() },
            disk: Disk { center, radius: image.default_disk_radius() },
        }
    }

    /// Both shapes as a list, ring first.
    #[must_use]
    pub fn all(&self) -> [Shape; 2] {
        [Shape::Ring(self.ring), Shape::Disk(self.disk)]
    }
}

// =============================================================================
// OBSERVERS
// =============================================================================

/// Read-only consumer of committed shape state (overlay renderers, summaries).
pub trait ShapeObserver: Send {
    fn on_commit(&mut self, shapes: &Shapes);
}

impl<F> ShapeObserver for F
where
    F: FnMut(&Shapes) + Send,
{
    fn on_commit(&mut self, shapes: &Shapes) {
        self(shapes);
    }
}

/// Handle returned by [`ShapeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// =============================================================================
// STORE
// =============================================================================

/// Committed shape state shared between the session and its debounced setters.
///
/// Once closed, commits and subscriptions are ignored.
#[derive(Clone)]
pub struct ShapeStore {
    inner: Arc<Mutex<StoreInner>>,
}

struct StoreInner {
    shapes: Shapes,
    observers: Vec<(SubscriptionId, Box<dyn ShapeObserver>)>,
    next_id: u64,
    closed: bool,
}

impl ShapeStore {
    #[must_use]
    pub fn new(shapes: Shapes) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner { shapes, observers: Vec::new(), next_id: 0, closed: false })),
        }
    }

    /// Copy of the committed state.
    #[must_use]
    pub fn snapshot(&self) -> Shapes {
        self.lock().shapes
    }

    /// Register an observer. It is not called for the current state.
    pub fn subscribe<O>(&self, observer: O) -> Option<SubscriptionId>
    where
        O: ShapeObserver + 'static,
    {
        let mut inner = self.lock();
        if inner.closed {
            return None;
        }
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Box::new(observer)));
        Some(id)
    }

    /// Remove an observer. Returns whether it was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(sub, _)| *sub != id);
        inner.observers.len() != before
    }

    /// Commit a new inner ring radius, clamped to `[0, rad_out]`.
    pub fn set_ring_inner(&self, radius: f64) -> bool {
        self.commit("ring_inner", |shapes| {
            let ring = &mut shapes.ring;
            ring.rad_in = radius.max(0.0).min(ring.rad_out);
        })
    }

    /// Commit a new outer ring radius, clamped to at least `rad_in`.
    pub fn set_ring_outer(&self, radius: f64) -> bool {
        self.commit("ring_outer", |shapes| {
            let ring = &mut shapes.ring;
            ring.rad_out = radius.max(ring.rad_in);
        })
    }

    pub fn set_disk_center(&self, center: Point) -> bool {
        self.commit("disk_center", |shapes| shapes.disk.center = center)
    }

    /// Commit a new disk radius, clamped to at least zero.
    pub fn set_disk_radius(&self, radius: f64) -> bool {
        self.commit("disk_radius", |shapes| shapes.disk.radius = radius.max(0.0))
    }

    /// Drop every observer and refuse further commits.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.observers.clear();
    }

    /// Apply `mutate`, then notify observers if anything changed.
    fn commit(&self, field: &'static str, mutate: impl FnOnce(&mut Shapes)) -> bool {
        let mut inner = self.lock();
        if inner.closed {
            debug!(field, "commit on closed shape store ignored");
            return false;
        }
        let before = inner.shapes;
        mutate(&mut inner.shapes);
        let after = inner.shapes;
        if after == before {
            return false;
        }
        debug!(field, ?after, "shape committed");
        for (_, observer) in &mut inner.observers {
            observer.on_commit(&after);
        }
        true
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
