//! Interactive editing session: binds drags to constraints, debounced setters,
//! the committed shape store and the run-request sink.
//!
//! DESIGN
//! ======
//! A drag tick flows: raw point → handle constraint → radius or center →
//! debounced setter → `ShapeStore` commit → subscribed observers. The
//! constraint and the radius center are rebuilt on every tick from the
//! proposed state: the committed store with every still-pending setter value
//! laid over it. Switching from the inner ring handle to the outer one inside
//! a quiet window therefore limits the outer radius by the inner value about
//! to commit, not by the older committed one.
//!
//! Observers only ever see committed state, so the overlay may trail the
//! pointer by one debounce window during fast motion. The gesture itself
//! tracks the constrained position for drawing the handle under the pointer.
//!
//! TEARDOWN
//! ========
//! `teardown()` (also run on `Drop`) cancels every pending setter and closes
//! the store. Nothing mutates shape state afterwards.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisParameters, RunRequest, RunSink};
use crate::config::SessionConfig;
use crate::consts::APPLY_JOB_SLOT;
use crate::debounce::Debouncer;
use crate::geometry::{Point, radius_handler};
use crate::handle::{DragHost, Gesture, HandleKind, NoopHost};
use crate::image::{ImageError, ImageMeta};
use crate::shape::{ShapeObserver, ShapeStore, Shapes, SubscriptionId};

/// One debounced setter per editable parameter.
struct Setters {
    ring_inner: Debouncer<f64>,
    ring_outer: Debouncer<f64>,
    disk_center: Debouncer<Point>,
    disk_radius: Debouncer<f64>,
}

impl Setters {
    fn new(store: &ShapeStore, window: Duration) -> Self {
        let ring_inner = {
            let store = store.clone();
            Debouncer::new("ring_inner", window, move |r| {
                store.set_ring_inner(r);
            })
        };
        let ring_outer = {
            let store = store.clone();
            Debouncer::new("ring_outer", window, move |r| {
                store.set_ring_outer(r);
            })
        };
        let disk_center = {
            let store = store.clone();
            Debouncer::new("disk_center", window, move |p| {
                store.set_disk_center(p);
            })
        };
        let disk_radius = {
            let store = store.clone();
            Debouncer::new("disk_radius", window, move |r| {
                store.set_disk_radius(r);
            })
        };
        Self { ring_inner, ring_outer, disk_center, disk_radius }
    }

    fn radius(&self, kind: HandleKind) -> Option<&Debouncer<f64>> {
        match kind {
            HandleKind::RingInner => Some(&self.ring_inner),
            HandleKind::RingOuter => Some(&self.ring_outer),
            HandleKind::DiskRadius => Some(&self.disk_radius),
            HandleKind::DiskCenter => None,
        }
    }

    /// `committed` with each pending value laid over it.
    fn proposed(&self, committed: Shapes) -> Shapes {
        let mut shapes = committed;
        if let Some(rad_in) = self.ring_inner.pending() {
            shapes.ring.rad_in = rad_in;
        }
        if let Some(rad_out) = self.ring_outer.pending() {
            shapes.ring.rad_out = rad_out;
        }
        if let Some(center) = self.disk_center.pending() {
            shapes.disk.center = center;
        }
        if let Some(radius) = self.disk_radius.pending() {
            shapes.disk.radius = radius;
        }
        shapes
    }

    fn any_pending(&self) -> bool {
        self.ring_inner.is_pending()
            || self.ring_outer.is_pending()
            || self.disk_center.is_pending()
            || self.disk_radius.is_pending()
    }

    fn cancel_all(&self) {
        self.ring_inner.cancel();
        self.ring_outer.cancel();
        self.disk_center.cancel();
        self.disk_radius.cancel();
    }
}

/// One editing view over one analysis.
pub struct Session {
    analysis_id: Uuid,
    image: ImageMeta,
    store: ShapeStore,
    setters: Setters,
    gesture: Gesture,
    host: Box<dyn DragHost>,
    sink: Arc<dyn RunSink>,
    torn_down: bool,
}

impl Session {
    /// Start a session with default geometry for `image`.
    ///
    /// Debounced setters spawn Tokio timers, so drags must be fed from
    /// within a runtime. Outside one every drag tick commits immediately,
    /// with a warning, and observers see each tick instead of one commit per
    /// quiet window.
    pub fn new(
        analysis_id: Uuid,
        image: ImageMeta,
        config: &SessionConfig,
        sink: Arc<dyn RunSink>,
    ) -> Result<Self, ImageError> {
        image.validate()?;
        let store = ShapeStore::new(Shapes::initial(&image));
        let setters = Setters::new(&store, config.debounce);
        info!(%analysis_id, width = image.image_width, height = image.image_height, debounce_ms = config.debounce_ms(), "session started");
        Ok(Self {
            analysis_id,
            image,
            store,
            setters,
            gesture: Gesture::Idle,
            host: Box::new(NoopHost),
            sink,
            torn_down: false,
        })
    }

    /// Replace the drag host notified around each gesture.
    #[must_use]
    pub fn with_host(mut self, host: impl DragHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn analysis_id(&self) -> Uuid {
        self.analysis_id
    }

    #[must_use]
    pub fn image(&self) -> ImageMeta {
        self.image
    }

    /// Committed (post-debounce) shape state.
    #[must_use]
    pub fn shapes(&self) -> Shapes {
        self.store.snapshot()
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Committed state with every value still inside its debounce window
    /// laid over it. Equal to [`Session::shapes`] once settled.
    #[must_use]
    pub fn proposed_shapes(&self) -> Shapes {
        self.setters.proposed(self.store.snapshot())
    }

    /// Where a handle is drawn: the constrained pointer while it is being
    /// dragged, the proposed position otherwise.
    #[must_use]
    pub fn displayed_handle(&self, kind: HandleKind) -> Point {
        match self.gesture {
            Gesture::Dragging { kind: active, last, .. } if active == kind => last,
            _ => kind.position(&self.proposed_shapes()),
        }
    }

    /// Whether no debounced update is waiting to be committed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.setters.any_pending()
    }

    /// Subscribe an overlay or other read-only consumer to committed state.
    ///
    /// Returns `None` once the session is torn down.
    pub fn subscribe<O>(&self, observer: O) -> Option<SubscriptionId>
    where
        O: ShapeObserver + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    // --- Gestures ---

    /// Begin dragging `kind`. An unfinished gesture is dropped first.
    pub fn drag_start(&mut self, kind: HandleKind) {
        if self.torn_down {
            warn!(?kind, "drag start after teardown ignored");
            return;
        }
        if self.gesture.active().is_some() {
            self.drag_end();
        }
        let start = kind.position(&self.proposed_shapes());
        self.host.on_drag_start(kind);
        self.gesture = Gesture::Dragging { kind, start, last: start };
        debug!(?kind, job_slot = kind.job_slot(), x = start.x, y = start.y, "drag started");
    }

    /// Feed a raw pointer position (image space) into the active gesture.
    ///
    /// Returns the constrained position, or `None` when no gesture is active.
    pub fn drag_move(&mut self, raw: Point) -> Option<Point> {
        let Gesture::Dragging { kind, start, .. } = self.gesture else {
            trace!(x = raw.x, y = raw.y, "move without gesture ignored");
            return None;
        };

        let shapes = self.proposed_shapes();
        let constrained = kind.constraint(&shapes, &self.image).apply(raw);

        match (kind.radius_center(&shapes), self.setters.radius(kind)) {
            (Some(center), Some(setter)) => {
                let mut forward = radius_handler(center, |r| setter.call(r));
                forward(constrained);
            }
            _ => self.setters.disk_center.call(constrained),
        }

        self.gesture = Gesture::Dragging { kind, start, last: constrained };
        trace!(?kind, x = constrained.x, y = constrained.y, "drag moved");
        Some(constrained)
    }

    /// Finish the active gesture. Pending setters still fire after their window.
    pub fn drag_end(&mut self) -> Option<HandleKind> {
        let kind = self.gesture.active()?;
        self.gesture = Gesture::Idle;
        self.host.on_drop(kind);
        debug!(?kind, "drag ended");
        Some(kind)
    }

    // --- Apply ---

    /// Snapshot the committed shapes and issue exactly one run request on the
    /// apply job slot.
    ///
    /// Values still inside their debounce window are not included.
    pub fn apply(&self) -> Option<AnalysisParameters> {
        if self.torn_down {
            warn!(analysis_id = %self.analysis_id, "apply after teardown ignored");
            return None;
        }
        let parameters = AnalysisParameters::from_shapes(&self.store.snapshot());
        info!(analysis_id = %self.analysis_id, job_slot = APPLY_JOB_SLOT, %parameters, "run requested");
        self.sink.run(self.analysis_id, APPLY_JOB_SLOT, RunRequest::fft_mask(parameters));
        Some(parameters)
    }

    // --- Teardown ---

    /// Cancel pending updates, release the host, and close the store.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.drag_end();
        self.setters.cancel_all();
        self.store.close();
        self.torn_down = true;
        info!(analysis_id = %self.analysis_id, "session torn down");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}
