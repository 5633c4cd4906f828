//! Scripted gesture replay.
//!
//! A script names the image, optionally the analysis id, and a list of
//! events. Events are fed to a [`Session`] in order on the current runtime;
//! `wait` events let debounce windows elapse, and every `apply` yields so a
//! consumer on the same thread can drain the run queue before the next one. When the script ends the
//! replay waits for pending updates to commit, then tears the session down.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{AnalysisParameters, RunSink};
use crate::config::{ConfigError, SessionConfig};
use crate::geometry::Point;
use crate::handle::HandleKind;
use crate::image::{ImageError, ImageMeta};
use crate::session::Session;
use crate::shape::Shapes;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid image metadata: {0}")]
    Image(#[from] ImageError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// One step of a replay script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    DragStart { handle: HandleKind },
    DragMove { x: f64, y: f64 },
    DragEnd,
    Wait { ms: u64 },
    Apply,
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub image: ImageMeta,
    #[serde(default)]
    pub analysis_id: Option<Uuid>,
    pub events: Vec<Event>,
}

impl Script {
    pub fn from_json(raw: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(raw)?;
        script.image.validate()?;
        Ok(script)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, ReplayError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json(&raw)
    }
}

/// What a replay left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub analysis_id: Uuid,
    /// Committed shapes once every pending update settled.
    pub shapes: Shapes,
    /// Parameters of each Apply, in order.
    pub applied: Vec<AnalysisParameters>,
    /// Number of overlay redraws observed.
    pub redraws: usize,
}

/// Run `script` against a fresh session that dispatches to `sink`.
pub async fn replay(
    script: &Script,
    config: &SessionConfig,
    sink: Arc<dyn RunSink>,
) -> Result<ReplayOutcome, ReplayError> {
    let analysis_id = script.analysis_id.unwrap_or_else(Uuid::new_v4);
    let mut session = Session::new(analysis_id, script.image, config, sink)?;

    let redraws = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    {
        let redraws = Arc::clone(&redraws);
        session.subscribe(move |shapes: &Shapes| {
            redraws.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            for shape in shapes.all() {
                debug!(?shape, "overlay redraw");
            }
        });
    }

    let mut applied = Vec::new();
    for event in &script.events {
        match *event {
            Event::DragStart { handle } => session.drag_start(handle),
            Event::DragMove { x, y } => {
                session.drag_move(Point::new(x, y));
            }
            Event::DragEnd => {
                session.drag_end();
            }
            Event::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
            Event::Apply => {
                applied.extend(session.apply());
                // A run-queue consumer on a current-thread runtime only gets
                // polled when this task yields.
                tokio::task::yield_now().await;
            }
            Event::Teardown => session.teardown(),
        }
    }

    while !session.is_settled() {
        tokio::time::sleep(config.debounce).await;
    }
    let shapes = session.shapes();
    session.teardown();

    let redraws = redraws.load(std::sync::atomic::Ordering::Relaxed);
    info!(%analysis_id, events = script.events.len(), applies = applied.len(), redraws, "replay finished");
    Ok(ReplayOutcome { analysis_id, shapes, applied, redraws })
}
