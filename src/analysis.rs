//! Analysis parameters and the run requests that carry them to the backend.
//!
//! DESIGN
//! ======
//! Parameters are a flat snapshot of the committed shapes, built fresh for
//! every Apply. The request is handed to a [`RunSink`] and forgotten: the
//! sink returns nothing, and job progress is observed elsewhere.

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::shape::Shapes;

// =============================================================================
// PARAMETERS + REQUEST
// =============================================================================

/// Flattened snapshot of the ring and disk, as sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParameters {
    pub rad_in: f64,
    pub rad_out: f64,
    pub real_rad: f64,
    pub real_centerx: f64,
    pub real_centery: f64,
}

impl AnalysisParameters {
    #[must_use]
    pub fn from_shapes(shapes: &Shapes) -> Self {
        Self {
            rad_in: shapes.ring.rad_in,
            rad_out: shapes.ring.rad_out,
            real_rad: shapes.disk.radius,
            real_centerx: shapes.disk.center.x,
            real_centery: shapes.disk.center.y,
        }
    }
}

impl fmt::Display for AnalysisParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "real_rad={:.2}, real_center=(x={:.2}, y={:.2}), fourier_rad_in={:.2}, fourier_rad_out={:.2}",
            self.real_rad, self.real_centerx, self.real_centery, self.rad_in, self.rad_out
        )
    }
}

/// Analysis kinds the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisType {
    ApplyFftMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(rename = "type")]
    pub analysis_type: AnalysisType,
    pub parameters: AnalysisParameters,
}

impl RunRequest {
    #[must_use]
    pub fn fft_mask(parameters: AnalysisParameters) -> Self {
        Self { analysis_type: AnalysisType::ApplyFftMask, parameters }
    }
}

/// A request as handed to a sink, with its routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IssuedRun {
    pub analysis_id: Uuid,
    pub job_slot: u32,
    pub request: RunRequest,
}

// =============================================================================
// SINKS
// =============================================================================

/// The external job subsystem. Dispatch is fire-and-forget.
pub trait RunSink: Send + Sync {
    fn run(&self, analysis_id: Uuid, job_slot: u32, request: RunRequest);
}

/// Forwards requests into a bounded queue without ever blocking the caller.
///
/// A full or closed queue drops the request with a warning.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<IssuedRun>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<IssuedRun>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl RunSink for ChannelSink {
    fn run(&self, analysis_id: Uuid, job_slot: u32, request: RunRequest) {
        match self.tx.try_send(IssuedRun { analysis_id, job_slot, request }) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(%analysis_id, job_slot, "run queue full; dropping request");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(%analysis_id, job_slot, "run queue closed; dropping request");
            }
        }
    }
}

/// Keeps every request in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    runs: Arc<Mutex<Vec<IssuedRun>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn runs(&self) -> Vec<IssuedRun> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl RunSink for RecordingSink {
    fn run(&self, analysis_id: Uuid, job_slot: u32, request: RunRequest) {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(IssuedRun { analysis_id, job_slot, request });
    }
}
