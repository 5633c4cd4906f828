//! Shared numeric constants for the ringmask crate.

// ── Timing ──────────────────────────────────────────────────────

/// Default quiet window for debounced shape setters, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Default capacity of the bounded run-request queue.
pub const DEFAULT_RUN_QUEUE_CAPACITY: usize = 64;

// ── Job slots ───────────────────────────────────────────────────

/// Job slot showing the Fourier-space frame with the ring overlay.
pub const FOURIER_JOB_SLOT: u32 = 0;

/// Job slot showing the real-space frame with the disk overlay.
pub const REAL_JOB_SLOT: u32 = 1;

/// Job slot that receives the masked result when the user applies.
pub const APPLY_JOB_SLOT: u32 = 2;

// ── Initial geometry ────────────────────────────────────────────

/// Initial inner ring radius as a fraction of the smaller image dimension.
pub const RING_INNER_RATIO: f64 = 0.25;

/// Initial outer ring radius as a fraction of the smaller image dimension.
pub const RING_OUTER_RATIO: f64 = 0.5;

/// Initial disk radius as a fraction of the smaller image dimension.
pub const DISK_RADIUS_RATIO: f64 = 0.25;
