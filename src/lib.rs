//! Interactive region-of-interest editing for FFT mask analysis.
//!
//! A session lets the user drag handles over an image to shape two regions:
//! an annulus in Fourier space (inner and outer radius around the image
//! center) and a disk in real space (movable center plus radius). Every drag
//! tick is clamped by a pure constraint, converted to a radius or center, and
//! fed through a debounced setter into the committed shape store. Overlay
//! renderers subscribe to the store; an explicit Apply snapshots the committed
//! state into one run request for the external analysis backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Points, distances, and radius-from-drag handlers |
//! | [`constraint`] | Pure clamps applied to every candidate handle position |
//! | [`debounce`] | Last-value-wins debounced setter on Tokio timers |
//! | [`image`] | Image metadata and default shape geometry |
//! | [`shape`] | Ring/disk shapes, derived handles, committed store with subscriptions |
//! | [`handle`] | Handle kinds, drag-host hooks, and the gesture state machine |
//! | [`analysis`] | Analysis parameters, run requests, and run-request sinks |
//! | [`session`] | The editing session tying all of the above together |
//! | [`config`] | Environment-derived session configuration |
//! | [`replay`] | JSON gesture scripts replayed against a session |
//! | [`consts`] | Shared constants (debounce window, job slots, radius ratios) |

pub mod analysis;
pub mod config;
pub mod constraint;
pub mod consts;
pub mod debounce;
pub mod geometry;
pub mod handle;
pub mod image;
pub mod replay;
pub mod session;
pub mod shape;
