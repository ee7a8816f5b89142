//! Comfort domain — pure functions, zero I/O.
//!
//! ```text
//!  (T, RH) ──▶ humidity::absolute_humidity_mg_per_m3 ──▶ gas sensor calibration
//!  (T, RH) ──▶ index::DiscomfortIndex ──▶ actuation::ActuationState
//!                                          ├─ servo angle / duty
//!                                          └─ expression + palette
//! ```
//!
//! Everything in here is deterministic and total over its documented
//! domain, so the orchestrator can recompute outputs from scratch every
//! cycle.

pub mod actuation;
pub mod humidity;
pub mod index;

pub use actuation::{ActuationState, Color565, ComfortBand, Expression, Palette};
pub use humidity::absolute_humidity_mg_per_m3;
pub use index::DiscomfortIndex;
