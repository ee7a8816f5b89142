//! Application core — pure domain orchestration, zero I/O.
//!
//! This module contains the ComfortMeter's control flow: the cycle
//! pipeline and the speech-text rotation.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod speech;
