//! Hardware collaborator boundary for the OLED companion display core.
//!
//! This crate defines the trait seams the controller drives and the battery
//! sampling pipeline built on them. Everything register-level stays inside
//! the implementing drivers.
//!
//! # Architecture Layers
//!
//! ```text
//! Controller (controller crate)
//!         ↓
//! Collaborator seams (this crate - trait abstractions)
//!         ↓
//! Vendor drivers (ADC peripheral, lvgl-port style engine, panel bus)
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `hardware`: Physical hardware implementations
//! - `defmt`: Enable defmt logging

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Pedantic lints suppressed for this collaborator-boundary crate:
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod adc;
pub mod battery;
pub mod render;

// Re-export the collaborator seams
pub use adc::{AdcAttenuation, AdcBitWidth, BatteryAdc};
pub use battery::{
    percentage_for_voltage, BatteryConfig, BatteryReading, BatterySampler, HardwareInitError,
};
pub use render::{Element, EngineError, RenderEngine, ScrollMode};
