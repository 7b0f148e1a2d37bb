//! OLED companion display controller.
//!
//! Adaptive refresh scheduling, capacity-bounded chat text, icon
//! re-assertion and exclusive-access arbitration over an lvgl-port style
//! rendering engine, for a battery-powered monochrome OLED device.
//!
//! # Architecture
//!
//! ```text
//! Device tasks (tick timer, chat pipeline, battery monitor)
//!         ↓
//! DisplayController (this crate)
//!         ↓
//! Collaborator seams (platform crate - engine, ADC traits)
//!         ↓
//! Vendor drivers (lvgl-port, panel bus, ADC peripheral)
//! ```
//!
//! # Sharing across tasks
//!
//! The controller serializes engine access internally, but the controller
//! value itself needs an owner. Tasks share it the usual Embassy way:
//!
//! ```ignore
//! static DISPLAY: StaticCell<SharedController<OledEngine>> = StaticCell::new();
//! let display = DISPLAY.init(SharedController::new(controller));
//! // In a task:
//! let mut guard = display.lock().await;
//! if guard.try_acquire(0) {
//!     let _ = guard.tick().await;
//!     guard.release();
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Pedantic lints too noisy for controller code:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod controller;

pub use config::{ControllerConfig, LOW_BATTERY_WARN_PERCENT};
pub use controller::{DisplayController, MessageOutcome, TickOutcome};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Cross-task wrapper for a [`DisplayController`] owned by a static.
/// The engine type must implement [`platform::RenderEngine`].
pub type SharedController<E> = Mutex<CriticalSectionRawMutex, DisplayController<E>>;

// Re-export the types callers need at the seam without importing the
// platform and ui crates themselves.
pub use platform::{Element, EngineError, ScrollMode};
pub use ui::{IconSlot, OptimizationLevel, Profile, RenderedText};
