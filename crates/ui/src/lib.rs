//! Display UI state layer — optimization profiles, chat text formatting, icon cache.
//!
//! This crate is `no_std` by default; it only uses `core` + `heapless`.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]


pub mod chat;
pub mod icons;
pub mod profile;

pub use chat::{format_chat_text, RenderedText, TEXT_STAGE_CAPACITY};
pub use icons::{battery_icon_for, emotion_icon_for, IconCache, IconSlot};
pub use profile::{OptimizationLevel, Profile};
