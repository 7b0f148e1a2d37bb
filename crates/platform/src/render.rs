//! Rendering engine collaborator boundary.
//!
//! The engine is an opaque, exclusively-locked resource (the lvgl-port
//! shape): a recursive lock with a timeout, a pending-work step driven once
//! per scheduler tick, and a small command vocabulary over named elements.
//! The widget tree composing those elements lives outside the core.

use embedded_graphics::primitives::Rectangle;
use thiserror_no_std::Error;

/// Display elements the controller addresses by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Scrolling chat text label.
    ChatMessage,
    /// Container around the chat text (hidden when there is no message).
    MessageRegion,
    /// Status-bar network indicator.
    NetworkIcon,
    /// Status-bar battery gauge.
    BatteryIcon,
    /// Companion face glyph.
    EmotionIcon,
    /// Bottom-anchored low-battery warning popup.
    LowBatteryPopup,
}

/// Long-text scroll behavior for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollMode {
    /// Continuous circular scrolling.
    Circular,
    /// Scroll through once, then stop.
    OneShot,
}

/// Engine-side command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// The addressed element has not been created yet. Callers drop the
    /// command and carry on.
    #[error("display element not created yet")]
    NullTarget,
}

/// Exclusive-access rendering engine.
///
/// # Lock contract
///
/// The lock is recursive for its holder: `try_lock` from the task that
/// already holds it must succeed, and every successful `try_lock` pairs
/// with exactly one `unlock`. A `timeout_ms` of zero means immediate
/// give-up. Callers treat a `false` return as "operation skipped this
/// cycle" — never as a fatal condition.
pub trait RenderEngine {
    /// Try to take the engine lock within `timeout_ms`.
    fn try_lock(&mut self, timeout_ms: u32) -> bool;

    /// Release one level of the engine lock.
    fn unlock(&mut self);

    /// Run the engine's own pending work (layout, animation steps, draw).
    /// Invoked once per scheduler render pass, under the lock.
    fn process_pending_work(&mut self);

    /// Set an element's text.
    fn set_text(&mut self, element: Element, text: &str) -> Result<(), EngineError>;

    /// Show or hide an element.
    fn set_visible(&mut self, element: Element, visible: bool) -> Result<(), EngineError>;

    /// Set an element's opacity (0 transparent, 255 opaque).
    fn set_opacity(&mut self, element: Element, opacity: u8) -> Result<(), EngineError>;

    /// Select a label's scroll mode and animation time. `anim_ms` of zero
    /// keeps the engine's default speed.
    fn set_scroll(
        &mut self,
        element: Element,
        mode: ScrollMode,
        anim_ms: u32,
    ) -> Result<(), EngineError>;

    /// Current on-screen area of an element, if it has been laid out.
    fn element_area(&self, element: Element) -> Option<Rectangle>;

    /// Flush one rectangular region to the panel.
    fn flush_region(&mut self, region: Rectangle);

    /// Flush the full frame to the panel.
    fn flush_full(&mut self);
}
