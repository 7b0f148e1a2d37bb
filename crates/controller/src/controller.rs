//! Adaptive display-refresh controller.
//!
//! One [`DisplayController`] owns the shared display resource for the
//! device's lifetime. A periodic task drives [`DisplayController::tick`]
//! inside an acquired refresh session; message staging, icon updates and
//! level changes arrive from other tasks and serialize through the engine
//! lock. Render work is throttled by the active profile's refresh divisor
//! and, under simplified-icon mode, time-boxed against a soft budget so a
//! slow pass cannot starve the watchdog.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::Instant;
use platform::{Element, EngineError, RenderEngine, ScrollMode};
use ui::{
    battery_icon_for, emotion_icon_for, format_chat_text, IconCache, IconSlot,
    OptimizationLevel, Profile, RenderedText,
};

use crate::config::ControllerConfig;

/// One-shot scroll animation time at Medium, in milliseconds.
const MEDIUM_SCROLL_ANIM_MS: u32 = 5000;
/// One-shot scroll animation time at High, in milliseconds (slowest).
const HIGH_SCROLL_ANIM_MS: u32 = 8000;

/// What a [`DisplayController::tick`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No refresh session is open; the tick did nothing.
    NotHeld,
    /// Throttled by the refresh divisor; no render pass.
    Skipped,
    /// Exactly one render pass ran.
    Rendered {
        /// The soft wall-clock budget was exceeded. The pass still
        /// completed; this is a diagnostic, not an abort.
        budget_exceeded: bool,
    },
}

/// What a [`DisplayController::render_message`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Text formatted and staged for the next render pass.
    Staged(RenderedText),
    /// Empty content; the message region was hidden.
    Hidden,
    /// Engine lock unavailable within the timeout; retry next cycle.
    Skipped,
}

/// Chat text staged for re-application on every render pass.
struct StagedMessage {
    text: RenderedText,
    scroll: ScrollMode,
    anim_ms: u32,
}

/// Display controller over an exclusively-locked rendering engine.
pub struct DisplayController<E: RenderEngine> {
    engine: E,
    config: ControllerConfig,
    level: OptimizationLevel,
    profile: Profile,
    refresh_counter: u8,
    dirty: bool,
    /// Open session nesting on the recursive engine lock.
    lock_depth: u8,
    /// Lock-free mirror of `lock_depth > 0` for status queries.
    locked: AtomicBool,
    icons: IconCache,
    staged: Option<StagedMessage>,
}

impl<E: RenderEngine> DisplayController<E> {
    /// Take ownership of `engine` and apply the configured initial level.
    ///
    /// Issues a best-effort full-frame flush so the initial layout reaches
    /// the panel.
    pub fn new(engine: E, config: ControllerConfig) -> Self {
        let mut controller = DisplayController {
            engine,
            config,
            level: config.initial_level,
            profile: config.initial_level.profile().sanitized(),
            refresh_counter: 0,
            dirty: false,
            lock_depth: 0,
            locked: AtomicBool::new(false),
            icons: IconCache::new(),
            staged: None,
        };
        if controller.begin_session(controller.config.lock_timeout_ms) {
            controller.engine.flush_full();
            controller.end_session();
        }
        controller
    }

    /// The active optimization level.
    #[must_use]
    pub fn level(&self) -> OptimizationLevel {
        self.level
    }

    /// The active profile.
    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Whether staged state has changed since the last render pass.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Lock-free session status. Never blocks on render work.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }

    /// Give the engine back (tear-down and tests).
    #[must_use]
    pub fn into_engine(self) -> E {
        self.engine
    }

    // ── Exclusive-access sessions ───────────────────────────────────────────

    /// Open a refresh session within `timeout_ms`. `false` means the
    /// display is busy: skip this cycle and retry on the next one.
    pub fn try_acquire(&mut self, timeout_ms: u32) -> bool {
        self.begin_session(timeout_ms)
    }

    /// Unconditionally close one session level.
    pub fn release(&mut self) {
        self.engine.unlock();
        self.lock_depth = self.lock_depth.saturating_sub(1);
        if self.lock_depth == 0 {
            self.locked.store(false, Ordering::Relaxed);
        }
    }

    fn begin_session(&mut self, timeout_ms: u32) -> bool {
        if !self.engine.try_lock(timeout_ms) {
            #[cfg(feature = "defmt")]
            defmt::warn!("display lock unavailable; operation skipped this cycle");
            return false;
        }
        self.lock_depth = self.lock_depth.saturating_add(1);
        self.locked.store(true, Ordering::Relaxed);
        true
    }

    fn end_session(&mut self) {
        self.release();
    }

    // ── Optimization policy ─────────────────────────────────────────────────

    /// Switch the optimization level. Total: always applies, resetting the
    /// refresh counter; the follow-up full-frame flush is best-effort.
    pub fn set_level(&mut self, level: OptimizationLevel) {
        self.level = level;
        self.profile = level.profile().sanitized();
        self.refresh_counter = 0;
        self.dirty = true;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "optimization level changed; refresh 1/{=u8}",
            self.profile.refresh_divisor
        );
        // Structural change: the whole frame must reach the panel.
        if self.begin_session(self.config.lock_timeout_ms) {
            self.engine.flush_full();
            self.end_session();
        }
    }

    // ── Refresh scheduling ──────────────────────────────────────────────────

    /// Run one scheduler tick inside an open refresh session.
    ///
    /// Without a session this is a no-op reporting
    /// [`TickOutcome::NotHeld`] — a scheduling hint, not a caller error.
    /// Renders every `refresh_divisor`-th call; under simplified-icon mode
    /// the pass is time-boxed against the configured soft budget and
    /// followed by a cooperative yield.
    pub async fn tick(&mut self) -> TickOutcome {
        if self.lock_depth == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("tick without an open refresh session");
            return TickOutcome::NotHeld;
        }

        self.refresh_counter = self.refresh_counter.saturating_add(1);
        if self.refresh_counter < self.profile.refresh_divisor {
            return TickOutcome::Skipped;
        }
        self.refresh_counter = 0;
        self.dirty = false;

        let bounded = self.profile.simplified_icon_mode;
        let start = Instant::now();
        self.render_pass();
        let budget_exceeded =
            bounded && start.elapsed().as_micros() > u64::from(self.config.render_budget_us);
        if budget_exceeded {
            #[cfg(feature = "defmt")]
            defmt::warn!("render pass over budget; may trip the task watchdog");
        }

        // Throttled levels hand the CPU back before the next tick.
        if bounded || self.level == OptimizationLevel::Medium {
            embassy_futures::yield_now().await;
        }
        TickOutcome::Rendered { budget_exceeded }
    }

    /// One render pass: replay cached icons and staged text, then drive the
    /// engine's own pending work.
    fn render_pass(&mut self) {
        self.reassert_icons();
        if let Some(staged) = self.staged.as_ref() {
            report(
                self.engine
                    .set_scroll(Element::ChatMessage, staged.scroll, staged.anim_ms),
            );
            report(self.engine.set_text(Element::ChatMessage, staged.text.as_str()));
        }
        if self.profile.simplified_icon_mode {
            report(self.engine.set_opacity(Element::EmotionIcon, 255));
        }
        self.engine.process_pending_work();
    }

    /// Re-apply every cached indicator and clear its hidden flag, so a
    /// lossy or partially-reset pass never drops one.
    fn reassert_icons(&mut self) {
        for slot in IconSlot::ALL {
            let element = Self::element_for(slot);
            report(self.engine.set_text(element, self.icons.get(slot)));
            report(self.engine.set_visible(element, true));
        }
    }

    // ── Chat text ───────────────────────────────────────────────────────────

    /// Format and stage a chat message under the active profile.
    ///
    /// Empty content hides the message region at every level. Staging does
    /// not flush the panel; the next [`Self::tick`] render pass does. At
    /// the capacity-bounded levels a cooperative yield follows staging,
    /// bounding this call's latency contribution.
    pub async fn render_message(&mut self, role: &str, content: &str) -> MessageOutcome {
        // Role selects styling in the widget tree, outside this core.
        let _ = role;
        if !self.begin_session(self.config.lock_timeout_ms) {
            return MessageOutcome::Skipped;
        }
        let outcome = self.stage_message(content);
        self.end_session();

        if matches!(outcome, MessageOutcome::Staged(_))
            && matches!(
                self.level,
                OptimizationLevel::Medium | OptimizationLevel::High
            )
        {
            embassy_futures::yield_now().await;
        }
        outcome
    }

    fn stage_message(&mut self, content: &str) -> MessageOutcome {
        let Some(text) = format_chat_text(content, self.profile.text_capacity) else {
            self.staged = None;
            report(self.engine.set_visible(Element::MessageRegion, false));
            return MessageOutcome::Hidden;
        };

        let (scroll, anim_ms) = self.scroll_plan();
        report(self.engine.set_scroll(Element::ChatMessage, scroll, anim_ms));
        report(self.engine.set_text(Element::ChatMessage, text.as_str()));
        report(self.engine.set_visible(Element::MessageRegion, true));
        self.staged = Some(StagedMessage {
            text: text.clone(),
            scroll,
            anim_ms,
        });
        self.dirty = true;
        MessageOutcome::Staged(text)
    }

    fn scroll_plan(&self) -> (ScrollMode, u32) {
        match self.level {
            // Unconstrained levels scroll continuously at the engine's
            // default speed.
            OptimizationLevel::None | OptimizationLevel::Low => (ScrollMode::Circular, 0),
            OptimizationLevel::Medium => (ScrollMode::OneShot, MEDIUM_SCROLL_ANIM_MS),
            OptimizationLevel::High => (ScrollMode::OneShot, HIGH_SCROLL_ANIM_MS),
        }
    }

    // ── Indicators ──────────────────────────────────────────────────────────

    /// Cache an indicator glyph and apply it best-effort. The cache is
    /// replayed on every render pass, so a failed immediate application
    /// heals on the next tick.
    pub fn set_icon(&mut self, slot: IconSlot, identifier: &'static str) {
        self.icons.set(slot, identifier);
        self.dirty = true;
        if self.begin_session(self.config.lock_timeout_ms) {
            let element = Self::element_for(slot);
            report(self.engine.set_text(element, self.icons.get(slot)));
            report(self.engine.set_visible(element, true));
            self.end_session();
        }
    }

    /// Map a gauge percentage to its glyph, cache it, and partially flush
    /// the indicator regions.
    pub fn update_battery_display(&mut self, percentage: u8) {
        let glyph = battery_icon_for(percentage);
        self.icons.set(IconSlot::Battery, glyph);
        self.dirty = true;
        if self.begin_session(self.config.lock_timeout_ms) {
            report(self.engine.set_text(Element::BatteryIcon, glyph));
            // Re-assert the network indicator alongside the gauge.
            report(
                self.engine
                    .set_text(Element::NetworkIcon, self.icons.get(IconSlot::Network)),
            );
            report(self.engine.set_visible(Element::NetworkIcon, true));
            // Icon-only change: flush just the one-pixel-inflated regions.
            for element in [Element::NetworkIcon, Element::BatteryIcon] {
                if let Some(area) = self.engine.element_area(element) {
                    self.engine.flush_region(area.offset(1));
                }
            }
            self.end_session();
        }
    }

    /// Apply the glyph for a named emotion to the companion face. Under
    /// simplified-icon mode every emotion collapses to the chip glyph.
    /// Returns `false` when the display was busy.
    pub fn set_emotion(&mut self, emotion: &str) -> bool {
        let glyph = emotion_icon_for(emotion, self.profile.simplified_icon_mode);
        if !self.begin_session(self.config.lock_timeout_ms) {
            return false;
        }
        report(self.engine.set_text(Element::EmotionIcon, glyph));
        self.end_session();
        true
    }

    /// Show or hide the low-battery warning popup. Returns `false` when
    /// the display was busy.
    pub fn set_low_battery_warning(&mut self, visible: bool) -> bool {
        if !self.begin_session(self.config.lock_timeout_ms) {
            return false;
        }
        report(self.engine.set_visible(Element::LowBatteryPopup, visible));
        self.end_session();
        true
    }

    const fn element_for(slot: IconSlot) -> Element {
        match slot {
            IconSlot::Network => Element::NetworkIcon,
            IconSlot::Battery => Element::BatteryIcon,
        }
    }
}

/// A failed engine command means the element does not exist yet: log and
/// carry on.
fn report(result: Result<(), EngineError>) {
    if let Err(_e) = result {
        #[cfg(feature = "defmt")]
        defmt::warn!("engine command dropped: {}", _e);
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayController, MEDIUM_SCROLL_ANIM_MS, HIGH_SCROLL_ANIM_MS};
    use crate::config::ControllerConfig;
    use platform::{Element, EngineError, RenderEngine, ScrollMode};
    use ui::OptimizationLevel;

    /// Minimal engine: grants every lock, accepts every command.
    struct NoopEngine;

    impl RenderEngine for NoopEngine {
        fn try_lock(&mut self, _timeout_ms: u32) -> bool {
            true
        }
        fn unlock(&mut self) {}
        fn process_pending_work(&mut self) {}
        fn set_text(&mut self, _element: Element, _text: &str) -> Result<(), EngineError> {
            Ok(())
        }
        fn set_visible(&mut self, _element: Element, _visible: bool) -> Result<(), EngineError> {
            Ok(())
        }
        fn set_opacity(&mut self, _element: Element, _opacity: u8) -> Result<(), EngineError> {
            Ok(())
        }
        fn set_scroll(
            &mut self,
            _element: Element,
            _mode: ScrollMode,
            _anim_ms: u32,
        ) -> Result<(), EngineError> {
            Ok(())
        }
        fn element_area(
            &self,
            _element: Element,
        ) -> Option<embedded_graphics::primitives::Rectangle> {
            None
        }
        fn flush_region(&mut self, _region: embedded_graphics::primitives::Rectangle) {}
        fn flush_full(&mut self) {}
    }

    fn controller_at(level: OptimizationLevel) -> DisplayController<NoopEngine> {
        DisplayController::new(
            NoopEngine,
            ControllerConfig {
                initial_level: level,
                ..ControllerConfig::default()
            },
        )
    }

    #[test]
    fn test_scroll_plan_circular_when_unconstrained() {
        for level in [OptimizationLevel::None, OptimizationLevel::Low] {
            let controller = controller_at(level);
            assert_eq!(controller.scroll_plan(), (ScrollMode::Circular, 0));
        }
    }

    #[test]
    fn test_scroll_plan_slows_with_pressure() {
        let medium = controller_at(OptimizationLevel::Medium);
        let high = controller_at(OptimizationLevel::High);
        assert_eq!(
            medium.scroll_plan(),
            (ScrollMode::OneShot, MEDIUM_SCROLL_ANIM_MS)
        );
        assert_eq!(high.scroll_plan(), (ScrollMode::OneShot, HIGH_SCROLL_ANIM_MS));
        assert!(HIGH_SCROLL_ANIM_MS > MEDIUM_SCROLL_ANIM_MS);
    }

    #[test]
    fn test_release_without_session_does_not_underflow() {
        let mut controller = controller_at(OptimizationLevel::None);
        controller.release();
        controller.release();
        assert!(!controller.is_locked());
        assert!(controller.try_acquire(0));
        assert!(controller.is_locked());
    }
}
