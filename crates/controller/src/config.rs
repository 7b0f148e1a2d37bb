//! Controller configuration.
//!
//! Board variants select an optimization level and timing here instead of
//! subclassing a per-board display type; everything else derives from the
//! level's fixed profile.

use ui::OptimizationLevel;

/// Gauge percentage at or below which callers should raise the low-battery
/// warning popup.
pub const LOW_BATTERY_WARN_PERCENT: u8 = 20;

/// Construction-time controller configuration.
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Optimization level applied at construction.
    pub initial_level: OptimizationLevel,
    /// Engine lock acquisition bound for scoped operations, in
    /// milliseconds. Zero means immediate give-up.
    pub lock_timeout_ms: u32,
    /// Soft wall-clock budget for a bounded render pass, in microseconds.
    pub render_budget_us: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            initial_level: OptimizationLevel::None,
            lock_timeout_ms: 0,
            render_budget_us: 2000,
        }
    }
}
