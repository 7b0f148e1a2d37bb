//! Optimization levels and their fixed refresh/capacity profiles.
//!
//! Each level maps to a constant [`Profile`]; nothing is derived at runtime
//! except the level selection itself. Board variants pick a level at
//! construction time — there is no per-board subtype.

use crate::chat::TEXT_STAGE_CAPACITY;

/// Resource-pressure tier selecting a fixed display profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationLevel {
    /// Full features, every tick renders.
    #[default]
    None,
    /// Light throttling, animations kept.
    Low,
    /// Animations off, bounded chat text.
    Medium,
    /// Minimum fidelity: simplified icons, time-boxed render passes.
    High,
}

/// Fixed per-level display behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Ticks between actual render passes. Never zero.
    pub refresh_divisor: u8,
    /// Whether scrolling/label animations run.
    pub animations_enabled: bool,
    /// Collapse emotion glyphs to a single static icon and time-box passes.
    pub simplified_icon_mode: bool,
    /// Chat text budget in characters, including the ellipsis reserve.
    pub text_capacity: usize,
}

impl OptimizationLevel {
    /// The constant profile for this level.
    #[must_use]
    pub const fn profile(self) -> Profile {
        match self {
            OptimizationLevel::None => Profile {
                refresh_divisor: 1,
                animations_enabled: true,
                simplified_icon_mode: false,
                text_capacity: TEXT_STAGE_CAPACITY,
            },
            OptimizationLevel::Low => Profile {
                refresh_divisor: 2,
                animations_enabled: true,
                simplified_icon_mode: false,
                text_capacity: TEXT_STAGE_CAPACITY,
            },
            OptimizationLevel::Medium => Profile {
                refresh_divisor: 3,
                animations_enabled: false,
                simplified_icon_mode: false,
                text_capacity: 79,
            },
            OptimizationLevel::High => Profile {
                refresh_divisor: 5,
                animations_enabled: false,
                simplified_icon_mode: true,
                text_capacity: 39,
            },
        }
    }
}

impl Profile {
    /// Coerce an invalid zero divisor to 1 (a zero divisor would render never).
    #[must_use]
    pub const fn sanitized(self) -> Profile {
        Profile {
            refresh_divisor: if self.refresh_divisor == 0 {
                1
            } else {
                self.refresh_divisor
            },
            animations_enabled: self.animations_enabled,
            simplified_icon_mode: self.simplified_icon_mode,
            text_capacity: self.text_capacity,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        OptimizationLevel::None.profile()
    }
}
