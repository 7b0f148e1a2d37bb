//! Icon glyph table and the per-slot icon state cache.
//!
//! Identifiers are non-owning `&'static str` references into the glyph
//! table baked into the icon font. The cache stores the reference only —
//! it never copies or frees glyph data. Render passes re-apply the cached
//! identifiers so a lossy pass cannot silently drop an indicator.

/// Network signal glyph (status bar default).
pub const ICON_SIGNAL: &str = "\u{f012}";
/// Battery gauge: full (≥80 %).
pub const ICON_BATTERY_FULL: &str = "\u{f240}";
/// Battery gauge: three-quarter (≥60 %).
pub const ICON_BATTERY_3: &str = "\u{f241}";
/// Battery gauge: half (≥40 %).
pub const ICON_BATTERY_2: &str = "\u{f242}";
/// Battery gauge: quarter (≥20 %).
pub const ICON_BATTERY_1: &str = "\u{f243}";
/// Battery gauge: empty (<20 %).
pub const ICON_BATTERY_EMPTY: &str = "\u{f244}";
/// Chip glyph — the neutral companion face and the simplified-mode fallback.
pub const ICON_CHIP: &str = "\u{f2db}";

/// Emotion glyphs for the companion face.
pub const ICON_FACE_THINKING: &str = "\u{f59b}";
/// Smiling face.
pub const ICON_FACE_HAPPY: &str = "\u{f118}";
/// Neutral face.
pub const ICON_FACE_NEUTRAL: &str = "\u{f11a}";
/// Frowning face.
pub const ICON_FACE_SAD: &str = "\u{f119}";
/// Laughing face.
pub const ICON_FACE_LAUGHING: &str = "\u{f599}";
/// Confused face.
pub const ICON_FACE_CONFUSED: &str = "\u{f57a}";
/// Angry face.
pub const ICON_FACE_ANGRY: &str = "\u{f556}";
/// Surprised face.
pub const ICON_FACE_SURPRISED: &str = "\u{f5c2}";
/// Sleepy face.
pub const ICON_FACE_SLEEPY: &str = "\u{f5c8}";

/// Status-bar indicator slots tracked by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSlot {
    /// Network signal indicator.
    Network,
    /// Battery gauge indicator.
    Battery,
}

impl IconSlot {
    /// Every slot, in re-assertion order.
    pub const ALL: [IconSlot; 2] = [IconSlot::Network, IconSlot::Battery];

    /// Default glyph asserted when a slot has no (or an empty) identifier.
    #[must_use]
    pub const fn default_glyph(self) -> &'static str {
        match self {
            IconSlot::Network => ICON_SIGNAL,
            IconSlot::Battery => ICON_BATTERY_EMPTY,
        }
    }
}

/// Last-asserted glyph per indicator slot.
///
/// The rendering engine may reset or hide elements between passes; the
/// controller replays this cache on every render pass.
#[derive(Debug, Clone)]
pub struct IconCache {
    network: &'static str,
    battery: &'static str,
}

impl IconCache {
    /// A cache holding each slot's default glyph.
    #[must_use]
    pub const fn new() -> Self {
        IconCache {
            network: IconSlot::Network.default_glyph(),
            battery: IconSlot::Battery.default_glyph(),
        }
    }

    /// Store `glyph` for `slot`. An empty identifier falls back to the
    /// slot's default.
    pub fn set(&mut self, slot: IconSlot, glyph: &'static str) {
        let glyph = if glyph.is_empty() {
            slot.default_glyph()
        } else {
            glyph
        };
        match slot {
            IconSlot::Network => self.network = glyph,
            IconSlot::Battery => self.battery = glyph,
        }
    }

    /// The glyph currently cached for `slot`.
    #[must_use]
    pub fn get(&self, slot: IconSlot) -> &'static str {
        match slot {
            IconSlot::Network => self.network,
            IconSlot::Battery => self.battery,
        }
    }
}

impl Default for IconCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Battery gauge glyph for a 0–100 percentage.
#[must_use]
pub const fn battery_icon_for(percentage: u8) -> &'static str {
    if percentage >= 80 {
        ICON_BATTERY_FULL
    } else if percentage >= 60 {
        ICON_BATTERY_3
    } else if percentage >= 40 {
        ICON_BATTERY_2
    } else if percentage >= 20 {
        ICON_BATTERY_1
    } else {
        ICON_BATTERY_EMPTY
    }
}

/// Emotion glyph for a named companion emotion.
///
/// Under simplified icon mode every emotion collapses to the chip glyph, as
/// do unknown names.
#[must_use]
pub fn emotion_icon_for(emotion: &str, simplified: bool) -> &'static str {
    if simplified {
        return ICON_CHIP;
    }
    match emotion {
        "thinking" | "curious" => ICON_FACE_THINKING,
        "happy" => ICON_FACE_HAPPY,
        "neutral" => ICON_FACE_NEUTRAL,
        "sad" => ICON_FACE_SAD,
        "excited" => ICON_FACE_LAUGHING,
        "confused" => ICON_FACE_CONFUSED,
        "angry" => ICON_FACE_ANGRY,
        "surprised" => ICON_FACE_SURPRISED,
        "sleepy" => ICON_FACE_SLEEPY,
        _ => ICON_CHIP,
    }
}
