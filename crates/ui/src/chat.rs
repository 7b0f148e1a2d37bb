//! Chat text formatting — newline folding, capacity bounding, ellipsis.
//!
//! [`format_chat_text`] produces a fresh [`RenderedText`] value per call.
//! There is no shared scratch buffer: concurrent renders can never alias
//! each other's output.

/// Staging buffer capacity in bytes. This is the effective text budget for
/// the unconstrained levels; the constrained profiles (79/39) are strictly
/// smaller.
pub const TEXT_STAGE_CAPACITY: usize = 256;

/// Bytes reserved out of every capacity: three for the ellipsis plus the
/// historical terminator slot.
const ELLIPSIS_RESERVE: usize = 4;

/// A formatted chat message, bounded by the active profile's capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    text: heapless::String<TEXT_STAGE_CAPACITY>,
    truncated: bool,
}

impl RenderedText {
    /// The formatted text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Whether the input exceeded the capacity and was cut at the ellipsis.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Length of the formatted text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when the formatted text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Format `content` for the message region under a `capacity`-byte budget.
///
/// Returns `None` for empty content — the message region is hidden, whatever
/// the level. Otherwise every line break collapses to a single space, and at
/// most `capacity - 4` bytes are copied (whole characters only); longer
/// input gets a three-character ellipsis and the `truncated` flag.
#[must_use]
pub fn format_chat_text(content: &str, capacity: usize) -> Option<RenderedText> {
    if content.is_empty() {
        return None;
    }

    let usable = capacity
        .min(TEXT_STAGE_CAPACITY)
        .saturating_sub(ELLIPSIS_RESERVE);

    let mut text = heapless::String::new();
    let mut truncated = false;
    for c in content.chars() {
        let c = if c == '\n' { ' ' } else { c };
        if text.len().saturating_add(c.len_utf8()) > usable {
            truncated = true;
            break;
        }
        // Cannot fail: the byte bound was checked above.
        text.push(c).ok();
    }
    if truncated {
        // The reserve guarantees room for the ellipsis.
        text.push_str("...").ok();
    }

    Some(RenderedText { text, truncated })
}
