//! Index to slot mapping for the three-slot carousel
//!
//! Pure functions of the active index and the sequence length `n`. Every
//! modulo here treats `n == 0` as yielding 0, so an empty or single-item
//! sequence never produces an out-of-range index.

use std::fmt;

use serde::Serialize;

/// Wrap any signed offset into `0..n`
///
/// # Example
/// ```
/// use vitrine::viewer::slots::wrap_index;
/// assert_eq!(wrap_index(-1, 3), 2);
/// assert_eq!(wrap_index(3, 3), 0);
/// assert_eq!(wrap_index(5, 0), 0);
/// ```
pub fn wrap_index(index: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    index.rem_euclid(n as i64) as usize
}

pub fn previous_index(active: usize, n: usize) -> usize {
    wrap_index(active as i64 - 1, n)
}

pub fn next_index(active: usize, n: usize) -> usize {
    wrap_index(active as i64 + 1, n)
}

/// Clamp a host-supplied index into `0..n`
pub fn clamp_index(index: usize, n: usize) -> usize {
    index.min(n.saturating_sub(1))
}

/// Visual position of a rendered item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Previous,
    Active,
    Next,
}

impl Slot {
    pub fn style(&self) -> SlotStyle {
        match self {
            Slot::Previous => SlotStyle::PREVIOUS,
            Slot::Active => SlotStyle::ACTIVE,
            Slot::Next => SlotStyle::NEXT,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Previous => write!(f, "previous"),
            Slot::Active => write!(f, "active"),
            Slot::Next => write!(f, "next"),
        }
    }
}

/// Target transform for a slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotStyle {
    /// Horizontal offset as a percentage of the stage width
    pub offset_percent: f32,
    pub scale: f32,
    pub opacity: f32,
    pub blur_px: f32,
    pub z_index: i32,
}

impl SlotStyle {
    pub const PREVIOUS: SlotStyle = SlotStyle {
        offset_percent: -40.0,
        scale: 0.92,
        opacity: 0.25,
        blur_px: 8.0,
        z_index: 1,
    };

    pub const ACTIVE: SlotStyle = SlotStyle {
        offset_percent: 0.0,
        scale: 1.0,
        opacity: 1.0,
        blur_px: 0.0,
        z_index: 10,
    };

    pub const NEXT: SlotStyle = SlotStyle {
        offset_percent: 40.0,
        scale: 0.92,
        opacity: 0.25,
        blur_px: 8.0,
        z_index: 1,
    };
}

/// Indices occupying the three slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    pub previous: usize,
    pub active: usize,
    pub next: usize,
    len: usize,
}

impl SlotLayout {
    pub fn compute(active: usize, n: usize) -> Self {
        let active = clamp_index(active, n);
        Self {
            previous: previous_index(active, n),
            active,
            next: next_index(active, n),
            len: n,
        }
    }

    /// Slot an index renders in; `None` means it is not rendered
    ///
    /// The active slot wins over previous, which wins over next.
    pub fn slot_for(&self, index: usize) -> Option<Slot> {
        if self.len == 0 || index >= self.len {
            None
        } else if index == self.active {
            Some(Slot::Active)
        } else if index == self.previous {
            Some(Slot::Previous)
        } else if index == self.next {
            Some(Slot::Next)
        } else {
            None
        }
    }

    /// Slots to mount, in previous/active/next order, each index at most once
    pub fn visible(&self) -> Vec<(Slot, usize)> {
        if self.len == 0 {
            return Vec::new();
        }
        let mut out: Vec<(Slot, usize)> = Vec::with_capacity(3);
        for (slot, index) in [
            (Slot::Previous, self.previous),
            (Slot::Active, self.active),
            (Slot::Next, self.next),
        ] {
            if out.iter().all(|(_, seen)| *seen != index) {
                out.push((slot, index));
            }
        }
        // A surviving entry keeps the slot its index actually resolves to
        out.iter_mut().for_each(|(slot, index)| {
            if let Some(resolved) = self.slot_for(*index) {
                *slot = resolved;
            }
        });
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
