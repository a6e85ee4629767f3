//! Cinematic Viewer Module
//!
//! Full-screen carousel over a media sequence:
//! - Index to slot mapping
//! - Swipe and keyboard input
//! - Page scroll locking
//! - The viewer session with its animation lock and video handling

pub mod gesture;
pub mod input;
pub mod media;
pub mod scroll;
pub mod session;
pub mod slots;

pub use gesture::{classify_gesture, Direction, Point, SwipeRule, TouchTracker};
pub use input::{Key, KeyOutcome};
pub use media::{MediaItem, MediaKind};
pub use scroll::{MemoryScroll, PageScroll, ScrollGuard};
pub use session::{CinematicViewer, GalleryState, ViewerHost, ViewerSettings, VisibleSlot};
pub use slots::{Slot, SlotLayout, SlotStyle};
