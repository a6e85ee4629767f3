//! Vitrine - Portfolio Presentation Engine
//!
//! Headless state machines behind a photography portfolio site:
//! 1. Background audio - one ambient track per route, stepped volume fades,
//!    autoplay-policy handling, and suppression while foreground video plays
//! 2. Cinematic viewer - a three-slot carousel with an animation lock,
//!    swipe/keyboard navigation, and page scroll locking
//!
//! # Time
//!
//! Nothing here owns a timer. Hosts drive time explicitly with `advance`
//! (or `step` for single fade ticks), which keeps every transition
//! deterministic.

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod viewer;

pub use error::{Result, VitrineError};
