//! Background Audio Module
//!
//! Process-wide background music:
//! - Route table (which track and volume each page uses)
//! - Stepped linear fades
//! - Playback sink abstraction
//! - The coordinator state machine

pub mod coordinator;
pub mod fade;
pub mod route;
pub mod sink;

pub use coordinator::{
    AfterFadeOut, AudioCoordinator, AudioSnapshot, ForegroundAudio, Gesture, Phase, PhaseKind,
    SharedCoordinator,
};
pub use fade::{clamp_volume, Fade, FadeSettings, DEFAULT_FADE_STEPS};
pub use route::{AudioRoute, RouteConfig, RouteTable};
pub use sink::{AutoplayPolicy, MemorySink, PlaybackSink, SinkEvent};
