//! Playback sinks
//!
//! A sink is the one physical media resource a coordinator (or a viewer's
//! foreground video) drives. Hosts inject their own implementation; the
//! in-memory [`MemorySink`] backs simulations and tests.

use crate::audio::fade::clamp_volume;
use crate::error::{Result, VitrineError};

/// A media resource that can be loaded, played, paused and faded
pub trait PlaybackSink {
    /// Currently loaded source, if any
    fn source(&self) -> Option<&str>;

    /// Load a new source. Playback is paused and the position reset.
    fn load(&mut self, source: &str);

    /// Reset the playback position to the start
    fn rewind(&mut self);

    /// Current volume in 0.0..=1.0
    fn volume(&self) -> f32;

    /// Set the volume; implementations clamp into 0.0..=1.0
    fn set_volume(&mut self, volume: f32);

    fn is_paused(&self) -> bool;

    /// Attempt to start playback
    ///
    /// May be rejected by the environment (autoplay policy, missing or
    /// undecodable source). A rejected call leaves the sink paused.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);
}

/// Whether a [`MemorySink`] accepts play requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    /// Every play request succeeds
    #[default]
    Allow,
    /// Every play request is rejected
    Block,
    /// The next `n` play requests are rejected, then playback is allowed
    BlockNext(u32),
}

/// Observable operations recorded by a [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Load(String),
    Rewind,
    Play,
    PlayRejected,
    Pause,
}

/// In-memory playback sink
#[derive(Debug, Clone)]
pub struct MemorySink {
    source: Option<String>,
    volume: f32,
    paused: bool,
    position_ms: u64,
    policy: AutoplayPolicy,
    events: Vec<SinkEvent>,
    volume_history: Vec<f32>,
}

impl MemorySink {
    /// Create a paused sink with no source and full volume
    pub fn new() -> Self {
        Self {
            source: None,
            volume: 1.0,
            paused: true,
            position_ms: 0,
            policy: AutoplayPolicy::Allow,
            events: Vec::new(),
            volume_history: Vec::new(),
        }
    }

    /// Create a sink that applies the given autoplay policy
    pub fn with_policy(policy: AutoplayPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    pub fn set_policy(&mut self, policy: AutoplayPolicy) {
        self.policy = policy;
    }

    /// Move the playback position forward while playing
    pub fn advance_position(&mut self, millis: u64) {
        if !self.paused {
            self.position_ms += millis;
        }
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Every recorded operation, oldest first
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Every volume written through `set_volume`, oldest first
    pub fn volume_history(&self) -> &[f32] {
        &self.volume_history
    }

    pub fn clear_history(&mut self) {
        self.events.clear();
        self.volume_history.clear();
    }

    /// Number of successful play calls
    pub fn play_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Play))
            .count()
    }

    /// Audible means playing at a non-zero volume
    pub fn is_audible(&self) -> bool {
        !self.paused && self.volume > 0.0
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSink for MemorySink {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
        self.paused = true;
        self.position_ms = 0;
        self.events.push(SinkEvent::Load(source.to_string()));
    }

    fn rewind(&mut self) {
        self.position_ms = 0;
        self.events.push(SinkEvent::Rewind);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        self.volume_history.push(self.volume);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) -> Result<()> {
        let source = match &self.source {
            Some(source) => source.clone(),
            None => {
                self.events.push(SinkEvent::PlayRejected);
                return Err(VitrineError::NoSource);
            }
        };

        let rejected = match self.policy {
            AutoplayPolicy::Allow => false,
            AutoplayPolicy::Block => true,
            AutoplayPolicy::BlockNext(0) => {
                self.policy = AutoplayPolicy::Allow;
                false
            }
            AutoplayPolicy::BlockNext(n) => {
                self.policy = if n == 1 {
                    AutoplayPolicy::Allow
                } else {
                    AutoplayPolicy::BlockNext(n - 1)
                };
                true
            }
        };

        if rejected {
            self.events.push(SinkEvent::PlayRejected);
            return Err(VitrineError::PlaybackRejected {
                source_uri: source,
                reason: "autoplay blocked".to_string(),
            });
        }

        self.paused = false;
        self.events.push(SinkEvent::Play);
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.events.push(SinkEvent::Pause);
        }
    }
}
