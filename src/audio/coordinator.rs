//! Background Audio Coordinator
//!
//! Owns the single background playback sink and decides which route
//! controls it. Handles:
//! - Route binding with fade-out, source swap and fade-in
//! - Gesture gating (nothing plays before a real user interaction)
//! - Manual play/pause from a mute button
//! - Suppression while a foreground video plays, and resume afterwards
//!
//! Sequencing is an explicit phase machine. Public operations only set up a
//! phase; [`AudioCoordinator::step`] is the single transition function that
//! applies one fade step and runs whatever follows a completed fade.
//! [`AudioCoordinator::advance`] turns elapsed time into steps.
//!
//! Nothing here returns an error. Sink failures are logged and leave the
//! coordinator in a consistent paused state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;

use crate::audio::fade::{Fade, FadeSettings};
use crate::audio::route::{AudioRoute, RouteTable};
use crate::audio::sink::PlaybackSink;
use crate::config::VitrineConfig;

/// A coordinator shared by every component of a single-threaded host
///
/// Hosts must not hold a `borrow()` / `borrow_mut()` across calls into a
/// viewer, including its drop: a busy handle rejects suppress and resume.
pub type SharedCoordinator<S> = Rc<RefCell<AudioCoordinator<S>>>;

/// Document-level interactions that count as a user gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Scroll,
    KeyPress,
    TouchStart,
}

/// What happens once a fade-out reaches silence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterFadeOut {
    /// Pause and rest
    Pause,
    /// Pause, load the route's track, and start it if `resume` still holds
    Swap { route: AudioRoute, resume: bool },
}

/// Coordinator phases
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Resting: either playing at steady volume or paused
    Idle,
    /// Ramping to silence before a pause or a track swap
    FadingOut { fade: Fade, then: AfterFadeOut },
    /// Track swap pending; resolved within the same transition
    Swapping { route: AudioRoute, resume: bool },
    /// Ramping up to the bound route's target volume
    FadingIn { fade: Fade },
    /// Paused on behalf of a foreground video
    Suppressed,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Idle => PhaseKind::Idle,
            Phase::FadingOut { .. } => PhaseKind::FadingOut,
            Phase::Swapping { .. } => PhaseKind::Swapping,
            Phase::FadingIn { .. } => PhaseKind::FadingIn,
            Phase::Suppressed => PhaseKind::Suppressed,
        }
    }

    fn fade(&self) -> Option<&Fade> {
        match self {
            Phase::FadingOut { fade, .. } | Phase::FadingIn { fade } => Some(fade),
            _ => None,
        }
    }
}

/// Fieldless view of [`Phase`] for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Idle,
    FadingOut,
    Swapping,
    FadingIn,
    Suppressed,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Idle => write!(f, "Idle"),
            PhaseKind::FadingOut => write!(f, "FadingOut"),
            PhaseKind::Swapping => write!(f, "Swapping"),
            PhaseKind::FadingIn => write!(f, "FadingIn"),
            PhaseKind::Suppressed => write!(f, "Suppressed"),
        }
    }
}

/// Point-in-time view of the coordinator, e.g. for a mute button icon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSnapshot {
    pub route: Option<AudioRoute>,
    pub is_playing: bool,
    pub has_interacted: bool,
    pub suppressed: bool,
    pub volume: f32,
    pub phase: PhaseKind,
}

/// Narrow surface foreground video uses to silence background audio
///
/// Both calls return whether the request reached the coordinator. A
/// `false` means nothing changed and the caller still owes the call.
pub trait ForegroundAudio {
    fn suppress_for_foreground(&mut self) -> bool;
    fn resume_from_foreground(&mut self) -> bool;
}

/// Coordinates the single background playback sink
#[derive(Debug)]
pub struct AudioCoordinator<S: PlaybackSink> {
    sink: S,
    routes: RouteTable,
    fades: FadeSettings,

    /// Route bound to the sink's current source
    current_route: Option<AudioRoute>,

    /// Set on the first qualifying gesture or manual toggle; never reset
    has_user_interacted: bool,

    /// Foreground video holds the audio
    suppressed: bool,

    /// Live volume when suppression began (reported, not restored)
    volume_before_suppression: f32,

    listener_armed: bool,

    /// Route used by the gesture handler when nothing is bound yet
    fallback_route: Option<AudioRoute>,

    /// A play request was rejected; the next gesture retries
    retry_on_gesture: bool,

    phase: Phase,

    /// Elapsed time not yet consumed by fade steps
    pending: Duration,
}

impl<S: PlaybackSink> AudioCoordinator<S> {
    /// Create a coordinator around a sink
    ///
    /// # Example
    /// ```
    /// use vitrine::audio::{AudioCoordinator, AudioRoute, MemorySink};
    /// use vitrine::config::VitrineConfig;
    ///
    /// let mut audio = AudioCoordinator::new(MemorySink::new(), &VitrineConfig::default());
    /// audio.bind_route(AudioRoute::Home);
    ///
    /// // No gesture yet: the track is loaded but stays paused
    /// assert!(!audio.is_playing());
    /// assert_eq!(audio.current_route(), Some(AudioRoute::Home));
    /// ```
    pub fn new(sink: S, config: &VitrineConfig) -> Self {
        Self::with_tables(sink, config.routes.clone(), config.fades.clone())
    }

    pub fn with_tables(sink: S, routes: RouteTable, fades: FadeSettings) -> Self {
        Self {
            sink,
            routes,
            fades,
            current_route: None,
            has_user_interacted: false,
            suppressed: false,
            volume_before_suppression: 0.0,
            listener_armed: false,
            fallback_route: None,
            retry_on_gesture: false,
            phase: Phase::Idle,
            pending: Duration::ZERO,
        }
    }

    /// Wrap into a shared handle for components of one host
    pub fn into_shared(self) -> SharedCoordinator<S> {
        Rc::new(RefCell::new(self))
    }

    // ========================================================================
    // Route Binding
    // ========================================================================

    /// Declare that the calling component now represents `route`
    ///
    /// Safe to call on every render: binding the route that is already
    /// playing or already held by a foreground video changes nothing. A
    /// paused route (e.g. after the mute button) is rewound and restarted.
    pub fn bind_route(&mut self, route: AudioRoute) {
        // A swap in flight keeps its fade; only its destination follows the
        // latest binding.
        if let Phase::FadingOut {
            then: AfterFadeOut::Swap { route: pending, .. },
            ..
        } = &mut self.phase
        {
            if *pending == route {
                debug!("[AUDIO] Swap to '{}' already in flight", route);
            } else {
                info!("[AUDIO] Swap retargeted '{}' -> '{}'", pending, route);
                *pending = route;
            }
            return;
        }

        if self.current_route == Some(route) && (!self.sink.is_paused() || self.suppressed) {
            debug!("[AUDIO] Route '{}' already bound", route);
            return;
        }

        info!("[AUDIO] Binding route '{}'", route);

        if self.sink.is_paused() {
            self.phase = Phase::Swapping {
                route,
                resume: true,
            };
            self.settle();
        } else {
            self.begin_fade_out(
                self.fades.route_fade(),
                AfterFadeOut::Swap {
                    route,
                    resume: true,
                },
            );
        }
    }

    // ========================================================================
    // Gesture Gating
    // ========================================================================

    /// Start observing document-level gestures
    ///
    /// Idempotent; the first caller's route becomes the fallback used when a
    /// gesture arrives before any route is bound.
    pub fn arm_interaction_listener(&mut self, route: AudioRoute) {
        if self.listener_armed {
            return;
        }
        self.listener_armed = true;
        self.fallback_route = Some(route);
        debug!("[AUDIO] Interaction listener armed (fallback '{}')", route);
    }

    /// Deliver a document-level gesture
    ///
    /// Ignored until the listener is armed. The first gesture unlocks
    /// playback; later gestures only matter after a rejected play.
    pub fn on_user_gesture(&mut self, gesture: Gesture) {
        if !self.listener_armed {
            debug!("[AUDIO] {:?} ignored, listener not armed", gesture);
            return;
        }

        let first = !self.has_user_interacted;
        self.has_user_interacted = true;
        if !first && !self.retry_on_gesture {
            return;
        }

        if !self.sink.is_paused() || self.suppressed {
            return;
        }

        let route = match self.current_route.or(self.fallback_route) {
            Some(route) => route,
            None => return,
        };
        if self.current_route.is_none() {
            self.swap_to(route);
        }

        info!("[AUDIO] {:?} unlocked playback for '{}'", gesture, route);
        let target = self.routes.get(route).target_volume;
        self.start_playback(target, self.fades.route_fade());
    }

    // ========================================================================
    // Manual Toggle
    // ========================================================================

    /// Mute button handler; returns whether audio is now playing
    ///
    /// Counts as a user interaction even when it is the very first one.
    pub fn toggle_manual(&mut self, route: AudioRoute) -> bool {
        self.has_user_interacted = true;

        if let Phase::FadingOut {
            then: AfterFadeOut::Swap { resume, .. },
            ..
        } = &mut self.phase
        {
            *resume = !*resume;
            let now_playing = *resume;
            if now_playing {
                self.suppressed = false;
            } else {
                self.retry_on_gesture = false;
            }
            info!(
                "[AUDIO] Toggle during swap: {}",
                if now_playing { "play" } else { "stay muted" }
            );
            return now_playing;
        }

        let target = self.routes.get(route).target_volume;
        let duration = self.fades.route_fade();
        let fading_to_pause = matches!(
            self.phase,
            Phase::FadingOut {
                then: AfterFadeOut::Pause,
                ..
            }
        );

        if self.sink.is_paused() || fading_to_pause {
            self.suppressed = false;
            if self.current_route.is_none() {
                self.swap_to(route);
            }
            info!("[AUDIO] Manual play");
            if self.sink.is_paused() {
                self.start_playback(target, duration)
            } else {
                self.begin_fade_in(target, duration);
                true
            }
        } else {
            info!("[AUDIO] Manual pause");
            self.retry_on_gesture = false;
            self.begin_fade_out(duration, AfterFadeOut::Pause);
            false
        }
    }

    // ========================================================================
    // Foreground Suppression
    // ========================================================================

    /// Silence background audio while a foreground video plays
    ///
    /// No-op when nothing is audible or suppression is already active.
    pub fn suppress_for_foreground(&mut self) {
        if self.suppressed {
            debug!("[SUPPRESS] Already suppressed");
            return;
        }
        if !self.is_playing() {
            debug!("[SUPPRESS] Nothing audible, skipping");
            return;
        }

        self.volume_before_suppression = self.sink.volume();
        self.suppressed = true;
        info!(
            "[SUPPRESS] Silencing background audio (was {:.3})",
            self.volume_before_suppression
        );

        // A pending swap already fades to silence; it will see the flag.
        if !matches!(
            self.phase,
            Phase::FadingOut {
                then: AfterFadeOut::Swap { .. },
                ..
            }
        ) {
            self.begin_fade_out(self.fades.suppress_fade(), AfterFadeOut::Pause);
        }
    }

    /// Release suppression after the foreground video stops
    ///
    /// Fades up to the bound route's configured volume, not the volume
    /// recorded at suppression time. Without a prior suppression, a user
    /// interaction, or a bound route this only clears the flag.
    pub fn resume_from_foreground(&mut self) {
        if !self.suppressed {
            debug!("[RESUME] Not suppressed, nothing to resume");
            return;
        }
        self.suppressed = false;

        let route = match (self.has_user_interacted, self.current_route) {
            (true, Some(route)) => route,
            _ => {
                if self.phase == Phase::Suppressed {
                    self.phase = Phase::Idle;
                }
                debug!("[RESUME] Flag cleared without playback");
                return;
            }
        };

        info!("[RESUME] Restoring background audio for '{}'", route);
        let target = self.routes.get(route).target_volume;
        let duration = self.fades.resume_fade();

        match self.phase {
            // The swap continuation starts playback now that the flag is clear
            Phase::FadingOut {
                then: AfterFadeOut::Swap { .. },
                ..
            } => {}
            _ if self.sink.is_paused() => {
                self.start_playback(target, duration);
            }
            _ => self.begin_fade_in(target, duration),
        }
    }

    // ========================================================================
    // Transition Function
    // ========================================================================

    /// Apply one fade step and run the continuation of a completed fade
    pub fn step(&mut self) {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        self.phase = match phase {
            Phase::FadingIn { mut fade } => {
                if let Some(volume) = fade.next_volume() {
                    self.sink.set_volume(volume);
                }
                if fade.is_complete() {
                    debug!("[FADE] Fade-in complete at {:.3}", fade.target());
                    Phase::Idle
                } else {
                    Phase::FadingIn { fade }
                }
            }
            Phase::FadingOut { mut fade, then } => {
                if let Some(volume) = fade.next_volume() {
                    self.sink.set_volume(volume);
                }
                if !fade.is_complete() {
                    Phase::FadingOut { fade, then }
                } else {
                    self.sink.pause();
                    debug!("[FADE] Fade-out complete, paused");
                    match then {
                        AfterFadeOut::Pause => self.rest_phase(),
                        AfterFadeOut::Swap { route, resume } => Phase::Swapping { route, resume },
                    }
                }
            }
            other => other,
        };
        self.settle();
    }

    /// Advance the coordinator's clock, applying every fade step that is due
    pub fn advance(&mut self, elapsed: Duration) {
        self.pending += elapsed;
        loop {
            let interval = match self.phase.fade() {
                Some(fade) => fade.step_interval(),
                None => {
                    self.pending = Duration::ZERO;
                    return;
                }
            };
            if !interval.is_zero() {
                if self.pending < interval {
                    return;
                }
                self.pending -= interval;
            }
            self.step();
        }
    }

    /// Run steps until no fade is in flight
    pub fn finish_fades(&mut self) {
        while self.phase.fade().is_some() {
            self.step();
        }
    }

    fn settle(&mut self) {
        if let Phase::Swapping { route, resume } = self.phase {
            self.swap_to(route);
            if resume && self.can_play() {
                let target = self.routes.get(route).target_volume;
                self.start_playback(target, self.fades.route_fade());
            } else {
                self.phase = self.rest_phase();
            }
        }
    }

    fn swap_to(&mut self, route: AudioRoute) {
        let source = self.routes.get(route).track_source.clone();
        if self.sink.source() != Some(source.as_str()) {
            debug!("[AUDIO] Loading '{}'", source);
            self.sink.load(&source);
        }
        self.sink.rewind();
        self.current_route = Some(route);
    }

    /// Play from silence and fade up; returns whether the sink started
    fn start_playback(&mut self, target: f32, duration: Duration) -> bool {
        self.sink.set_volume(0.0);
        match self.sink.play() {
            Ok(()) => {
                self.retry_on_gesture = false;
                self.phase = Phase::FadingIn {
                    fade: Fade::new(0.0, target, duration, self.fades.steps),
                };
                true
            }
            Err(e) => {
                warn!("[AUDIO] Play rejected, waiting for interaction: {}", e);
                self.retry_on_gesture = true;
                self.phase = self.rest_phase();
                false
            }
        }
    }

    fn begin_fade_in(&mut self, target: f32, duration: Duration) {
        self.phase = Phase::FadingIn {
            fade: Fade::new(self.sink.volume(), target, duration, self.fades.steps),
        };
    }

    fn begin_fade_out(&mut self, duration: Duration, then: AfterFadeOut) {
        self.phase = Phase::FadingOut {
            fade: Fade::new(self.sink.volume(), 0.0, duration, self.fades.steps),
            then,
        };
    }

    fn can_play(&self) -> bool {
        self.has_user_interacted && !self.suppressed
    }

    fn rest_phase(&self) -> Phase {
        if self.suppressed {
            Phase::Suppressed
        } else {
            Phase::Idle
        }
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    /// Whether background audio is playing or about to be
    ///
    /// A fade-out heading to a pause already counts as stopped; a fade-out
    /// heading to a track swap counts as playing if the new track will start.
    pub fn is_playing(&self) -> bool {
        match &self.phase {
            Phase::FadingOut {
                then: AfterFadeOut::Pause,
                ..
            } => false,
            Phase::FadingOut {
                then: AfterFadeOut::Swap { resume, .. },
                ..
            } => *resume && self.can_play(),
            _ => !self.sink.is_paused(),
        }
    }

    pub fn current_route(&self) -> Option<AudioRoute> {
        self.current_route
    }

    pub fn has_user_interacted(&self) -> bool {
        self.has_user_interacted
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn volume_before_suppression(&self) -> f32 {
        self.volume_before_suppression
    }

    pub fn is_listener_armed(&self) -> bool {
        self.listener_armed
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn volume(&self) -> f32 {
        self.sink.volume()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn snapshot(&self) -> AudioSnapshot {
        AudioSnapshot {
            route: self.current_route,
            is_playing: self.is_playing(),
            has_interacted: self.has_user_interacted,
            suppressed: self.suppressed,
            volume: self.sink.volume(),
            phase: self.phase.kind(),
        }
    }
}

impl<S: PlaybackSink> ForegroundAudio for AudioCoordinator<S> {
    fn suppress_for_foreground(&mut self) -> bool {
        AudioCoordinator::suppress_for_foreground(self);
        true
    }

    fn resume_from_foreground(&mut self) -> bool {
        AudioCoordinator::resume_from_foreground(self);
        true
    }
}

impl<T: ForegroundAudio + ?Sized> ForegroundAudio for &mut T {
    fn suppress_for_foreground(&mut self) -> bool {
        (**self).suppress_for_foreground()
    }

    fn resume_from_foreground(&mut self) -> bool {
        (**self).resume_from_foreground()
    }
}

impl<T: ForegroundAudio> ForegroundAudio for Rc<RefCell<T>> {
    fn suppress_for_foreground(&mut self) -> bool {
        match self.try_borrow_mut() {
            Ok(mut inner) => inner.suppress_for_foreground(),
            Err(_) => {
                warn!("[SUPPRESS] Coordinator busy, suppression skipped");
                false
            }
        }
    }

    fn resume_from_foreground(&mut self) -> bool {
        match self.try_borrow_mut() {
            Ok(mut inner) => inner.resume_from_foreground(),
            Err(_) => {
                warn!("[RESUME] Coordinator busy, resume still owed");
                false
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
