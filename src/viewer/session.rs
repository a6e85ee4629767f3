//! Cinematic Viewer Session
//!
//! A modal overlay over a borrowed media sequence showing three slots
//! (previous / active / next). Navigation intents arrive from keys, chevron
//! buttons, touch swipes and progress dots; all of them pass through a
//! timer-based animation lock that drops, never queues, requests made while
//! a transition is in flight.
//!
//! The viewer is a controlled component: it reports the index it wants via
//! [`ViewerHost::on_index_change`] and only moves once the host feeds the
//! index back through [`CinematicViewer::sync_index`].
//!
//! Video items borrow the background audio: entering one suppresses it,
//! leaving one (or closing the viewer, on any path) resumes it exactly once.

use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::audio::{ForegroundAudio, PlaybackSink};
use crate::error::{Result, VitrineError};
use crate::viewer::gesture::{
    Direction, Point, SwipeRule, TouchTracker, DEFAULT_MAX_VERTICAL_RATIO, DEFAULT_SWIPE_MIN_PX,
};
use crate::viewer::input::{Key, KeyOutcome};
use crate::viewer::media::MediaItem;
use crate::viewer::scroll::{PageScroll, ScrollGuard};
use crate::viewer::slots::{clamp_index, next_index, previous_index, Slot, SlotLayout, SlotStyle};

/// Receives the viewer's requests; owns the controlled index
pub trait ViewerHost {
    fn on_index_change(&mut self, index: usize);
    fn on_request_close(&mut self);
}

/// Minimal host that stores what the viewer asked for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryState {
    pub index: usize,
    pub close_requested: bool,
    /// Every index reported, oldest first
    pub changes: Vec<usize>,
}

impl GalleryState {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

impl ViewerHost for GalleryState {
    fn on_index_change(&mut self, index: usize) {
        self.index = index;
        self.changes.push(index);
    }

    fn on_request_close(&mut self) {
        self.close_requested = true;
    }
}

/// Timing and input thresholds for the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Slot transition animation length, in milliseconds
    pub transition_ms: u64,
    /// Extra lock time after the transition, in milliseconds
    pub lock_margin_ms: u64,
    pub swipe_min_px: f32,
    pub max_vertical_ratio: f32,
    /// Volume of the foreground video
    pub video_volume: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            transition_ms: 300,
            lock_margin_ms: 50,
            swipe_min_px: DEFAULT_SWIPE_MIN_PX,
            max_vertical_ratio: DEFAULT_MAX_VERTICAL_RATIO,
            video_volume: 0.55,
        }
    }
}

impl ViewerSettings {
    /// How long navigation stays locked after a transition starts
    pub fn lock_window(&self) -> Duration {
        Duration::from_millis(self.transition_ms + self.lock_margin_ms)
    }

    pub fn swipe_rule(&self) -> SwipeRule {
        SwipeRule {
            min_px: self.swipe_min_px,
            max_vertical_ratio: self.max_vertical_ratio,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.swipe_min_px > 0.0) {
            return Err(VitrineError::InvalidConfig {
                reason: format!("swipe_min_px must be positive, got {}", self.swipe_min_px),
            });
        }
        if !(self.max_vertical_ratio > 0.0) {
            return Err(VitrineError::InvalidConfig {
                reason: format!(
                    "max_vertical_ratio must be positive, got {}",
                    self.max_vertical_ratio
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.video_volume) {
            return Err(VitrineError::InvalidConfig {
                reason: format!("video_volume {} is outside 0.0..=1.0", self.video_volume),
            });
        }
        Ok(())
    }
}

/// One mounted item of the carousel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSlot<'a> {
    pub slot: Slot,
    pub index: usize,
    pub item: &'a MediaItem,
    pub style: SlotStyle,
}

/// Open viewer session
pub struct CinematicViewer<'a, A, V, P>
where
    A: ForegroundAudio,
    V: PlaybackSink,
    P: PageScroll,
{
    items: &'a [MediaItem],
    active_index: usize,
    settings: ViewerSettings,

    /// Viewer-local clock driving the animation lock
    now: Duration,
    locked_until: Option<Duration>,

    touch: TouchTracker,

    audio: A,
    video: V,
    video_playing: bool,

    /// This session suppressed background audio and owes one resume
    suppression_held: bool,

    _scroll: ScrollGuard<P>,
}

impl<'a, A, V, P> CinematicViewer<'a, A, V, P>
where
    A: ForegroundAudio,
    V: PlaybackSink,
    P: PageScroll,
{
    /// Open the viewer at `start_index`, clamped into range
    ///
    /// Disables page scroll until the viewer is dropped. If the starting
    /// item is a video, background audio is suppressed and the video
    /// starts.
    pub fn open(
        items: &'a [MediaItem],
        start_index: usize,
        audio: A,
        video: V,
        page: P,
        settings: ViewerSettings,
    ) -> Self {
        let active_index = clamp_index(start_index, items.len());
        if active_index != start_index {
            debug!(
                "[VIEWER] Start index {} clamped to {}",
                start_index, active_index
            );
        }
        info!(
            "[VIEWER] Open at {} of {} items",
            active_index,
            items.len()
        );

        let mut viewer = Self {
            items,
            active_index,
            settings,
            now: Duration::ZERO,
            locked_until: None,
            touch: TouchTracker::default(),
            audio,
            video,
            video_playing: false,
            suppression_held: false,
            _scroll: ScrollGuard::acquire(page),
        };
        viewer.enter_active();
        viewer
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Ask the host to move one item in `direction`
    ///
    /// Returns false, and does nothing, when there is nowhere to go or a
    /// transition is still locked.
    pub fn navigate<H: ViewerHost>(&mut self, direction: Direction, host: &mut H) -> bool {
        let n = self.items.len();
        if n <= 1 || self.is_animating() {
            return false;
        }

        self.engage_lock();
        let target = match direction {
            Direction::Next => next_index(self.active_index, n),
            Direction::Previous => previous_index(self.active_index, n),
        };
        debug!(
            "[VIEWER] Navigate {:?}: {} -> {}",
            direction, self.active_index, target
        );
        host.on_index_change(target);
        true
    }

    pub fn next<H: ViewerHost>(&mut self, host: &mut H) -> bool {
        self.navigate(Direction::Next, host)
    }

    pub fn previous<H: ViewerHost>(&mut self, host: &mut H) -> bool {
        self.navigate(Direction::Previous, host)
    }

    /// Jump straight to `index` (progress dots)
    ///
    /// Gated by the same lock as [`Self::navigate`]. Out-of-range indices
    /// and the current index are ignored.
    pub fn select<H: ViewerHost>(&mut self, index: usize, host: &mut H) -> bool {
        if index >= self.items.len() || index == self.active_index || self.is_animating() {
            return false;
        }
        self.engage_lock();
        debug!("[VIEWER] Select {} -> {}", self.active_index, index);
        host.on_index_change(index);
        true
    }

    /// Accept the host's controlled index
    pub fn sync_index(&mut self, index: usize) {
        let index = clamp_index(index, self.items.len());
        if index == self.active_index {
            return;
        }
        self.leave_active();
        self.active_index = index;
        self.enter_active();
    }

    // ========================================================================
    // Input Channels
    // ========================================================================

    pub fn handle_key<H: ViewerHost>(&mut self, key: Key, host: &mut H) -> KeyOutcome {
        match key {
            Key::ArrowRight => {
                self.navigate(Direction::Next, host);
                KeyOutcome::HANDLED
            }
            Key::ArrowLeft => {
                self.navigate(Direction::Previous, host);
                KeyOutcome::HANDLED
            }
            Key::Escape => {
                self.request_close(host);
                KeyOutcome::HANDLED
            }
            Key::Space if self.active_is_video() => {
                self.toggle_video();
                KeyOutcome::CONSUMED
            }
            Key::Space | Key::Other => KeyOutcome::IGNORED,
        }
    }

    pub fn touch_start(&mut self, point: Point) {
        self.touch.begin(point);
    }

    /// Finish a touch; a recognised swipe navigates
    pub fn touch_end<H: ViewerHost>(&mut self, point: Point, host: &mut H) -> bool {
        match self.touch.end(point, &self.settings.swipe_rule()) {
            Some(direction) => self.navigate(direction, host),
            None => false,
        }
    }

    /// Click on the active slot; toggles a video, ignored for photos
    pub fn click_active(&mut self) {
        if self.active_is_video() {
            self.toggle_video();
        }
    }

    /// Close button, Escape, or backdrop click
    pub fn request_close<H: ViewerHost>(&mut self, host: &mut H) {
        debug!("[VIEWER] Close requested");
        host.on_request_close();
    }

    /// End the session; same as dropping the viewer
    pub fn close(self) {}

    // ========================================================================
    // Foreground Video
    // ========================================================================

    /// Flip the active video's own playback; returns whether it now plays
    ///
    /// Never touches the background audio coordinator.
    pub fn toggle_video(&mut self) -> bool {
        if !self.active_is_video() {
            return false;
        }
        if self.video_playing {
            self.video.pause();
            self.video_playing = false;
        } else {
            self.video_playing = self.try_play_video();
        }
        self.video_playing
    }

    fn try_play_video(&mut self) -> bool {
        match self.video.play() {
            Ok(()) => true,
            Err(e) => {
                debug!("[VIEWER] Video play rejected, showing overlay: {}", e);
                false
            }
        }
    }

    fn enter_active(&mut self) {
        let item = match self.items.get(self.active_index) {
            Some(item) => item,
            None => return,
        };
        if !item.is_video() {
            self.video_playing = false;
            return;
        }

        // A resume still owed from the previous video means the audio is
        // still held; no second suppress.
        if !self.suppression_held {
            self.suppression_held = self.audio.suppress_for_foreground();
        }

        self.video.load(&item.source);
        self.video.set_volume(self.settings.video_volume);
        self.video_playing = self.try_play_video();
        debug!(
            "[VIEWER] Video '{}' active (playing: {})",
            item.id, self.video_playing
        );
    }

    fn leave_active(&mut self) {
        if self.active_is_video() {
            self.video.pause();
        }
        self.video_playing = false;
        self.deliver_resume();
    }

    fn deliver_resume(&mut self) {
        if self.suppression_held && self.audio.resume_from_foreground() {
            self.suppression_held = false;
        }
    }

    /// Retry a resume the coordinator could not take when a video was left
    ///
    /// Returns true once nothing is owed. While a video is active the
    /// suppression is legitimately held and this does nothing.
    pub fn retry_resume(&mut self) -> bool {
        if !self.active_is_video() {
            self.deliver_resume();
        }
        !self.suppression_held || self.active_is_video()
    }

    // ========================================================================
    // Animation Lock
    // ========================================================================

    /// Advance the viewer clock; releases the lock once its window passes
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        if let Some(until) = self.locked_until {
            if self.now >= until {
                self.locked_until = None;
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.locked_until.map_or(false, |until| self.now < until)
    }

    fn engage_lock(&mut self) {
        self.locked_until = Some(self.now + self.settings.lock_window());
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn layout(&self) -> SlotLayout {
        SlotLayout::compute(self.active_index, self.items.len())
    }

    /// Items to mount, each index and each item id at most once
    ///
    /// When two slots carry the same item id, the active slot keeps it, then
    /// previous, then next. The result is in previous/active/next order.
    pub fn visible_slots(&self) -> Vec<VisibleSlot<'a>> {
        let items = self.items;
        let mut candidates = self.layout().visible();
        candidates.sort_by_key(|(slot, _)| precedence(*slot));

        let mut out: Vec<VisibleSlot<'a>> = Vec::with_capacity(3);
        for (slot, index) in candidates {
            let item = &items[index];
            if out.iter().any(|v| v.item.id == item.id) {
                continue;
            }
            out.push(VisibleSlot {
                slot,
                index,
                item,
                style: slot.style(),
            });
        }
        out.sort_by_key(|v| display_order(v.slot));
        out
    }

    pub fn slot_for(&self, index: usize) -> Option<Slot> {
        self.layout().slot_for(index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn current_item(&self) -> Option<&'a MediaItem> {
        self.items.get(self.active_index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// One-based position and total, for a "3 / 12" label
    pub fn counter(&self) -> (usize, usize) {
        if self.items.is_empty() {
            (0, 0)
        } else {
            (self.active_index + 1, self.items.len())
        }
    }

    /// One flag per item; true marks the active dot
    pub fn progress_dots(&self) -> Vec<bool> {
        (0..self.items.len())
            .map(|i| i == self.active_index)
            .collect()
    }

    pub fn active_is_video(&self) -> bool {
        self.current_item().map_or(false, MediaItem::is_video)
    }

    pub fn is_video_playing(&self) -> bool {
        self.video_playing
    }

    /// Play button overlay shows when a video is active but not playing
    pub fn shows_play_overlay(&self) -> bool {
        self.active_is_video() && !self.video_playing
    }

    pub fn holds_suppression(&self) -> bool {
        self.suppression_held
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }
}

fn precedence(slot: Slot) -> u8 {
    match slot {
        Slot::Active => 0,
        Slot::Previous => 1,
        Slot::Next => 2,
    }
}

fn display_order(slot: Slot) -> u8 {
    match slot {
        Slot::Previous => 0,
        Slot::Active => 1,
        Slot::Next => 2,
    }
}

impl<'a, A, V, P> Drop for CinematicViewer<'a, A, V, P>
where
    A: ForegroundAudio,
    V: PlaybackSink,
    P: PageScroll,
{
    fn drop(&mut self) {
        self.leave_active();
        if self.suppression_held {
            warn!("[VIEWER] Closed while background audio was busy, resume not delivered");
        }
        info!("[VIEWER] Closed");
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AutoplayPolicy, MemorySink};
    use crate::viewer::scroll::MemoryScroll;

    const LOCK: Duration = Duration::from_millis(350);

    /// Counts suppress/resume calls
    #[derive(Debug, Default)]
    struct CountingAudio {
        suppressed: u32,
        resumed: u32,
    }

    impl ForegroundAudio for CountingAudio {
        fn suppress_for_foreground(&mut self) -> bool {
            self.suppressed += 1;
            true
        }

        fn resume_from_foreground(&mut self) -> bool {
            self.resumed += 1;
            true
        }
    }

    fn photos(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::photo(format!("p{}", i), format!("/img/{}.jpg", i)))
            .collect()
    }

    fn open<'a>(
        items: &'a [MediaItem],
        start: usize,
        audio: &'a mut CountingAudio,
    ) -> CinematicViewer<'a, &'a mut CountingAudio, MemorySink, MemoryScroll> {
        CinematicViewer::open(
            items,
            start,
            audio,
            MemorySink::new(),
            MemoryScroll::new(),
            ViewerSettings::default(),
        )
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    #[test]
    fn test_navigate_reports_without_moving() {
        let items = photos(3);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        assert!(viewer.next(&mut host));
        assert_eq!(host.index, 1);
        assert_eq!(viewer.active_index(), 0);

        viewer.sync_index(host.index);
        assert_eq!(viewer.active_index(), 1);
    }

    #[test]
    fn test_lock_drops_second_request() {
        let items = photos(5);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        assert!(viewer.next(&mut host));
        assert!(!viewer.next(&mut host));
        assert_eq!(host.changes, vec![1]);
        assert!(viewer.is_animating());
    }

    #[test]
    fn test_lock_releases_after_window() {
        let items = photos(5);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        viewer.next(&mut host);
        viewer.sync_index(host.index);
        viewer.advance(Duration::from_millis(349));
        assert!(viewer.is_animating());
        assert!(!viewer.next(&mut host));

        viewer.advance(Duration::from_millis(1));
        assert!(!viewer.is_animating());
        assert!(viewer.next(&mut host));
        assert_eq!(host.changes, vec![1, 2]);
    }

    #[test]
    fn test_previous_wraps_from_first() {
        let items = photos(4);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        viewer.previous(&mut host);
        assert_eq!(host.index, 3);
    }

    #[test]
    fn test_single_item_cannot_navigate() {
        let items = photos(1);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        assert!(!viewer.next(&mut host));
        assert!(!viewer.previous(&mut host));
        assert!(host.changes.is_empty());
        assert!(!viewer.is_animating());
    }

    #[test]
    fn test_empty_sequence_is_inert() {
        let items: Vec<MediaItem> = Vec::new();
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 3, &mut audio);
        let mut host = GalleryState::new(0);

        assert_eq!(viewer.active_index(), 0);
        assert!(!viewer.next(&mut host));
        assert!(!viewer.select(0, &mut host));
        assert!(viewer.visible_slots().is_empty());
        assert_eq!(viewer.counter(), (0, 0));
        assert_eq!(viewer.current_item(), None);
    }

    #[test]
    fn test_start_index_clamped() {
        let items = photos(3);
        let mut audio = CountingAudio::default();
        let viewer = open(&items, 42, &mut audio);
        assert_eq!(viewer.active_index(), 2);
    }

    #[test]
    fn test_select_is_gated_and_engages_lock() {
        let items = photos(6);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        assert!(!viewer.select(0, &mut host));
        assert!(!viewer.select(6, &mut host));
        assert!(viewer.select(4, &mut host));
        assert!(!viewer.select(2, &mut host));
        assert!(!viewer.next(&mut host));
        assert_eq!(host.changes, vec![4]);
    }

    // ------------------------------------------------------------------------
    // Input Channels
    // ------------------------------------------------------------------------

    #[test]
    fn test_keys() {
        let items = photos(3);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 1, &mut audio);
        let mut host = GalleryState::new(1);

        assert_eq!(
            viewer.handle_key(Key::ArrowLeft, &mut host),
            KeyOutcome::HANDLED
        );
        assert_eq!(host.index, 0);
        viewer.sync_index(0);
        viewer.advance(LOCK);

        viewer.handle_key(Key::ArrowRight, &mut host);
        assert_eq!(host.index, 1);

        assert_eq!(viewer.handle_key(Key::Space, &mut host), KeyOutcome::IGNORED);
        assert_eq!(viewer.handle_key(Key::Other, &mut host), KeyOutcome::IGNORED);

        viewer.handle_key(Key::Escape, &mut host);
        assert!(host.close_requested);
    }

    #[test]
    fn test_swipe_navigates() {
        let items = photos(3);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        viewer.touch_start(Point::new(200.0, 100.0));
        assert!(!viewer.touch_end(Point::new(140.0, 150.0), &mut host));
        assert!(host.changes.is_empty());

        viewer.touch_start(Point::new(200.0, 100.0));
        assert!(viewer.touch_end(Point::new(140.0, 120.0), &mut host));
        assert_eq!(host.changes, vec![1]);
    }

    #[test]
    fn test_swipe_right_goes_previous() {
        let items = photos(3);
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        let mut host = GalleryState::new(0);

        viewer.touch_start(Point::new(100.0, 100.0));
        viewer.touch_end(Point::new(180.0, 110.0), &mut host);
        assert_eq!(host.changes, vec![2]);
    }

    // ------------------------------------------------------------------------
    // Slots
    // ------------------------------------------------------------------------

    #[test]
    fn test_visible_slots_for_three() {
        let items = photos(3);
        let mut audio = CountingAudio::default();
        let viewer = open(&items, 0, &mut audio);

        let slots: Vec<(Slot, usize)> = viewer
            .visible_slots()
            .iter()
            .map(|v| (v.slot, v.index))
            .collect();
        assert_eq!(
            slots,
            vec![(Slot::Previous, 2), (Slot::Active, 0), (Slot::Next, 1)]
        );
    }

    #[test]
    fn test_visible_slots_dedup_by_item_id() {
        let mut items = photos(3);
        items[2].id = items[1].id.clone();
        let mut audio = CountingAudio::default();
        let viewer = open(&items, 0, &mut audio);

        let ids: Vec<&str> = viewer
            .visible_slots()
            .iter()
            .map(|v| v.item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "p0"]);
    }

    #[test]
    fn test_duplicate_id_keeps_active_slot() {
        let items = vec![
            MediaItem::photo("x", "/img/x1.jpg"),
            MediaItem::photo("x", "/img/x2.jpg"),
            MediaItem::photo("c", "/img/c.jpg"),
        ];
        let mut audio = CountingAudio::default();
        let viewer = open(&items, 1, &mut audio);

        let slots: Vec<(Slot, usize)> = viewer
            .visible_slots()
            .iter()
            .map(|v| (v.slot, v.index))
            .collect();
        assert_eq!(slots, vec![(Slot::Active, 1), (Slot::Next, 2)]);
    }

    #[test]
    fn test_counter_and_dots() {
        let items = photos(4);
        let mut audio = CountingAudio::default();
        let viewer = open(&items, 2, &mut audio);
        assert_eq!(viewer.counter(), (3, 4));
        assert_eq!(viewer.progress_dots(), vec![false, false, true, false]);
    }

    // ------------------------------------------------------------------------
    // Video and Audio Suppression
    // ------------------------------------------------------------------------

    fn mixed() -> Vec<MediaItem> {
        vec![
            MediaItem::photo("a", "/img/a.jpg"),
            MediaItem::video("b", "/video/b.mp4").with_poster("/video/b.jpg"),
            MediaItem::photo("c", "/img/c.jpg"),
        ]
    }

    #[test]
    fn test_video_entry_suppresses_and_plays() {
        let items = mixed();
        let mut audio = CountingAudio::default();
        {
            let viewer = open(&items, 1, &mut audio);
            assert!(viewer.holds_suppression());
            assert!(viewer.is_video_playing());
            assert_eq!(viewer.video().source(), Some("/video/b.mp4"));
            assert_eq!(viewer.video().volume(), 0.55);
        }
        assert_eq!(audio.suppressed, 1);
        assert_eq!(audio.resumed, 1);
    }

    #[test]
    fn test_leaving_video_resumes_once() {
        let items = mixed();
        let mut audio = CountingAudio::default();
        {
            let mut viewer = open(&items, 1, &mut audio);
            viewer.sync_index(2);
            assert!(!viewer.holds_suppression());
            assert!(viewer.video().is_paused());
            viewer.sync_index(0);
        }
        assert_eq!(audio.suppressed, 1);
        assert_eq!(audio.resumed, 1);
    }

    #[test]
    fn test_photo_session_never_touches_audio() {
        let items = mixed();
        let mut audio = CountingAudio::default();
        {
            let mut viewer = open(&items, 0, &mut audio);
            viewer.sync_index(2);
            viewer.close();
        }
        assert_eq!(audio.suppressed, 0);
        assert_eq!(audio.resumed, 0);
    }

    #[test]
    fn test_rejected_video_shows_overlay() {
        let items = mixed();
        let mut audio = CountingAudio::default();
        let mut viewer = CinematicViewer::open(
            &items,
            1,
            &mut audio,
            MemorySink::with_policy(AutoplayPolicy::BlockNext(1)),
            MemoryScroll::new(),
            ViewerSettings::default(),
        );
        assert!(viewer.shows_play_overlay());

        viewer.click_active();
        assert!(viewer.is_video_playing());
        assert!(!viewer.shows_play_overlay());
    }

    #[test]
    fn test_space_toggles_video() {
        let items = mixed();
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 1, &mut audio);
        let mut host = GalleryState::new(1);

        assert_eq!(viewer.handle_key(Key::Space, &mut host), KeyOutcome::CONSUMED);
        assert!(!viewer.is_video_playing());
        assert!(viewer.video().is_paused());

        assert!(viewer.toggle_video());
        assert!(!viewer.video().is_paused());
    }

    #[test]
    fn test_toggle_video_on_photo_is_noop() {
        let items = mixed();
        let mut audio = CountingAudio::default();
        let mut viewer = open(&items, 0, &mut audio);
        assert!(!viewer.toggle_video());
        viewer.click_active();
        assert!(viewer.video().events().is_empty());
    }

    // ------------------------------------------------------------------------
    // Scroll Lock
    // ------------------------------------------------------------------------

    #[test]
    fn test_scroll_disabled_while_open() {
        let items = photos(2);
        let page = MemoryScroll::new();
        let observer = page.clone();
        let mut audio = CountingAudio::default();

        let viewer = CinematicViewer::open(
            &items,
            0,
            &mut audio,
            MemorySink::new(),
            page,
            ViewerSettings::default(),
        );
        assert!(!observer.is_scroll_enabled());
        drop(viewer);
        assert!(observer.is_scroll_enabled());
    }

    #[test]
    fn test_settings_validation() {
        assert!(ViewerSettings::default().validate().is_ok());
        let settings = ViewerSettings {
            max_vertical_ratio: 0.0,
            ..ViewerSettings::default()
        };
        assert!(settings.validate().is_err());
        assert_eq!(ViewerSettings::default().lock_window(), LOCK);
    }
}
