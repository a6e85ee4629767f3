//! CLI Command Implementations
//!
//! Script parsing plus the runners behind each subcommand.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

use super::Commands;
use crate::audio::{
    AudioCoordinator, AudioRoute, AutoplayPolicy, Gesture, MemorySink, SharedCoordinator,
};
use crate::config::VitrineConfig;
use crate::error::VitrineError;
use crate::viewer::{
    CinematicViewer, Direction, GalleryState, Key, MediaItem, MemoryScroll, PageScroll, Point,
};

// ============================================================================
// Script Steps
// ============================================================================

/// One step of an `audio` script
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioStep {
    Bind(AudioRoute),
    Gesture,
    Toggle(AudioRoute),
    Suppress,
    Resume,
    Wait(Duration),
}

/// One step of a `viewer` script
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerStep {
    Next,
    Previous,
    Select(usize),
    Key(Key),
    /// Finger travel; positive `dx` moves left
    Swipe { dx: f32, dy: f32 },
    Wait(Duration),
    Toggle,
    Close,
}

fn invalid(step: &str, reason: impl Into<String>) -> VitrineError {
    VitrineError::InvalidScript {
        step: step.to_string(),
        reason: reason.into(),
    }
}

fn split_steps(script: &str) -> impl Iterator<Item = &str> {
    script
        .split(|c: char| c == ';' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

fn parse_millis(step: &str, value: &str) -> crate::Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| invalid(step, "expected milliseconds"))
}

impl FromStr for AudioStep {
    type Err = VitrineError;

    fn from_str(step: &str) -> crate::Result<Self> {
        let (op, arg) = match step.split_once(':') {
            Some((op, arg)) => (op, Some(arg)),
            None => (step, None),
        };
        match (op, arg) {
            ("bind", Some(route)) => Ok(AudioStep::Bind(route.parse()?)),
            ("toggle", Some(route)) => Ok(AudioStep::Toggle(route.parse()?)),
            ("gesture", None) => Ok(AudioStep::Gesture),
            ("suppress", None) => Ok(AudioStep::Suppress),
            ("resume", None) => Ok(AudioStep::Resume),
            ("wait", Some(ms)) => Ok(AudioStep::Wait(parse_millis(step, ms)?)),
            ("bind" | "toggle" | "wait", None) => Err(invalid(step, "missing argument")),
            _ => Err(invalid(step, "unknown audio step")),
        }
    }
}

impl FromStr for ViewerStep {
    type Err = VitrineError;

    fn from_str(step: &str) -> crate::Result<Self> {
        let (op, arg) = match step.split_once(':') {
            Some((op, arg)) => (op, Some(arg)),
            None => (step, None),
        };
        match (op, arg) {
            ("next", None) => Ok(ViewerStep::Next),
            ("prev", None) => Ok(ViewerStep::Previous),
            ("toggle", None) => Ok(ViewerStep::Toggle),
            ("close", None) => Ok(ViewerStep::Close),
            ("select", Some(index)) => index
                .parse()
                .map(ViewerStep::Select)
                .map_err(|_| invalid(step, "expected an index")),
            ("key", Some(name)) => Ok(ViewerStep::Key(name.parse()?)),
            ("wait", Some(ms)) => Ok(ViewerStep::Wait(parse_millis(step, ms)?)),
            ("swipe", Some(delta)) => {
                let (dx, dy) = delta
                    .split_once(',')
                    .ok_or_else(|| invalid(step, "expected <dx>,<dy>"))?;
                let dx = dx.trim().parse().map_err(|_| invalid(step, "bad dx"))?;
                let dy = dy.trim().parse().map_err(|_| invalid(step, "bad dy"))?;
                Ok(ViewerStep::Swipe { dx, dy })
            }
            _ => Err(invalid(step, "unknown viewer step")),
        }
    }
}

/// Parse an `audio` script
pub fn parse_audio_script(script: &str) -> crate::Result<Vec<AudioStep>> {
    split_steps(script).map(str::parse).collect()
}

/// Parse a `viewer` script
pub fn parse_viewer_script(script: &str) -> crate::Result<Vec<ViewerStep>> {
    split_steps(script).map(str::parse).collect()
}

/// Parse an item list such as `photo:a,video:b`
///
/// Sources are synthesised from the id.
pub fn parse_items(spec: &str) -> crate::Result<Vec<MediaItem>> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some(("photo", id)) if !id.is_empty() => {
                Ok(MediaItem::photo(id, format!("/media/{}.jpg", id)))
            }
            Some(("video", id)) if !id.is_empty() => {
                Ok(MediaItem::video(id, format!("/media/{}.mp4", id))
                    .with_poster(format!("/media/{}.jpg", id)))
            }
            _ => Err(invalid(entry, "expected photo:<id> or video:<id>")),
        })
        .collect()
}

// ============================================================================
// Commands
// ============================================================================

/// Load `--config`, or fall back to defaults
pub fn load_config(path: Option<&Path>) -> Result<VitrineConfig> {
    match path {
        Some(path) => VitrineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(VitrineConfig::default()),
    }
}

/// Dispatch a subcommand
///
/// `--config` is only read by the commands that simulate with it, so
/// `check-config` works even when the global path is missing or broken.
pub fn run(cmd: Commands, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Commands::CheckConfig { path } => check_config(&path),
        Commands::Audio { script, blocked } => {
            let config = load_config(config_path)?;
            debug!("Using config: {:?}", config);
            run_audio(&config, &script, blocked)
        }
        Commands::Viewer {
            items,
            start,
            script,
        } => {
            let config = load_config(config_path)?;
            debug!("Using config: {:?}", config);
            run_viewer(&config, &items, start, &script)
        }
    }
}

/// Validate a configuration file and print its route table.
pub fn check_config(path: &Path) -> Result<()> {
    info!("Checking config: {}", path.display());

    let config = VitrineConfig::load(path)
        .with_context(|| format!("Invalid config: {}", path.display()))?;

    println!("Config OK: {}", path.display());
    println!("{:-<60}", "");
    for route in AudioRoute::ALL {
        let entry = config.routes.get(route);
        println!(
            "{:<12} {:<36} vol {:.2}",
            route.as_str(),
            entry.track_source,
            entry.target_volume
        );
    }
    println!("{:-<60}", "");
    println!(
        "Fades: {} steps | route {} ms | suppress {} ms | resume {} ms",
        config.fades.steps,
        config.fades.route_fade_ms,
        config.fades.suppress_fade_ms,
        config.fades.resume_fade_ms
    );

    Ok(())
}

fn print_audio(label: &str, coordinator: &AudioCoordinator<MemorySink>) {
    let snapshot = coordinator.snapshot();
    println!(
        "{:<18} phase={:<11} volume={:.3} playing={} route={} suppressed={}",
        label,
        snapshot.phase,
        snapshot.volume,
        snapshot.is_playing,
        snapshot
            .route
            .map_or("none", |route| route.as_str()),
        snapshot.suppressed
    );
}

/// Run an `audio` script against a coordinator on an in-memory sink.
pub fn run_audio(config: &VitrineConfig, script: &str, blocked: u32) -> Result<()> {
    let steps = parse_audio_script(script).context("Failed to parse audio script")?;
    info!("Running {} audio steps", steps.len());

    let sink = MemorySink::with_policy(AutoplayPolicy::BlockNext(blocked));
    let mut coordinator = AudioCoordinator::new(sink, config);

    print_audio("start", &coordinator);
    for step in steps {
        match step {
            AudioStep::Bind(route) => {
                coordinator.arm_interaction_listener(route);
                coordinator.bind_route(route);
            }
            AudioStep::Gesture => coordinator.on_user_gesture(Gesture::Click),
            AudioStep::Toggle(route) => {
                coordinator.toggle_manual(route);
            }
            AudioStep::Suppress => coordinator.suppress_for_foreground(),
            AudioStep::Resume => coordinator.resume_from_foreground(),
            AudioStep::Wait(elapsed) => coordinator.advance(elapsed),
        }
        print_audio(&format!("{:?}", step).to_lowercase(), &coordinator);
    }

    let json = serde_json::to_string_pretty(&coordinator.snapshot())?;
    println!("{}", json);

    Ok(())
}

fn print_viewer<P: PageScroll>(
    label: &str,
    viewer: &CinematicViewer<'_, SharedCoordinator<MemorySink>, MemorySink, P>,
    audio: &SharedCoordinator<MemorySink>,
) {
    let slots: Vec<String> = viewer
        .visible_slots()
        .iter()
        .map(|v| format!("{}={}", v.slot, v.item.id))
        .collect();
    let (position, total) = viewer.counter();
    let coordinator = audio.borrow();
    println!(
        "{:<18} {}/{} [{}] animating={} video={} audio={:.3}{}",
        label,
        position,
        total,
        slots.join(" "),
        viewer.is_animating(),
        viewer.is_video_playing(),
        coordinator.volume(),
        if coordinator.is_suppressed() {
            " (suppressed)"
        } else {
            ""
        }
    );
}

/// Run a `viewer` script with a host that syncs every reported index.
///
/// Background audio plays the photography route for the whole run, so the
/// effect of video items on it is visible.
pub fn run_viewer(config: &VitrineConfig, items: &str, start: usize, script: &str) -> Result<()> {
    let items = parse_items(items).context("Failed to parse item list")?;
    let steps = parse_viewer_script(script).context("Failed to parse viewer script")?;
    info!("Running {} viewer steps over {} items", steps.len(), items.len());

    let audio = AudioCoordinator::new(MemorySink::new(), config).into_shared();
    {
        let mut coordinator = audio.borrow_mut();
        coordinator.arm_interaction_listener(AudioRoute::Photography);
        coordinator.bind_route(AudioRoute::Photography);
        coordinator.on_user_gesture(Gesture::Click);
        coordinator.finish_fades();
    }

    let page = MemoryScroll::new();
    let mut host = GalleryState::new(start);
    let mut viewer = CinematicViewer::open(
        &items,
        start,
        audio.clone(),
        MemorySink::new(),
        page.clone(),
        config.viewer.clone(),
    );
    print_viewer("open", &viewer, &audio);

    for step in steps {
        let label = format!("{:?}", step).to_lowercase();
        match step {
            ViewerStep::Next => {
                viewer.navigate(Direction::Next, &mut host);
            }
            ViewerStep::Previous => {
                viewer.navigate(Direction::Previous, &mut host);
            }
            ViewerStep::Select(index) => {
                viewer.select(index, &mut host);
            }
            ViewerStep::Key(key) => {
                viewer.handle_key(key, &mut host);
            }
            ViewerStep::Swipe { dx, dy } => {
                let origin = Point::new(0.0, 0.0);
                viewer.touch_start(origin);
                viewer.touch_end(Point::new(-dx, -dy), &mut host);
            }
            ViewerStep::Wait(elapsed) => {
                viewer.advance(elapsed);
                audio.borrow_mut().advance(elapsed);
            }
            ViewerStep::Toggle => {
                viewer.toggle_video();
            }
            ViewerStep::Close => viewer.request_close(&mut host),
        }

        if host.close_requested {
            break;
        }
        viewer.sync_index(host.index);
        print_viewer(&label, &viewer, &audio);
    }

    viewer.close();
    audio.borrow_mut().finish_fades();
    let coordinator = audio.borrow();
    println!(
        "closed             scroll={} audio={:.3} suppressed={}",
        if page.is_scroll_enabled() { "enabled" } else { "locked" },
        coordinator.volume(),
        coordinator.is_suppressed()
    );

    Ok(())
}
