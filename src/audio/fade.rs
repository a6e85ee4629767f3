//! Stepped linear volume fades
//!
//! A fade is a fixed number of discrete steps spread evenly across its
//! duration. Each step interpolates linearly from the volume the fade
//! started at and clamps to `0.0..=1.0`; the final step lands exactly on
//! the target. Fades hold no reference to the sink, so replacing one
//! mid-flight is just dropping it and starting a new one from the live
//! volume.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VitrineError};

/// Default number of steps per fade
pub const DEFAULT_FADE_STEPS: u32 = 20;

/// Clamp a volume into the playable range
#[inline]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Fade timings used by the audio coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeSettings {
    /// Steps per fade
    pub steps: u32,
    /// Route switch and manual toggle fades, in milliseconds
    pub route_fade_ms: u64,
    /// Fade-out when foreground video takes over, in milliseconds
    pub suppress_fade_ms: u64,
    /// Fade-in when foreground video releases audio, in milliseconds
    pub resume_fade_ms: u64,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_FADE_STEPS,
            route_fade_ms: 500,
            suppress_fade_ms: 300,
            resume_fade_ms: 400,
        }
    }
}

impl FadeSettings {
    pub fn route_fade(&self) -> Duration {
        Duration::from_millis(self.route_fade_ms)
    }

    pub fn suppress_fade(&self) -> Duration {
        Duration::from_millis(self.suppress_fade_ms)
    }

    pub fn resume_fade(&self) -> Duration {
        Duration::from_millis(self.resume_fade_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(VitrineError::InvalidConfig {
                reason: "fade steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// An in-flight linear fade
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    start: f32,
    target: f32,
    steps: u32,
    taken: u32,
    step_interval: Duration,
}

impl Fade {
    /// Create a fade from `start` to `target` over `duration` in `steps` steps
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use vitrine::audio::Fade;
    ///
    /// let mut fade = Fade::new(0.0, 0.2, Duration::from_millis(500), 20);
    /// assert_eq!(fade.step_interval(), Duration::from_millis(25));
    /// while fade.next_volume().is_some() {}
    /// assert!(fade.is_complete());
    /// ```
    pub fn new(start: f32, target: f32, duration: Duration, steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            start: clamp_volume(start),
            target: clamp_volume(target),
            steps,
            taken: 0,
            step_interval: duration / steps,
        }
    }

    /// Apply one step and return the resulting volume
    ///
    /// Returns `None` once every step has been taken.
    pub fn next_volume(&mut self) -> Option<f32> {
        if self.is_complete() {
            return None;
        }
        self.taken += 1;
        if self.taken == self.steps {
            return Some(self.target);
        }
        let progress = self.taken as f32 / self.steps as f32;
        Some(clamp_volume(
            self.start + (self.target - self.start) * progress,
        ))
    }

    pub fn is_complete(&self) -> bool {
        self.taken >= self.steps
    }

    /// Time between consecutive steps
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn steps_taken(&self) -> u32 {
        self.taken
    }

    pub fn steps_remaining(&self) -> u32 {
        self.steps - self.taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fade_in_reaches_target_in_steps() {
        let mut fade = Fade::new(0.0, 0.12, Duration::from_millis(500), 20);
        let volumes: Vec<f32> = std::iter::from_fn(|| fade.next_volume()).collect();

        assert_eq!(volumes.len(), 20);
        assert_relative_eq!(volumes[0], 0.006, epsilon = 1e-6);
        assert_relative_eq!(volumes[9], 0.06, epsilon = 1e-6);
        assert_eq!(*volumes.last().unwrap(), 0.12);
    }

    #[test]
    fn test_fade_is_monotonic() {
        let mut fade = Fade::new(0.22, 0.0, Duration::from_millis(300), 20);
        let mut last = 0.22;
        while let Some(v) = fade.next_volume() {
            assert!(v <= last);
            last = v;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_step_interval_divides_duration() {
        let fade = Fade::new(0.0, 1.0, Duration::from_millis(300), 20);
        assert_eq!(fade.step_interval(), Duration::from_millis(15));
    }

    #[test]
    fn test_zero_steps_treated_as_one() {
        let mut fade = Fade::new(0.5, 0.0, Duration::from_millis(100), 0);
        assert_eq!(fade.next_volume(), Some(0.0));
        assert_eq!(fade.next_volume(), None);
    }

    #[test]
    fn test_inputs_are_clamped() {
        let mut fade = Fade::new(-1.0, 2.0, Duration::from_millis(100), 4);
        assert_eq!(fade.start(), 0.0);
        assert_eq!(fade.target(), 1.0);
        while let Some(v) = fade.next_volume() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_clamp_volume_nan() {
        assert_eq!(clamp_volume(f32::NAN), 0.0);
        assert_eq!(clamp_volume(1.3), 1.0);
    }

    #[test]
    fn test_settings_validation() {
        assert!(FadeSettings::default().validate().is_ok());
        let settings = FadeSettings {
            steps: 0,
            ..FadeSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
