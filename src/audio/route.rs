//! Audio routes and their track configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VitrineError};

/// Logical page context that selects a background track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioRoute {
    Home,
    Photography,
}

impl AudioRoute {
    /// All routes, in table order
    pub const ALL: [AudioRoute; 2] = [AudioRoute::Home, AudioRoute::Photography];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioRoute::Home => "home",
            AudioRoute::Photography => "photography",
        }
    }
}

impl fmt::Display for AudioRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioRoute {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(AudioRoute::Home),
            "photography" => Ok(AudioRoute::Photography),
            other => Err(VitrineError::UnknownRoute {
                name: other.to_string(),
            }),
        }
    }
}

/// Track and steady-state volume for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Resource identifier handed to the playback sink
    pub track_source: String,
    /// Volume reached once a fade-in completes, within 0.0..=1.0
    pub target_volume: f32,
}

impl RouteConfig {
    pub fn new(track_source: impl Into<String>, target_volume: f32) -> Self {
        Self {
            track_source: track_source.into(),
            target_volume,
        }
    }

    fn validate(&self, route: AudioRoute) -> Result<()> {
        if self.track_source.trim().is_empty() {
            return Err(VitrineError::InvalidConfig {
                reason: format!("route '{}' has an empty track_source", route),
            });
        }
        if !(0.0..=1.0).contains(&self.target_volume) {
            return Err(VitrineError::InvalidConfig {
                reason: format!(
                    "route '{}' target_volume {} is outside 0.0..=1.0",
                    route, self.target_volume
                ),
            });
        }
        Ok(())
    }
}

/// Route to track mapping. Every route always has an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub home: RouteConfig,
    pub photography: RouteConfig,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            home: RouteConfig::new("/audio/silent-current.mp3", 0.12),
            photography: RouteConfig::new("/audio/photography-music.mp3", 0.22),
        }
    }
}

impl RouteTable {
    /// Look up the configuration for a route
    pub fn get(&self, route: AudioRoute) -> &RouteConfig {
        match route {
            AudioRoute::Home => &self.home,
            AudioRoute::Photography => &self.photography,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for route in AudioRoute::ALL {
            self.get(route).validate(route)?;
        }
        Ok(())
    }
}
