//! Configuration for Vitrine
//!
//! The route table, fade timings and viewer tuning load from a single JSON
//! document. Every section is optional and falls back to the built-in
//! defaults.
//!
//! ```json
//! {
//!   "routes": {
//!     "home": { "track_source": "/audio/silent-current.mp3", "target_volume": 0.12 },
//!     "photography": { "track_source": "/audio/photography-music.mp3", "target_volume": 0.22 }
//!   },
//!   "fades": { "steps": 20, "route_fade_ms": 500, "suppress_fade_ms": 300, "resume_fade_ms": 400 },
//!   "viewer": { "transition_ms": 300, "lock_margin_ms": 50, "swipe_min_px": 40.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::audio::{FadeSettings, RouteTable};
use crate::error::{Result, VitrineError};
use crate::viewer::ViewerSettings;

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitrineConfig {
    pub routes: RouteTable,
    pub fades: FadeSettings,
    pub viewer: ViewerSettings,
}

impl VitrineConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(VitrineError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: VitrineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.routes.validate()?;
        self.fades.validate()?;
        self.viewer.validate()?;
        Ok(())
    }
}
