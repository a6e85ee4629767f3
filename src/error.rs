//! Error handling for Vitrine
//!
//! Coordinator and viewer operations never return errors to their hosts.
//! These variants surface from configuration loading, playback sinks, and
//! the CLI simulation scripts.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Vitrine operations
pub type Result<T> = std::result::Result<T, VitrineError>;

/// Main error type for Vitrine operations
#[derive(Error, Debug)]
pub enum VitrineError {
    // Playback Errors
    #[error("Playback rejected for '{source_uri}': {reason}")]
    PlaybackRejected { source_uri: String, reason: String },

    #[error("No source loaded on playback sink")]
    NoSource,

    // Configuration Errors
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown audio route: {name}")]
    UnknownRoute { name: String },

    // Simulation Errors
    #[error("Invalid script step '{step}': {reason}")]
    InvalidScript { step: String, reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VitrineError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            VitrineError::PlaybackRejected { .. } => "PLAYBACK_REJECTED",
            VitrineError::NoSource => "NO_SOURCE",
            VitrineError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            VitrineError::InvalidConfig { .. } => "INVALID_CONFIG",
            VitrineError::UnknownRoute { .. } => "UNKNOWN_ROUTE",
            VitrineError::InvalidScript { .. } => "INVALID_SCRIPT",
            VitrineError::Io(_) => "IO_ERROR",
            VitrineError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error clears up without changing any input
    ///
    /// Autoplay rejections resolve on the next user gesture; everything
    /// else needs a fixed config, script, or file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VitrineError::PlaybackRejected { .. } | VitrineError::NoSource
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            VitrineError::PlaybackRejected { .. } => {
                Some("Playback starts after the next click, scroll, key press or touch.")
            }
            VitrineError::NoSource => Some("Bind a route before starting playback."),
            VitrineError::ConfigNotFound { .. } => Some("Check the --config path and try again."),
            VitrineError::InvalidConfig { .. } => {
                Some("Volumes must be within 0.0..=1.0 and fades need at least one step.")
            }
            VitrineError::UnknownRoute { .. } => Some("Known routes: home, photography."),
            VitrineError::InvalidScript { .. } => {
                Some("Separate script steps with ';' or spaces, e.g. 'bind:home;gesture;wait:500'.")
            }
            _ => None,
        }
    }
}
