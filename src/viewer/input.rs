//! Keyboard input for the viewer

use std::str::FromStr;

use crate::error::VitrineError;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

impl FromStr for Key {
    type Err = VitrineError;

    /// Parse a script-friendly key name (`left`, `right`, `esc`, `space`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Key::ArrowLeft),
            "right" | "arrowright" => Ok(Key::ArrowRight),
            "esc" | "escape" => Ok(Key::Escape),
            "space" => Ok(Key::Space),
            other => Err(VitrineError::InvalidScript {
                step: other.to_string(),
                reason: "unknown key".to_string(),
            }),
        }
    }
}

/// What the host should do with the originating key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The viewer acted on the key
    pub handled: bool,
    /// Suppress the browser default (page scroll on Space)
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub const IGNORED: KeyOutcome = KeyOutcome {
        handled: false,
        prevent_default: false,
    };

    pub const HANDLED: KeyOutcome = KeyOutcome {
        handled: true,
        prevent_default: false,
    };

    pub const CONSUMED: KeyOutcome = KeyOutcome {
        handled: true,
        prevent_default: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ArrowLeft" => Key::ArrowLeft)]
    #[test_case("ArrowRight" => Key::ArrowRight)]
    #[test_case("Escape" => Key::Escape)]
    #[test_case(" " => Key::Space)]
    #[test_case("Enter" => Key::Other)]
    fn test_from_dom(key: &str) -> Key {
        Key::from_dom(key)
    }

    #[test]
    fn test_parse_script_names() {
        assert_eq!("right".parse::<Key>().unwrap(), Key::ArrowRight);
        assert_eq!("ESC".parse::<Key>().unwrap(), Key::Escape);
        assert!("tab".parse::<Key>().is_err());
    }
}
