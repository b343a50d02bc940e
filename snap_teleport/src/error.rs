use std::fmt;

use crate::input::Handedness;

/// Error types for snap teleport setup
#[derive(Debug)]
pub enum TeleportError {
    /// A hand input source could not be activated
    InputSource {
        hand: Handedness,
        message: String,
    },
}

impl fmt::Display for TeleportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeleportError::InputSource { hand, message } => {
                write!(f, "{:?} hand input source unavailable: {}", hand, message)
            }
        }
    }
}

impl std::error::Error for TeleportError {}
