//! Shared type definitions
//!
//! Common value types used by both outbound and inbound frames.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Moves
// =============================================================================

/// A hand gesture a player can submit for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Move {
    /// Every gesture, in the order the client offers them.
    pub const ALL: [Move; 5] = [
        Move::Rock,
        Move::Paper,
        Move::Scissors,
        Move::Lizard,
        Move::Spock,
    ];

    /// Wire name of the gesture.
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Lizard => "lizard",
            Move::Spock => "spock",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name one of the five gestures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown move '{0}' (expected rock, paper, scissors, lizard or spock)")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Move::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| ParseMoveError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_serializes_lowercase() {
        let json = serde_json::to_string(&Move::Spock).unwrap();
        assert_eq!(json, "\"spock\"");
    }

    #[test]
    fn test_move_parse_is_case_insensitive() {
        assert_eq!(" Lizard ".parse::<Move>().unwrap(), Move::Lizard);
        assert_eq!("ROCK".parse::<Move>().unwrap(), Move::Rock);
    }

    #[test]
    fn test_move_parse_rejects_unknown() {
        let err = "well".parse::<Move>().unwrap_err();
        assert_eq!(err, ParseMoveError("well".to_string()));
    }

    #[test]
    fn test_unknown_move_fails_to_deserialize() {
        assert!(serde_json::from_str::<Move>("\"dynamite\"").is_err());
    }
}
