//! WebSocket message types for Player-service communication
//!
//! These types are used by the Player (sending `ClientMessage`, receiving
//! `ServerMessage`). Field names follow the service's camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Move;

// =============================================================================
// Client Messages (Player → Service)
// =============================================================================

/// Messages from the client (Player) to the game service.
///
/// The verb travels in the `action` field:
/// `{"action":"play","userId":"..","gameId":"..","round":3,"play":"spock"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Create a new game; the service answers with a `gameId`
    New { user_id: String },
    /// Join an existing game shared by another player
    Join { user_id: String, game_id: String },
    /// Submit a move for the given round
    Play {
        user_id: String,
        game_id: String,
        round: u32,
        play: Move,
    },
}

impl ClientMessage {
    /// The `action` verb of this command.
    pub fn action(&self) -> &'static str {
        match self {
            ClientMessage::New { .. } => "new",
            ClientMessage::Join { .. } => "join",
            ClientMessage::Play { .. } => "play",
        }
    }
}

// =============================================================================
// Server Messages (Service → Player)
// =============================================================================

/// State frame pushed by the game service.
///
/// The service never tags its frames; every field is optional and the
/// receiver derives meaning from which fields are present. A frame carrying
/// `roundSummary` marks a resolved round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_score: Option<u32>,
    /// True iff the recipient won the round
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<bool>,
    /// Unrecognised gestures decode as `None` rather than failing the frame
    #[serde(
        default,
        deserialize_with = "lenient_move",
        skip_serializing_if = "Option::is_none"
    )]
    pub your_play: Option<Move>,
    #[serde(
        default,
        deserialize_with = "lenient_move",
        skip_serializing_if = "Option::is_none"
    )]
    pub their_play: Option<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_summary: Option<String>,
}

/// Accept any JSON value for a play; case-insensitive gesture names map to a
/// `Move`, everything else to `None`.
fn lenient_move<'de, D>(deserializer: D) -> Result<Option<Move>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|name| name.parse().ok()))
}
