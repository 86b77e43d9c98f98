//! ClientMessage builder
//!
//! Centralizes construction of the three outbound commands. The builder only
//! checks that a game id is present where the command needs one; whether a
//! play is allowed right now is the session reconciler's call.

use rpsls_protocol::{ClientMessage, Move};

/// Error building an outbound command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("'{action}' requires a non-empty game id")]
    MissingGameId { action: &'static str },
}

/// Builder for ClientMessage variants
///
/// # Usage
///
/// ```rust,ignore
/// let msg = ClientMessageBuilder::play(user_id, "g1", 0, Move::Spock)?;
/// command_bus.send(msg)?;
/// ```
pub struct ClientMessageBuilder;

impl ClientMessageBuilder {
    /// Create a `new` message (start a game as the originator)
    pub fn new_game(user_id: &str) -> ClientMessage {
        ClientMessage::New {
            user_id: user_id.to_string(),
        }
    }

    /// Create a `join` message for a game shared by the originator
    pub fn join_game(user_id: &str, game_id: &str) -> Result<ClientMessage, EncodeError> {
        require_game_id(game_id, "join")?;
        Ok(ClientMessage::Join {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
        })
    }

    /// Create a `play` message stamped with the round it is meant for
    pub fn play(
        user_id: &str,
        game_id: &str,
        round: u32,
        play: Move,
    ) -> Result<ClientMessage, EncodeError> {
        require_game_id(game_id, "play")?;
        Ok(ClientMessage::Play {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            round,
            play,
        })
    }
}

fn require_game_id(game_id: &str, action: &'static str) -> Result<(), EncodeError> {
    if game_id.is_empty() {
        Err(EncodeError::MissingGameId { action })
    } else {
        Ok(())
    }
}
