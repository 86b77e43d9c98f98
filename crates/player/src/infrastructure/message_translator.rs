//! Translates ServerMessage frames into InboundEvents for the application layer
//!
//! The service sends one flat frame shape for everything. This module is the
//! only place that looks at which optional fields are present:
//!
//! 1. a non-empty `gameId` yields `SessionAssigned`
//! 2. a `roundSummary` yields `RoundResolved`
//! 3. otherwise any `round`/score field yields `RoundAdvanced`
//!
//! A single frame can therefore produce up to two events, always in that order.

use rpsls_protocol::ServerMessage;

use crate::ports::outbound::InboundEvent;

/// Parse a raw text frame and translate it.
pub fn decode_frame(raw: &str) -> Result<Vec<InboundEvent>, serde_json::Error> {
    let msg: ServerMessage = serde_json::from_str(raw)?;
    Ok(translate(msg))
}

/// Translate a ServerMessage into the events it carries
pub fn translate(msg: ServerMessage) -> Vec<InboundEvent> {
    let ServerMessage {
        game_id,
        round,
        your_score,
        their_score,
        winner,
        your_play,
        their_play,
        round_summary,
    } = msg;

    let mut events = Vec::with_capacity(2);

    if let Some(game_id) = game_id.filter(|id| !id.is_empty()) {
        events.push(InboundEvent::SessionAssigned { game_id });
    }

    if let Some(round_summary) = round_summary {
        events.push(InboundEvent::RoundResolved {
            round,
            your_play,
            their_play,
            winner: winner.unwrap_or(false),
            round_summary,
            your_score,
            their_score,
        });
    } else if round.is_some() || your_score.is_some() || their_score.is_some() {
        events.push(InboundEvent::RoundAdvanced {
            round,
            your_score,
            their_score,
        });
    }

    events
}
