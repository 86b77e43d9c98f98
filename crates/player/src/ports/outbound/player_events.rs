//! Player events - data types flowing in and out of the session reconciler
//!
//! `InboundEvent` is the application's view of a service frame. The wire
//! frame is untagged, so the message translator derives these variants at the
//! boundary; everything downstream matches on the variant only.
//!
//! `SessionNotification` is what the reconciler publishes for UI projectors.

use rpsls_protocol::Move;

use crate::session_types::{RoundOutcome, SessionPhase};

/// A decoded service event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The frame carried a non-empty game id
    SessionAssigned { game_id: String },
    /// The frame carried round/score fields but no outcome
    RoundAdvanced {
        round: Option<u32>,
        your_score: Option<u32>,
        their_score: Option<u32>,
    },
    /// The frame carried a round summary: the round is over
    RoundResolved {
        round: Option<u32>,
        your_play: Option<Move>,
        their_play: Option<Move>,
        winner: bool,
        round_summary: String,
        your_score: Option<u32>,
        their_score: Option<u32>,
    },
}

/// State-change notification published by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotification {
    PhaseChanged(SessionPhase),
    /// A game id was adopted; `share_link` can be handed to the other player
    SessionAssigned { game_id: String, share_link: String },
    ScoresUpdated {
        round: u32,
        your_score: u32,
        their_score: u32,
    },
    PlaySubmitted { play: Move, round: u32 },
    RoundResolved {
        outcome: RoundOutcome,
        your_score: u32,
        their_score: u32,
    },
    TransportError(String),
    ConnectionClosed,
}
