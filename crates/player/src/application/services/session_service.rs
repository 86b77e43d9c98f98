//! Session service - reconciles service events into local session state
//!
//! The reconciler is the only owner of `SessionState`. Every transition is a
//! direct reaction to one of:
//! - the connection opening (`on_open`)
//! - an inbound frame (`on_frame` / `apply`)
//! - a local play request (`request_play`)
//!
//! and runs to completion before the next one is handled. State changes are
//! published on the `EventBus` for UI projectors.

use std::sync::Arc;

use rpsls_protocol::{ClientMessage, Move};

use crate::infrastructure::message_translator;
use crate::infrastructure::messaging::{ConnectionEvent, EventBus};
use crate::infrastructure::websocket::{ClientMessageBuilder, EncodeError};
use crate::ports::outbound::{
    InboundEvent, SessionCommandPort, SessionLinkPort, SessionNotification,
};
use crate::session_types::{PlayerIdentity, RoundOutcome, SessionPhase, SessionState};

/// Error raised by a session transition.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no game id yet; wait for the service to assign one")]
    NoActiveGame,
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("failed to send command: {0}")]
    Send(String),
}

/// What happened to a local play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayDisposition {
    /// A `play` frame was queued for the given round
    Submitted { round: u32 },
    /// A play is already outstanding for this round; nothing was sent
    Ignored,
}

/// State machine for one game session over one connection.
pub struct SessionReconciler {
    user_id: PlayerIdentity,
    state: SessionState,
    commands: Arc<dyn SessionCommandPort>,
    link: Box<dyn SessionLinkPort>,
    notifications: EventBus,
}

impl SessionReconciler {
    pub fn new(
        user_id: PlayerIdentity,
        commands: Arc<dyn SessionCommandPort>,
        link: Box<dyn SessionLinkPort>,
        notifications: EventBus,
    ) -> Self {
        Self {
            user_id,
            state: SessionState::new(),
            commands,
            link,
            notifications,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current shareable link (carries the game id once one is known).
    pub fn share_link(&self) -> String {
        self.link.share_link()
    }

    /// Route a connection lifecycle event to the matching transition.
    pub fn handle_connection_event(&mut self, event: ConnectionEvent) -> Result<(), SessionError> {
        match event {
            ConnectionEvent::Opened => self.on_open(),
            ConnectionEvent::Message(raw) => {
                self.on_frame(&raw);
                Ok(())
            }
            ConnectionEvent::Error(reason) => {
                self.on_error(&reason);
                Ok(())
            }
            ConnectionEvent::Closed => {
                self.on_closed();
                Ok(())
            }
        }
    }

    /// The connection opened: create a game, or join the one in the session link.
    pub fn on_open(&mut self) -> Result<(), SessionError> {
        if self.state.phase() != SessionPhase::Connecting {
            tracing::warn!(phase = ?self.state.phase(), "Ignoring repeated connection open");
            return Ok(());
        }

        match self.link.read_token() {
            None => {
                tracing::info!("No session token, creating a game");
                self.send(ClientMessageBuilder::new_game(self.user_id.as_str()))?;
                self.set_phase(SessionPhase::Created);
            }
            Some(game_id) => {
                tracing::info!(game_id = %game_id, "Attempting to join game");
                self.send(ClientMessageBuilder::join_game(
                    self.user_id.as_str(),
                    &game_id,
                )?)?;
                self.state.adopt_game_id(&game_id);
                self.notifications
                    .dispatch(SessionNotification::SessionAssigned {
                        game_id,
                        share_link: self.link.share_link(),
                    });
                self.set_phase(SessionPhase::Joined);
            }
        }
        Ok(())
    }

    /// Decode a raw frame and apply each event it carries.
    pub fn on_frame(&mut self, raw: &str) {
        match message_translator::decode_frame(raw) {
            Ok(events) => {
                if events.is_empty() {
                    tracing::debug!("Frame carried no recognised fields");
                }
                for event in events {
                    self.apply(event);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed frame");
            }
        }
    }

    pub fn on_error(&mut self, reason: &str) {
        tracing::error!(reason = %reason, "Connection error");
        self.notifications
            .dispatch(SessionNotification::TransportError(reason.to_string()));
    }

    pub fn on_closed(&mut self) {
        tracing::info!("Connection closed");
        self.notifications
            .dispatch(SessionNotification::ConnectionClosed);
    }

    /// Apply one decoded service event.
    pub fn apply(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::SessionAssigned { game_id } => self.apply_session_assigned(game_id),
            InboundEvent::RoundAdvanced {
                round,
                your_score,
                their_score,
            } => {
                if let Some(round) = round {
                    self.apply_round(round);
                }
                self.state.update_scores(your_score, their_score);
                self.notify_scores();
            }
            InboundEvent::RoundResolved {
                round,
                your_play,
                their_play,
                winner,
                round_summary,
                your_score,
                their_score,
            } => {
                if let Some(round) = round {
                    self.apply_round(round);
                }
                self.state.update_scores(your_score, their_score);

                let outcome = RoundOutcome {
                    your_play,
                    their_play,
                    winner,
                    round_summary,
                };
                tracing::info!(
                    round = self.state.round_id(),
                    winner,
                    summary = %outcome.round_summary,
                    "Round resolved"
                );
                self.state.record_outcome(outcome.clone());
                self.set_phase(SessionPhase::RoundResolved);
                self.notifications
                    .dispatch(SessionNotification::RoundResolved {
                        outcome,
                        your_score: self.state.your_score(),
                        their_score: self.state.their_score(),
                    });
                self.set_phase(SessionPhase::RoundPending);
            }
        }
    }

    /// Submit a move for the current round unless one is already outstanding.
    pub fn request_play(&mut self, play: Move) -> Result<PlayDisposition, SessionError> {
        if self.state.submission_guard() {
            tracing::debug!(play = %play, "Ignoring second play attempt");
            return Ok(PlayDisposition::Ignored);
        }

        let game_id = self
            .state
            .game_id()
            .ok_or(SessionError::NoActiveGame)?
            .to_string();
        let round = self.state.round_id();

        let message = ClientMessageBuilder::play(self.user_id.as_str(), &game_id, round, play)?;
        self.send(message)?;
        self.state.arm_guard();

        tracing::info!(game_id = %game_id, round, play = %play, "Play submitted");
        self.notifications
            .dispatch(SessionNotification::PlaySubmitted { play, round });
        Ok(PlayDisposition::Submitted { round })
    }

    fn apply_session_assigned(&mut self, game_id: String) {
        if game_id.is_empty() {
            return;
        }
        match self.state.game_id() {
            None => {
                self.state.adopt_game_id(&game_id);
                self.link.write_token(&game_id);
                let share_link = self.link.share_link();
                tracing::info!(game_id = %game_id, share_link = %share_link, "Game assigned");
                self.notifications
                    .dispatch(SessionNotification::SessionAssigned {
                        game_id,
                        share_link,
                    });
                self.set_phase(SessionPhase::RoundPending);
            }
            Some(current) if current == game_id => {
                if matches!(
                    self.state.phase(),
                    SessionPhase::Created | SessionPhase::Joined
                ) {
                    self.set_phase(SessionPhase::RoundPending);
                }
            }
            Some(current) => {
                tracing::warn!(
                    current = %current,
                    received = %game_id,
                    "Ignoring attempt to replace the session's game id"
                );
            }
        }
    }

    fn apply_round(&mut self, round: u32) {
        let current = self.state.round_id();
        if !self.state.advance_round(round) {
            tracing::warn!(current, received = round, "Ignoring round regression");
        }
    }

    fn notify_scores(&self) {
        self.notifications
            .dispatch(SessionNotification::ScoresUpdated {
                round: self.state.round_id(),
                your_score: self.state.your_score(),
                their_score: self.state.their_score(),
            });
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.state.set_phase(phase) {
            tracing::debug!(phase = ?phase, "Session phase changed");
            self.notifications
                .dispatch(SessionNotification::PhaseChanged(phase));
        }
    }

    fn send(&self, message: ClientMessage) -> Result<(), SessionError> {
        self.commands
            .send(message)
            .map_err(|e| SessionError::Send(e.to_string()))
    }
}
