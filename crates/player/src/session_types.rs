//! Session types owned by the player.
//!
//! `SessionState` is only mutated through the transition helpers below, each
//! of which enforces one of the session invariants:
//! - a non-empty game id is written once (first writer wins)
//! - the round number never decreases
//! - the submission guard is armed by a play and released by an outcome

use std::fmt;

use rand::Rng;
use rpsls_protocol::Move;

// =============================================================================
// Player identity
// =============================================================================

/// Length of a generated player identity.
pub const IDENTITY_LEN: usize = 17;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque, client-generated player identifier that survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerIdentity(String);

impl PlayerIdentity {
    /// Wrap an already persisted identity.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh 17 character base-36 token.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token = (0..IDENTITY_LEN)
            .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the value has the shape of a generated identity.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == IDENTITY_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Session phase and outcome
// =============================================================================

/// High-level phase of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Connection not open yet
    #[default]
    Connecting,
    /// `new` sent, waiting for the service to assign a game id
    Created,
    /// `join` sent for a game id taken from the session link
    Joined,
    /// Ready for a play in the current round
    RoundPending,
    /// Outcome received and being delivered to projectors
    RoundResolved,
}

/// Result of the last resolved round, from this player's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub your_play: Option<Move>,
    pub their_play: Option<Move>,
    /// True iff this player won the round
    pub winner: bool,
    pub round_summary: String,
}

impl RoundOutcome {
    /// True when both players threw the same gesture.
    pub fn is_tie(&self) -> bool {
        !self.winner && self.your_play.is_some() && self.your_play == self.their_play
    }
}

// =============================================================================
// Session state
// =============================================================================

/// Client-side view of the current game.
///
/// Created fresh for every connection and dropped with it. Readers get
/// `&SessionState` or a clone; only the session reconciler mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    phase: SessionPhase,
    game_id: Option<String>,
    round_id: u32,
    submission_guard: bool,
    last_outcome: Option<RoundOutcome>,
    your_score: u32,
    their_score: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn submission_guard(&self) -> bool {
        self.submission_guard
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn your_score(&self) -> u32 {
        self.your_score
    }

    pub fn their_score(&self) -> u32 {
        self.their_score
    }

    // -------------------------------------------------------------------------
    // Transition helpers (reconciler only)
    // -------------------------------------------------------------------------

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) -> bool {
        let changed = self.phase != phase;
        self.phase = phase;
        changed
    }

    /// Store the game id unless one is already set. Returns whether it was adopted.
    pub(crate) fn adopt_game_id(&mut self, game_id: &str) -> bool {
        if game_id.is_empty() || self.game_id.is_some() {
            return false;
        }
        self.game_id = Some(game_id.to_string());
        true
    }

    /// Move to `round` unless that would go backwards. Returns whether it was applied.
    pub(crate) fn advance_round(&mut self, round: u32) -> bool {
        if round < self.round_id {
            return false;
        }
        self.round_id = round;
        true
    }

    pub(crate) fn update_scores(&mut self, your_score: Option<u32>, their_score: Option<u32>) {
        if let Some(score) = your_score {
            self.your_score = score;
        }
        if let Some(score) = their_score {
            self.their_score = score;
        }
    }

    pub(crate) fn arm_guard(&mut self) {
        self.submission_guard = true;
    }

    pub(crate) fn record_outcome(&mut self, outcome: RoundOutcome) {
        self.last_outcome = Some(outcome);
        self.submission_guard = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generated_identity_is_base36_of_fixed_length() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let id = PlayerIdentity::generate(&mut rng);
            assert_eq!(id.as_str().len(), IDENTITY_LEN);
            assert!(id.is_well_formed(), "bad identity {id}");
        }
    }

    #[test]
    fn test_identity_shape_check() {
        assert!(PlayerIdentity::new("0123456789abcdefg").is_well_formed());
        assert!(!PlayerIdentity::new("0123456789ABCDEFG").is_well_formed());
        assert!(!PlayerIdentity::new("short").is_well_formed());
    }

    #[test]
    fn test_game_id_first_writer_wins() {
        let mut state = SessionState::new();
        assert!(!state.adopt_game_id(""));
        assert!(state.adopt_game_id("g1"));
        assert!(!state.adopt_game_id("g2"));
        assert_eq!(state.game_id(), Some("g1"));
    }

    #[test]
    fn test_round_never_decreases() {
        let mut state = SessionState::new();
        assert!(state.advance_round(3));
        assert!(!state.advance_round(2));
        assert!(state.advance_round(3));
        assert_eq!(state.round_id(), 3);
    }

    #[test]
    fn test_outcome_releases_guard() {
        let mut state = SessionState::new();
        state.arm_guard();
        assert!(state.submission_guard());

        state.record_outcome(RoundOutcome {
            your_play: Some(Move::Rock),
            their_play: Some(Move::Rock),
            winner: false,
            round_summary: "Tie Game".into(),
        });

        assert!(!state.submission_guard());
        assert!(state.last_outcome().is_some_and(RoundOutcome::is_tie));
    }

    #[test]
    fn test_partial_score_update_keeps_other_side() {
        let mut state = SessionState::new();
        state.update_scores(Some(2), Some(1));
        state.update_scores(None, Some(3));
        assert_eq!((state.your_score(), state.their_score()), (2, 3));
    }
}
