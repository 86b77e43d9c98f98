//! Terminal projector - renders session notifications as status lines

use std::io::Write;

use crate::infrastructure::messaging::EventBus;
use crate::ports::outbound::SessionNotification;
use crate::session_types::{RoundOutcome, SessionPhase};

/// Writes one line per notification to a terminal (or any writer).
pub struct TerminalProjector;

impl TerminalProjector {
    /// Subscribe to `bus`, writing rendered lines to `out`.
    pub fn attach<W>(bus: &EventBus, mut out: W)
    where
        W: Write + Send + 'static,
    {
        bus.subscribe(move |notification| {
            let Some(line) = render_notification(&notification) else {
                return;
            };
            if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
                tracing::warn!("Failed to write to terminal: {}", e);
            }
        });
    }
}

/// Render a notification, or `None` if it has nothing to show.
pub fn render_notification(notification: &SessionNotification) -> Option<String> {
    match notification {
        SessionNotification::PhaseChanged(SessionPhase::Created) => {
            Some("Created a game. Share the link with a friend to play!".to_string())
        }
        SessionNotification::PhaseChanged(SessionPhase::Joined) => {
            Some("Joined game! Make a play now.".to_string())
        }
        SessionNotification::PhaseChanged(_) => None,
        SessionNotification::SessionAssigned {
            game_id,
            share_link,
        } => Some(format!("Game {game_id}: {share_link}")),
        SessionNotification::ScoresUpdated {
            round,
            your_score,
            their_score,
        } => Some(format!(
            "Round {round} | You: {your_score}  Them: {their_score}"
        )),
        SessionNotification::PlaySubmitted { play, .. } => {
            Some(format!("You played {play}, waiting on other player..."))
        }
        SessionNotification::RoundResolved {
            outcome,
            your_score,
            their_score,
        } => Some(format!(
            "{} ({}) | You: {your_score}  Them: {their_score}",
            outcome.round_summary,
            verdict(outcome)
        )),
        SessionNotification::TransportError(reason) => {
            Some(format!("Connection error: {reason}"))
        }
        SessionNotification::ConnectionClosed => {
            Some("Connection closed. Restart with the link to resume.".to_string())
        }
    }
}

fn verdict(outcome: &RoundOutcome) -> String {
    let plays = match (outcome.your_play, outcome.their_play) {
        (Some(yours), Some(theirs)) => format!("{yours} vs {theirs}, "),
        _ => String::new(),
    };
    let result = if outcome.winner {
        "you win"
    } else if outcome.is_tie() {
        "tie"
    } else {
        "they win"
    };
    format!("{plays}{result}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsls_protocol::Move;
    use std::sync::{Arc, Mutex};

    fn outcome(yours: Move, theirs: Move, winner: bool, summary: &str) -> RoundOutcome {
        RoundOutcome {
            your_play: Some(yours),
            their_play: Some(theirs),
            winner,
            round_summary: summary.to_string(),
        }
    }

    #[test]
    fn test_round_resolved_lines() {
        let won = SessionNotification::RoundResolved {
            outcome: outcome(Move::Spock, Move::Lizard, true, "spock poisons lizard"),
            your_score: 1,
            their_score: 0,
        };
        assert_eq!(
            render_notification(&won).unwrap(),
            "spock poisons lizard (spock vs lizard, you win) | You: 1  Them: 0"
        );

        let tie = SessionNotification::RoundResolved {
            outcome: outcome(Move::Rock, Move::Rock, false, "Tie Game"),
            your_score: 1,
            their_score: 0,
        };
        assert!(render_notification(&tie).unwrap().contains("tie"));

        let lost = SessionNotification::RoundResolved {
            outcome: outcome(Move::Paper, Move::Scissors, false, "scissors cut paper"),
            your_score: 1,
            their_score: 1,
        };
        assert!(render_notification(&lost).unwrap().contains("they win"));
    }

    #[test]
    fn test_intermediate_phases_are_silent() {
        assert_eq!(
            render_notification(&SessionNotification::PhaseChanged(SessionPhase::RoundPending)),
            None
        );
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_projector_writes_share_link() {
        let bus = EventBus::new();
        let buffer = SharedBuffer::default();
        TerminalProjector::attach(&bus, buffer.clone());

        bus.dispatch(SessionNotification::SessionAssigned {
            game_id: "g1".into(),
            share_link: "https://rpsls.local/#g1".into(),
        });
        bus.dispatch(SessionNotification::PhaseChanged(SessionPhase::RoundPending));

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "Game g1: https://rpsls.local/#g1\n");
    }
}
