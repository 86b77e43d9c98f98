//! User intents read from the terminal

use rpsls_protocol::{Move, ParseMoveError};

/// Something the local user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIntent {
    Play(Move),
    /// Print the shareable link again
    ShowLink,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_intent(line: &str) -> Result<Option<UserIntent>, ParseMoveError> {
    let word = line.trim();
    if word.is_empty() {
        return Ok(None);
    }

    match word.to_ascii_lowercase().as_str() {
        "link" => Ok(Some(UserIntent::ShowLink)),
        "quit" | "exit" => Ok(Some(UserIntent::Quit)),
        other => other.parse::<Move>().map(|m| Some(UserIntent::Play(m))),
    }
}
