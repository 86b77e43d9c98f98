//! Session Link Port - the resumption token carried by a shareable link
//!
//! A session link ends in `#<gameId>`. A link without a fragment means
//! "create a new game"; once the service assigns an id, the fragment is
//! written so the link can be handed to the second player.

/// Port for reading and writing the session resumption token.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SessionLinkPort: Send {
    /// Current token with the leading `#` stripped; `None` when absent or empty.
    fn read_token(&self) -> Option<String>;

    /// Store the token so the link becomes shareable.
    fn write_token(&mut self, game_id: &str);

    /// Full shareable link as it currently stands.
    fn share_link(&self) -> String;
}
