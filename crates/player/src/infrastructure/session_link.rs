//! Shareable session links
//!
//! A session link is any URL whose fragment carries the game id:
//! - `https://rpsls.local/` - no fragment, start a new game
//! - `https://rpsls.local/#K3Q9Z` - join game `K3Q9Z`
//!
//! Users may also paste just `#K3Q9Z` or `K3Q9Z`; those are resolved against
//! the configured base URL.

use url::Url;

use crate::ports::outbound::SessionLinkPort;

/// Error turning user input into a session link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("invalid session link '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Session link backed by a URL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSessionLink {
    url: Url,
}

impl UrlSessionLink {
    /// A link with no game yet.
    pub fn new(base: Url) -> Self {
        let mut url = base;
        url.set_fragment(None);
        Self { url }
    }

    /// Resolve user input (full URL, `#token`, bare token or nothing) against `base`.
    pub fn from_input(input: Option<&str>, base: &Url) -> Result<Self, LinkError> {
        let input = input.map(str::trim).unwrap_or_default();

        if input.is_empty() {
            return Ok(Self::new(base.clone()));
        }

        if let Some(token) = input.strip_prefix('#') {
            return Ok(Self::with_token(base.clone(), token));
        }

        match Url::parse(input) {
            Ok(url) => Ok(Self { url }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Self::with_token(base.clone(), input))
            }
            Err(source) => Err(LinkError::InvalidUrl {
                input: input.to_string(),
                source,
            }),
        }
    }

    fn with_token(base: Url, token: &str) -> Self {
        let mut link = Self::new(base);
        if !token.is_empty() {
            link.url.set_fragment(Some(token));
        }
        link
    }
}

impl SessionLinkPort for UrlSessionLink {
    fn read_token(&self) -> Option<String> {
        self.url
            .fragment()
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
    }

    fn write_token(&mut self, game_id: &str) {
        self.url.set_fragment(Some(game_id));
    }

    fn share_link(&self) -> String {
        self.url.to_string()
    }
}
