//! Player configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use url::Url;

/// Player configuration loaded from environment
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Game service WebSocket endpoint
    pub ws_url: Url,
    /// Base URL that session links are built on
    pub share_base_url: Url,
    /// Explicit identity storage file; platform config dir when absent
    pub storage_path: Option<PathBuf>,
    /// Link (or bare token) of a game to join
    pub session_link: Option<String>,
}

impl PlayerConfig {
    /// Load configuration from environment variables.
    ///
    /// `session_arg` (first CLI argument) takes precedence over
    /// `RPSLS_SESSION_LINK`.
    pub fn from_env(session_arg: Option<String>) -> Result<Self> {
        let ws_url =
            env::var("RPSLS_WS_URL").unwrap_or_else(|_| "ws://localhost:3000/ws".to_string());
        let share_base_url =
            env::var("RPSLS_SHARE_BASE_URL").unwrap_or_else(|_| "https://rpsls.local/".to_string());

        Ok(Self {
            ws_url: Url::parse(&ws_url)
                .with_context(|| format!("RPSLS_WS_URL is not a valid URL: {ws_url}"))?,
            share_base_url: Url::parse(&share_base_url).with_context(|| {
                format!("RPSLS_SHARE_BASE_URL is not a valid URL: {share_base_url}")
            })?,
            storage_path: env::var("RPSLS_STORAGE_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            session_link: session_arg
                .or_else(|| env::var("RPSLS_SESSION_LINK").ok())
                .filter(|link| !link.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "RPSLS_WS_URL",
        "RPSLS_SHARE_BASE_URL",
        "RPSLS_STORAGE_PATH",
        "RPSLS_SESSION_LINK",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = PlayerConfig::from_env(None).unwrap();

        assert_eq!(config.ws_url.as_str(), "ws://localhost:3000/ws");
        assert_eq!(config.share_base_url.as_str(), "https://rpsls.local/");
        assert_eq!(config.storage_path, None);
        assert_eq!(config.session_link, None);
    }

    #[test]
    fn test_cli_argument_wins_over_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("RPSLS_SESSION_LINK", "#from-env");

        let config = PlayerConfig::from_env(Some("#from-arg".into())).unwrap();
        assert_eq!(config.session_link.as_deref(), Some("#from-arg"));

        let config = PlayerConfig::from_env(None).unwrap();
        assert_eq!(config.session_link.as_deref(), Some("#from-env"));
        clear_env();
    }

    #[test]
    fn test_invalid_ws_url_is_reported() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("RPSLS_WS_URL", "not a url");

        let err = PlayerConfig::from_env(None).unwrap_err();
        assert!(err.to_string().contains("RPSLS_WS_URL"));
        clear_env();
    }
}
