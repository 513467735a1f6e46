use std::env;
use std::time::Duration;

use anyhow::anyhow;

use crate::config::AppConfig;

/// Connection settings for the CLI.
///
/// URLs and timeout come from the same `AppConfig` the server loads; only the
/// caller's own token (`LINGO_TOKEN`) is CLI specific.
#[derive(Debug, Clone)]
pub struct CliSettings {
    pub api_url: String,
    pub content_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl CliSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env_without_secrets()?;
        let token = env::var("LINGO_TOKEN").ok();
        Ok(Self::from_config(&config, token))
    }

    pub fn from_config(config: &AppConfig, token: Option<String>) -> Self {
        Self {
            api_url: config.urls.internal_api_url.clone(),
            content_url: config.urls.content_api_url.clone(),
            token: token.filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(config.http.request_timeout_secs),
        }
    }

    /// Token given on the command line wins over `LINGO_TOKEN`
    pub fn resolve_token(&self, flag: Option<String>) -> anyhow::Result<String> {
        flag.or_else(|| self.token.clone())
            .ok_or_else(|| anyhow!("No session token: pass --token or set LINGO_TOKEN (see `lingo token`)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(token: Option<&str>) -> CliSettings {
        CliSettings::from_config(&AppConfig::development(), token.map(str::to_string))
    }

    #[test]
    fn urls_and_timeout_follow_app_config() {
        let mut config = AppConfig::development();
        config.urls.internal_api_url = "https://api.lingo.test".to_string();
        config.urls.content_api_url = "https://content.lingo.test".to_string();
        config.http.request_timeout_secs = 7;

        let s = CliSettings::from_config(&config, None);
        assert_eq!(s.api_url, "https://api.lingo.test");
        assert_eq!(s.content_url, "https://content.lingo.test");
        assert_eq!(s.timeout, Duration::from_secs(7));
    }

    #[test]
    fn flag_overrides_environment_token() {
        let s = settings(Some("from-env"));
        assert_eq!(s.resolve_token(Some("from-flag".into())).unwrap(), "from-flag");
        assert_eq!(s.resolve_token(None).unwrap(), "from-env");
    }

    #[test]
    fn missing_or_blank_token_is_an_error() {
        assert!(settings(None).resolve_token(None).is_err());
        assert!(settings(Some("  ")).resolve_token(None).is_err());
    }
}
