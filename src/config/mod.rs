use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub urls: UrlConfig,
    pub security: SecurityConfig,
    pub billing: BillingConfig,
    pub locale: LocaleConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Public URL of the learner app, used to build redirects
    pub app_url: String,
    /// Base URL of this admin API, used by the CLI and admin client
    pub internal_api_url: String,
    /// Base URL of the lesson/unit-test content service
    pub content_api_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAlgorithm {
    /// Shared secret, used for local development tokens
    Hs256,
    /// PEM public key published by the auth provider
    Rs256,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub session_key: String,
    pub session_algorithm: SessionAlgorithm,
    pub session_issuer: Option<String>,
    pub admin_role: String,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub token_expiry_hours: u64,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("session_key", &"<redacted>")
            .field("session_algorithm", &self.session_algorithm)
            .field("session_issuer", &self.session_issuer)
            .field("admin_role", &self.admin_role)
            .field("enable_cors", &self.enable_cors)
            .field("cors_origins", &self.cors_origins)
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(skip_serializing)]
    pub stripe_secret_key: String,
    pub revenue_chart_months: u32,
}

impl std::fmt::Debug for BillingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingConfig")
            .field("stripe_secret_key", &"<redacted>")
            .field("revenue_chart_months", &self.revenue_chart_months)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub supported: Vec<String>,
    pub default_locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Presets are picked by `APP_ENV`, then individual variables override
    /// them. Secrets have no preset and must be present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_env_without_secrets()?;
        config.security.session_key = session_key_from_env()?;
        config.billing.stripe_secret_key = required("STRIPE_SECRET_KEY")?;

        Ok(config)
    }

    /// Presets and overrides with the secrets left empty, for the CLI
    pub fn from_env_without_secrets() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };
        config.apply_env_overrides()?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("LINGO_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
        {
            self.server.port = port.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // URL overrides
        if let Ok(v) = env::var("APP_URL") {
            self.urls.app_url = v;
        }
        if let Ok(v) = env::var("INTERNAL_API_URL") {
            self.urls.internal_api_url = v;
        }
        if let Ok(v) = env::var("CONTENT_API_URL") {
            self.urls.content_api_url = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SESSION_JWT_ALGORITHM") {
            self.security.session_algorithm = match v.to_ascii_uppercase().as_str() {
                "HS256" => SessionAlgorithm::Hs256,
                "RS256" => SessionAlgorithm::Rs256,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SESSION_JWT_ALGORITHM",
                        reason: format!("'{}' is not one of HS256, RS256", v),
                    })
                }
            };
        }
        if let Ok(v) = env::var("SESSION_JWT_ISSUER") {
            self.security.session_issuer = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_ROLE") {
            self.security.admin_role = v;
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }
        if let Ok(v) = env::var("SECURITY_TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours = v.parse().unwrap_or(self.security.token_expiry_hours);
        }

        // Billing overrides
        if let Ok(v) = env::var("REVENUE_CHART_MONTHS") {
            self.billing.revenue_chart_months = v.parse().unwrap_or(self.billing.revenue_chart_months);
        }

        // Locale overrides
        if let Ok(v) = env::var("LOCALES") {
            self.locale.supported = split_list(&v);
        }
        if let Ok(v) = env::var("DEFAULT_LOCALE") {
            self.locale.default_locale = v;
        }
        if !self.locale.supported.contains(&self.locale.default_locale) {
            return Err(ConfigError::Invalid {
                name: "DEFAULT_LOCALE",
                reason: format!("'{}' is not in LOCALES", self.locale.default_locale),
            });
        }

        if let Ok(v) = env::var("HTTP_REQUEST_TIMEOUT_SECS") {
            self.http.request_timeout_secs = v.parse().unwrap_or(self.http.request_timeout_secs);
        }

        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
                enable_request_logging: true,
            },
            urls: UrlConfig {
                app_url: "http://localhost:3000".to_string(),
                internal_api_url: "http://localhost:4000".to_string(),
                content_api_url: "http://localhost:5000".to_string(),
            },
            security: SecurityConfig {
                session_key: String::new(),
                session_algorithm: SessionAlgorithm::Hs256,
                session_issuer: None,
                admin_role: "admin".to_string(),
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
                token_expiry_hours: 24 * 7, // 1 week
            },
            billing: BillingConfig {
                stripe_secret_key: String::new(),
                revenue_chart_months: 12,
            },
            locale: LocaleConfig::default(),
            http: HttpConfig { request_timeout_secs: 30 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: true,
            },
            urls: UrlConfig {
                app_url: "https://staging.lingo.example.com".to_string(),
                internal_api_url: "https://api.staging.lingo.example.com".to_string(),
                content_api_url: "https://content.staging.lingo.example.com".to_string(),
            },
            security: SecurityConfig {
                session_key: String::new(),
                session_algorithm: SessionAlgorithm::Rs256,
                session_issuer: None,
                admin_role: "admin".to_string(),
                enable_cors: true,
                cors_origins: vec!["https://staging.lingo.example.com".to_string()],
                token_expiry_hours: 24,
            },
            billing: BillingConfig {
                stripe_secret_key: String::new(),
                revenue_chart_months: 12,
            },
            locale: LocaleConfig::default(),
            http: HttpConfig { request_timeout_secs: 15 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: false,
            },
            urls: UrlConfig {
                app_url: "https://lingo.example.com".to_string(),
                internal_api_url: "https://api.lingo.example.com".to_string(),
                content_api_url: "https://content.lingo.example.com".to_string(),
            },
            security: SecurityConfig {
                session_key: String::new(),
                session_algorithm: SessionAlgorithm::Rs256,
                session_issuer: None,
                admin_role: "admin".to_string(),
                enable_cors: true,
                cors_origins: vec!["https://lingo.example.com".to_string()],
                token_expiry_hours: 4,
            },
            billing: BillingConfig {
                stripe_secret_key: String::new(),
                revenue_chart_months: 12,
            },
            locale: LocaleConfig::default(),
            http: HttpConfig { request_timeout_secs: 10 },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en".to_string(), "ar".to_string()],
            default_locale: "en".to_string(),
        }
    }
}

/// Shared session secret, also needed by `lingo token` to sign dev tokens
pub fn session_key_from_env() -> Result<String, ConfigError> {
    required("SESSION_JWT_KEY")
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
