use clap::Args;
use serde_json::json;

use crate::auth::{issue_token, Claims};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::{session_key_from_env, AppConfig};

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "Subject (user id) for the token", default_value = "dev-user")]
    pub subject: String,

    #[arg(long, help = "Role claim, e.g. admin")]
    pub role: Option<String>,

    #[arg(long, help = "Subscription claim, e.g. premium")]
    pub subscription: Option<String>,

    #[arg(long, help = "Hours until the token expires (defaults to SECURITY_TOKEN_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

impl TokenArgs {
    pub fn expiry_hours(&self, config: &AppConfig) -> u64 {
        self.hours.unwrap_or(config.security.token_expiry_hours)
    }
}

/// Signs an HS256 token with `SESSION_JWT_KEY`; only useful against a server
/// running with the same shared secret.
pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env_without_secrets()?;
    let secret = session_key_from_env()?;

    let claims = Claims::new(
        args.subject.clone(),
        args.role.clone(),
        args.subscription.clone(),
        args.expiry_hours(&config),
    );
    let token = issue_token(&claims, &secret)?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            &format!("Token issued for {}", args.subject),
            Some(json!({
                "token": token,
                "expires_at": claims.exp,
                "role": args.role,
                "subscription": args.subscription,
            })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(hours: Option<u64>) -> TokenArgs {
        TokenArgs {
            subject: "dev-user".to_string(),
            role: None,
            subscription: None,
            hours,
        }
    }

    #[test]
    fn expiry_defaults_to_configured_hours() {
        let mut config = AppConfig::development();
        config.security.token_expiry_hours = 12;

        assert_eq!(args(None).expiry_hours(&config), 12);
        assert_eq!(args(Some(2)).expiry_hours(&config), 2);
    }
}
