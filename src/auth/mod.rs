use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{SecurityConfig, SessionAlgorithm};

/// Claims carried by a session token.
///
/// Role and subscription live under `metadata`, which is where the auth
/// provider projects a user's private metadata into session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

impl Claims {
    pub fn new(sub: impl Into<String>, role: Option<String>, subscription: Option<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: sub.into(),
            exp,
            iat: now.timestamp(),
            iss: None,
            metadata: SessionMetadata { role, subscription },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
}

impl SubscriptionTier {
    /// Anything other than an explicit premium marker is the free tier.
    pub fn from_metadata(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(tier) if tier == "premium" => SubscriptionTier::Premium,
            _ => SubscriptionTier::Free,
        }
    }
}

/// Authenticated identity making a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub role: Role,
    pub subscription: SubscriptionTier,
    /// Raw bearer credential, forwarded on downstream calls
    #[serde(skip)]
    pub token: String,
}

impl Principal {
    pub fn from_claims(claims: Claims, admin_role: &str, token: String) -> Self {
        let role = match claims.metadata.role.as_deref() {
            Some(r) if r.eq_ignore_ascii_case(admin_role) => Role::Admin,
            _ => Role::User,
        };

        Self {
            id: claims.sub,
            role,
            subscription: SubscriptionTier::from_metadata(claims.metadata.subscription.as_deref()),
            token,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session verification key is not configured")]
    MissingKey,

    #[error("invalid session verification key: {0}")]
    InvalidKey(String),

    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error("token generation failed: {0}")]
    TokenGeneration(String),
}

/// Verifies bearer credentials issued by the auth provider
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
    admin_role: String,
}

impl SessionVerifier {
    pub fn from_config(security: &SecurityConfig) -> Result<Self, SessionError> {
        if security.session_key.is_empty() {
            return Err(SessionError::MissingKey);
        }

        let (key, algorithm) = match security.session_algorithm {
            SessionAlgorithm::Hs256 => (DecodingKey::from_secret(security.session_key.as_bytes()), Algorithm::HS256),
            SessionAlgorithm::Rs256 => (
                DecodingKey::from_rsa_pem(security.session_key.as_bytes())
                    .map_err(|e| SessionError::InvalidKey(e.to_string()))?,
                Algorithm::RS256,
            ),
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &security.session_issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            key,
            validation,
            admin_role: security.admin_role.clone(),
        })
    }

    /// Decode and validate a bearer token into the principal it names
    pub fn verify(&self, token: &str) -> Result<Principal, SessionError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

        Ok(Principal::from_claims(data.claims, &self.admin_role, token.to_string()))
    }
}

/// Mint an HS256 session token. Used for local development and tests.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingKey);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| SessionError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn verifier(secret: &str) -> SessionVerifier {
        let mut security = AppConfig::development().security;
        security.session_key = secret.to_string();
        SessionVerifier::from_config(&security).unwrap()
    }

    #[test]
    fn issued_admin_token_verifies_as_admin() {
        let claims = Claims::new("user_1", Some("admin".into()), Some("premium".into()), 1);
        let token = issue_token(&claims, "secret").unwrap();

        let principal = verifier("secret").verify(&token).unwrap();
        assert_eq!(principal.id, "user_1");
        assert!(principal.is_admin());
        assert_eq!(principal.subscription, SubscriptionTier::Premium);
        assert_eq!(principal.token, token);
    }

    #[test]
    fn missing_or_unknown_role_is_user() {
        let token = issue_token(&Claims::new("u", None, None, 1), "secret").unwrap();
        assert_eq!(verifier("secret").verify(&token).unwrap().role, Role::User);

        let token = issue_token(&Claims::new("u", Some("editor".into()), None, 1), "secret").unwrap();
        assert_eq!(verifier("secret").verify(&token).unwrap().role, Role::User);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&Claims::new("u", None, None, 1), "secret").unwrap();
        assert!(matches!(verifier("other").verify(&token), Err(SessionError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::new("u", Some("admin".into()), None, 1);
        claims.exp = Utc::now().timestamp() - 3600;
        let token = issue_token(&claims, "secret").unwrap();
        assert!(verifier("secret").verify(&token).is_err());
    }

    #[test]
    fn subscription_defaults_to_free() {
        assert_eq!(SubscriptionTier::from_metadata(None), SubscriptionTier::Free);
        assert_eq!(SubscriptionTier::from_metadata(Some("gold")), SubscriptionTier::Free);
        assert_eq!(SubscriptionTier::from_metadata(Some(" Premium ")), SubscriptionTier::Premium);
    }

    #[test]
    fn empty_secret_cannot_issue() {
        assert!(matches!(
            issue_token(&Claims::new("u", None, None, 1), ""),
            Err(SessionError::MissingKey)
        ));
    }
}
