use crate::config::AuthSettings;
use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub login: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SigningKey {
    fn new(secret: &str, ttl: Duration) -> Self {
        SigningKey {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    fn sign(&self, user_id: &str, login: &str) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            user_id: user_id.to_string(),
            login: login.to_string(),
            iat,
            exp: iat + self.ttl.as_secs() as i64,
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding,
        )?)
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);
        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}

/// Issues and verifies HS256 access and refresh tokens, each with its own
/// secret and lifetime.
pub struct TokenIssuer {
    access: SigningKey,
    refresh: SigningKey,
}

impl TokenIssuer {
    pub fn new(settings: &AuthSettings) -> Self {
        TokenIssuer {
            access: SigningKey::new(&settings.access_secret, settings.access_token_ttl),
            refresh: SigningKey::new(&settings.refresh_secret, settings.refresh_token_ttl),
        }
    }

    pub fn issue_pair(&self, user_id: &str, login: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: self.access.sign(user_id, login)?,
            refresh_token: self.refresh.sign(user_id, login)?,
        })
    }

    /// Fails on a bad signature, a malformed token or an expired one.
    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        self.access.verify(token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        self.refresh.verify(token)
    }
}
