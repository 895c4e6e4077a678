/**
 * Email Confirmation Tokens
 *
 * Time-limited signed tokens embedding an email address. They are signed
 * with the JWT secret followed by the password salt, so rotating the salt
 * invalidates every outstanding link without touching access tokens.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::shared::AppConfig;

/// Value of the `purpose` claim
pub const CONFIRMATION_PURPOSE: &str = "email_confirmation";

#[derive(Debug, Serialize, Deserialize)]
struct ConfirmationClaims {
    email: String,
    purpose: String,
    iat: i64,
    exp: i64,
}

/// Issues and checks email confirmation tokens
#[derive(Clone)]
pub struct ConfirmationTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl ConfirmationTokens {
    pub fn new(secret: &str, salt: &str, ttl: Duration) -> Self {
        let material = format!("{}{}", secret, salt);
        Self {
            encoding: EncodingKey::from_secret(material.as_bytes()),
            decoding: DecodingKey::from_secret(material.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            &config.password_salt,
            config.confirmation_token_ttl,
        )
    }

    pub fn issue(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = ConfirmationClaims {
            email: email.to_string(),
            purpose: CONFIRMATION_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Return the embedded email if the token is authentic, unexpired and
    /// was issued for email confirmation
    pub fn verify(&self, token: &str) -> Option<String> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<ConfirmationClaims>(token, &self.decoding, &validation).ok()?;
        if data.claims.purpose != CONFIRMATION_PURPOSE {
            return None;
        }
        Some(data.claims.email)
    }
}
