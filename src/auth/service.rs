//! JWT verification and minting.

use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Token lifetime: 24 hours, matching the upstream auth service.
const TOKEN_TTL_SECS: usize = 24 * 3600;

/// Claims carried by storefront tokens. `name` and `email` feed the payment
/// prefill block; nothing else about the user is needed here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id, as a string per JWT convention
    pub sub: String,
    /// Display name
    pub name: String,
    pub email: String,
    /// Expiration timestamp (unix seconds)
    pub exp: usize,
    /// Issued at (unix seconds)
    pub iat: usize,
}

impl Claims {
    /// Numeric user id; zero when the subject is not numeric.
    pub fn user_id(&self) -> i64 {
        self.sub.parse().unwrap_or_default()
    }
}

pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Mint a token for the given identity. Used by the mock token endpoint
    /// and by tests; real clients arrive with tokens from the auth service.
    pub fn issue_token(&self, user_id: i64, name: &str, email: &str) -> Result<String> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            exp: now + TOKEN_TTL_SECS,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the claims on success.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
