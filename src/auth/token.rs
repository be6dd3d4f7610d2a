use crate::error::AppError;
use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// No secret material is embedded; the claim set is exactly what the API
/// needs to scope task operations to their owner.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Unique identifier of the authenticated user.
    pub user_id: Uuid,
    /// Email the token was issued for.
    pub email: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Signs and verifies bearer tokens with a server-held symmetric secret.
///
/// The codec is constructed once at startup from configuration and shared
/// with the pieces that need it; nothing here reads the environment or any
/// other ambient state.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issues a signed token for the given identity.
    ///
    /// The token carries the user id and email as claims and expires `ttl`
    /// after issuance (HS256 signature).
    ///
    /// # Returns
    /// A `Result` containing the compact token string if successful.
    /// Returns `AppError::InternalServerError` if encoding fails.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            user_id,
            email: email.to_owned(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Default validation checks are applied (signature, expiration). Every
    /// failure mode — malformed token, bad signature, expired token — is
    /// reported to callers as the same `AppError::Unauthorized`; the
    /// underlying cause is only written to the debug log, so responses never
    /// reveal whether a signature or the format was at fault.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("token verification failed: {}", e);
                AppError::Unauthorized("Invalid or expired token".into())
            })
    }
}
