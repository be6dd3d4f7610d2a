pub mod extractors;
pub mod middleware;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use token::{Claims, TokenCodec};

/// Represents the payload for a user login request.
///
/// Note that these fields are accepted as-is: the API issues a token for any
/// submitted email without checking the password against anything.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User's email address.
    pub email: String,
    /// User's password. Carried in the payload for API-shape compatibility;
    /// never inspected.
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email address for the new account.
    pub email: String,
    /// Password for the new account. Never inspected.
    pub password: String,
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed token presented on subsequent requests.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_is_bearer_typed() {
        let response = TokenResponse::bearer("abc.def.ghi".to_string());
        assert_eq!(response.access_token, "abc.def.ghi");
        assert_eq!(response.token_type, "bearer");
    }

    #[test]
    fn test_login_request_deserializes() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email": "a@example.com", "password": "whatever"}"#).unwrap();
        assert_eq!(request.email, "a@example.com");
        assert_eq!(request.password, "whatever");
    }
}
