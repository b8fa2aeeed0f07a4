pub mod extractors;
pub mod password;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use password::validate_password_bytes;

pub use extractors::BearerToken;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, LoginResponse};
pub use token::{Claims, TokenSigner};

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name, 1 to 50 characters.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Plaintext password, at least 6 characters and at most 72 bytes. Only its hash is stored.
    #[validate(length(min = 6), custom = "validate_password_bytes")]
    pub password: String,
}
