//! Authentication utilities library
//!
//! Provides the credential primitives of the account service:
//! - Password hashing (Argon2id) behind the [`SecretHasher`] capability
//! - Signed, time-bounded access and refresh tokens (HS256 JWT)
//! - Authentication coordination
//!
//! Nothing here keeps state between calls: a token's validity depends only on
//! its bytes and the signing secret.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, SecretHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenProvider;
//! use chrono::Duration;
//!
//! let tokens = TokenProvider::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//!     Duration::days(7),
//! )
//! .unwrap();
//! let access = tokens.create_access_token("ann@example.com", "ROLE_USER").unwrap();
//! assert!(tokens.validate_token(&access));
//! assert_eq!(tokens.email_from_token(&access).unwrap(), "ann@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Argon2Hasher, Authenticator, TokenProvider};
//! use chrono::Duration;
//!
//! let tokens = TokenProvider::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//!     Duration::days(7),
//! )
//! .unwrap();
//! let auth = Authenticator::new(Argon2Hasher::new(), tokens);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let result = auth
//!     .authenticate("password123", &hash, "ann@example.com", "ROLE_USER")
//!     .unwrap();
//!
//! // Refresh: trade the refresh token for its subject
//! let subject = auth.refresh_subject(&result.refresh_token).unwrap();
//! assert_eq!(subject, "ann@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod principal;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenProvider;
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::SecretHasher;
pub use principal::Principal;
