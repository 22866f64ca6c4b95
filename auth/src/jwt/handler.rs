use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Uses HS256 (HMAC with SHA-256) with the
/// secret's raw bytes as key, so the same secret always yields the same key.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Minimum secret length for HS256 keying (256 bits).
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtError::WeakSecret {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, verifying signature and expiry.
    ///
    /// Expiry is checked with zero leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with a different key
    /// * `TokenExpired` - `exp` is in the past
    /// * `Malformed` - Not a structurally valid token
    /// * `Unsupported` - Algorithm other than HS256
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        Ok(decode::<T>(token, &self.decoding_key, &validation)?.claims)
    }

    /// Decode a token, verifying the signature but not the expiry.
    ///
    /// A freshly expired token must still be readable, so callers that only
    /// need the claims (not an authorization decision) use this.
    pub fn decode_allow_expired<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;

        Ok(decode::<T>(token, &self.decoding_key, &validation)?.claims)
    }
}
