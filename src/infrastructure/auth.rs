use crate::domain::auth::{Claims, TokenError, TokenKind, TokenService};
use crate::domain::clock::Clock;
use crate::infrastructure::config::{AuthConfig, ConfigError};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::fmt;
use std::sync::Arc;
use time::Duration;

/// JWT Authentication Service signing with a shared HMAC secret
///
/// Expiry is checked against the injected [`Clock`] rather than inside
/// `jsonwebtoken`, so tests can move time deterministically.
pub struct JwtTokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

impl JwtTokenService {
    /// Create a new JWT service from a raw secret
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigError::Invalid {
                key: "JWT_ALGORITHM",
                reason: format!("{:?} is not an HMAC algorithm", algorithm),
            });
        }
        if !access_token_ttl.is_positive() || !refresh_token_ttl.is_positive() {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_EXPIRE_MINUTES",
                reason: "token lifetimes must be positive".to_string(),
            });
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_token_ttl,
            refresh_token_ttl,
            clock,
        })
    }

    /// Create a new JWT service from process configuration
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        Self::new(
            config.jwt_secret.as_bytes(),
            config.jwt_algorithm,
            config.access_token_ttl,
            config.refresh_token_ttl,
            clock,
        )
    }

    fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let claims = Claims::new(subject, kind, self.clock.now(), ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(TokenError::EmptySubject);
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl TokenService for JwtTokenService {
    fn issue_access(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Access, self.access_token_ttl)
    }

    fn issue_refresh(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Refresh, self.refresh_token_ttl)
    }

    fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<String, TokenError> {
        let claims = self.decode_claims(token)?;
        if claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                actual: claims.kind,
            });
        }
        Ok(claims.sub)
    }

    fn access_ttl(&self) -> Duration {
        self.access_token_ttl
    }
}
