use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Kind of a signed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT Claims structure
///
/// Every field is required on decode; a token missing any of them is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity key, the user's email)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Token kind: "access" or "refresh"
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Claims {
    pub fn new(subject: &str, kind: TokenKind, issued_at: OffsetDateTime, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + ttl).unix_timestamp(),
            kind,
        }
    }

    /// A token is live strictly before its expiry second.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.exp <= now.unix_timestamp()
    }
}

/// Internal cause of a token rejection.
///
/// Only ever logged: clients see a single generic authentication failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),
    #[error("token signature or algorithm does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is missing required claim `{0}`")]
    MissingClaim(String),
    #[error("expected {expected} token, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("token subject must not be empty")]
    EmptySubject,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Failures of the authentication boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredential,
    #[error("invalid token: {0}")]
    TokenInvalid(#[from] TokenError),
    #[error("token subject does not match any identity")]
    UnknownIdentity,
    #[error("identity is inactive")]
    IdentityInactive,
    #[error("identity store unavailable: {0}")]
    DependencyUnavailable(anyhow::Error),
}

/// Issues and verifies stateless signed tokens.
pub trait TokenService: Send + Sync {
    /// Issue a short-lived access token for `subject`.
    fn issue_access(&self, subject: &str) -> Result<String, TokenError>;

    /// Issue a long-lived refresh token for `subject`.
    fn issue_refresh(&self, subject: &str) -> Result<String, TokenError>;

    /// Check signature and expiry and return the embedded subject.
    fn verify(&self, token: &str) -> Result<String, TokenError>;

    /// Like [`TokenService::verify`], additionally requiring the token kind.
    fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<String, TokenError>;

    /// Lifetime of access tokens, reported to clients as `expires_in`.
    fn access_ttl(&self) -> Duration;
}
