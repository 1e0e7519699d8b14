use anyhow::Result;
use async_trait::async_trait;

/// Trait for password hashing and verification
#[async_trait]
pub trait PasswordHashingService: Send + Sync {
    /// Derive a salted, one-way digest of `password`.
    async fn hash_password(&self, password: &str) -> Result<String>;

    /// Check `password` against a stored digest. Malformed digests yield `false`.
    async fn verify_password(&self, password: &str, hash: &str) -> bool;

    /// A well-formed digest at the configured cost that no password matches.
    fn decoy_hash(&self) -> &str;
}
